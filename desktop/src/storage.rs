use arith_core::{FileStore, KeyValueStore, MemoryStore, StatsTracker};
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{info, warn};

const APP_NAME: &str = "arithmetic_practice";
const ORG_NAME: &str = "practice";

pub type Tracker = StatsTracker<Box<dyn KeyValueStore>>;

fn get_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", ORG_NAME, APP_NAME).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Falls back to an in-memory store when the platform has no data directory.
pub fn open_tracker() -> Tracker {
    let store: Box<dyn KeyValueStore> = match get_data_dir() {
        Some(dir) => {
            info!(dir = %dir.display(), "saving progress to data directory");
            Box::new(FileStore::new(dir))
        }
        None => {
            warn!("could not determine data directory, progress will not be saved");
            Box::new(MemoryStore::new())
        }
    };
    StatsTracker::new(store)
}
