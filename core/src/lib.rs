//! Arithmetic practice core: problem generation, answer checking and daily statistics.

pub mod error;
pub mod problem;
pub mod stats;
pub mod store;
pub mod tracker;

pub use error::{Error, Result};
pub use problem::{
    evaluate, format, generate, generate_with, parse_answer, Difficulty, Operator, Problem,
};
pub use stats::{DailyStats, DifficultyStats, Grade};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use tracker::StatsTracker;
