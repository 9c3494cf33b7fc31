//! Date-partitioned answer statistics on top of a [`KeyValueStore`].
//!
//! Two records are kept under fixed keys: a table mapping `YYYY-MM-DD` to that
//! day's [`DailyStats`], and an append-only log of every answered [`Problem`].
//! Neither is ever pruned. Unreadable records are treated as empty so a
//! damaged file never blocks practice.

use chrono::{Local, NaiveDate};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::problem::Problem;
use crate::stats::DailyStats;
use crate::store::KeyValueStore;

pub const DAILY_STATS_KEY: &str = "math_daily_stats";
pub const HISTORY_KEY: &str = "math_history";

const DATE_FORMAT: &str = "%Y-%m-%d";

pub type StatsTable = BTreeMap<String, DailyStats>;

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Single-writer: the read-modify-write in [`StatsTracker::record_result`] is not
/// guarded against another process sharing the same store.
pub struct StatsTracker<S> {
    store: S,
    today: Box<dyn Fn() -> NaiveDate>,
}

impl<S: KeyValueStore> StatsTracker<S> {
    /// Uses the local calendar date.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, || Local::now().date_naive())
    }

    pub fn with_clock(store: S, today: impl Fn() -> NaiveDate + 'static) -> Self {
        Self {
            store,
            today: Box::new(today),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn today_key(&self) -> String {
        date_key((self.today)())
    }

    /// Folds an answered problem into today's counters and appends it to the history log.
    pub fn record_result(&mut self, problem: &Problem) -> Result<()> {
        let correct = match (problem.user_answer(), problem.is_correct()) {
            (Some(_), Some(correct)) => correct,
            _ => return Err(Error::Unanswered(problem.id().to_string())),
        };

        let date = self.today_key();
        let mut table = self.all_stats();
        let stats = table
            .entry(date.clone())
            .or_insert_with(|| DailyStats::empty(date.clone()));
        stats.record(problem.difficulty(), correct);

        info!(
            id = %problem.id(),
            difficulty = ?problem.difficulty(),
            correct,
            date = %date,
            total = stats.total,
            "recorded result"
        );
        self.save(DAILY_STATS_KEY, &table)?;

        let mut history = self.history();
        history.push(problem.clone());
        self.save(HISTORY_KEY, &history)
    }

    /// Today's record. A missing record is created zeroed and persisted.
    pub fn stats_for_today(&mut self) -> DailyStats {
        let date = self.today_key();
        let mut table = self.all_stats();
        if let Some(stats) = table.get(&date) {
            return stats.clone();
        }

        let stats = DailyStats::empty(date.clone());
        table.insert(date.clone(), stats.clone());
        if let Err(e) = self.save(DAILY_STATS_KEY, &table) {
            warn!(date = %date, error = %e, "could not persist initial daily stats");
        }
        stats
    }

    pub fn stats_for(&self, date: NaiveDate) -> Option<DailyStats> {
        self.all_stats().remove(&date_key(date))
    }

    pub fn all_stats(&self) -> StatsTable {
        self.load(DAILY_STATS_KEY)
    }

    pub fn history(&self) -> Vec<Problem> {
        self.load(HISTORY_KEY)
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!(key, error = %e, "store read failed, starting empty");
                return T::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key, error = %e, "stored data is corrupt, starting empty");
            T::default()
        })
    }

    fn save<T: serde::Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)
    }
}
