//! Historical quiz statistics
//!
//! `StatisticService` is the contract the quiz flow relies on;
//! `StatisticServiceImpl` keeps the numbers in memory and writes them
//! through a `StatisticsStorage` when one is attached.

use crate::config::persistence::StatisticsStorage;
use crate::models::{GameRecord, GameStatistics};
use crate::Result;

/// Statistics collected over all finished rounds
pub trait StatisticService {
    /// Record a finished round
    fn store(&mut self, correct: u32, total: u32) -> Result<()>;

    /// Number of finished rounds
    fn games_count(&self) -> u32;

    /// Best round so far
    fn best_game(&self) -> Option<GameRecord>;

    /// Average accuracy over all rounds, in percent
    fn total_accuracy(&self) -> f64;
}

/// Statistic service backed by an optional JSON file
#[derive(Debug)]
pub struct StatisticServiceImpl {
    statistics: GameStatistics,
    storage: Option<StatisticsStorage>,
}

impl StatisticServiceImpl {
    /// Load statistics from the standard location
    pub fn new() -> Result<Self> {
        Self::with_storage(StatisticsStorage::new()?)
    }

    /// Load statistics from the given storage and persist into it
    pub fn with_storage(storage: StatisticsStorage) -> Result<Self> {
        let statistics = storage.load()?;
        log::debug!(
            "Loaded statistics from {}: {} games played",
            storage.path().display(),
            statistics.games_count
        );
        Ok(Self {
            statistics,
            storage: Some(storage),
        })
    }

    /// Statistics that live only as long as the service
    pub fn in_memory() -> Self {
        Self {
            statistics: GameStatistics::default(),
            storage: None,
        }
    }
}

impl StatisticService for StatisticServiceImpl {
    fn store(&mut self, correct: u32, total: u32) -> Result<()> {
        self.statistics.record(GameRecord::new(correct, total));
        log::info!(
            "Round stored: {}/{} (games played: {})",
            correct,
            total,
            self.statistics.games_count
        );

        match &self.storage {
            Some(storage) => storage.save(&self.statistics),
            None => Ok(()),
        }
    }

    fn games_count(&self) -> u32 {
        self.statistics.games_count
    }

    fn best_game(&self) -> Option<GameRecord> {
        self.statistics.best_game.clone()
    }

    fn total_accuracy(&self) -> f64 {
        self.statistics.total_accuracy()
    }
}
