//! Statistics persistence module
//!
//! Handles saving and loading of the historical quiz statistics.

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::{QuizError, Result, APP_NAME, STATISTICS_FILE};
use crate::models::result::GameStatistics;

/// Statistics storage manager
#[derive(Debug, Clone)]
pub struct StatisticsStorage {
    statistics_path: PathBuf,
}

/// Statistics file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct StatisticsFile {
    version: u32,
    statistics: GameStatistics,
}

impl StatisticsStorage {
    /// Create a storage manager at the standard location
    pub fn new() -> Result<Self> {
        let statistics_path = Self::statistics_file_path()?;
        Ok(Self { statistics_path })
    }

    /// Create a storage manager for a specific file
    pub fn at_path(statistics_path: impl Into<PathBuf>) -> Self {
        Self { statistics_path: statistics_path.into() }
    }

    /// Get the standard statistics file path
    /// Uses $DATA_HOME/moviequiz/statistics.json
    pub fn statistics_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| QuizError::PersistenceError(
                "Unable to determine data directory".to_string()
            ))?;

        Ok(data_dir.join(APP_NAME).join(STATISTICS_FILE))
    }

    /// Load statistics; a missing file means no games were played yet
    pub fn load(&self) -> Result<GameStatistics> {
        if !self.statistics_path.exists() {
            return Ok(GameStatistics::default());
        }

        let content = fs::read_to_string(&self.statistics_path)
            .map_err(|e| QuizError::PersistenceError(
                format!("Failed to read statistics file {}: {}", self.statistics_path.display(), e)
            ))?;

        let statistics_file: StatisticsFile = serde_json::from_str(&content)
            .map_err(|e| QuizError::PersistenceError(
                format!("Failed to parse statistics file {}: {}", self.statistics_path.display(), e)
            ))?;

        Ok(statistics_file.statistics)
    }

    /// Save statistics, replacing the previous file
    pub fn save(&self, statistics: &GameStatistics) -> Result<()> {
        if let Some(parent) = self.statistics_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| QuizError::PersistenceError(
                    format!("Failed to create statistics directory {}: {}", parent.display(), e)
                ))?;
        }

        let statistics_file = StatisticsFile {
            version: 1,
            statistics: statistics.clone(),
        };

        let content = serde_json::to_string_pretty(&statistics_file)
            .map_err(|e| QuizError::PersistenceError(
                format!("Failed to serialize statistics: {}", e)
            ))?;

        fs::write(&self.statistics_path, content)
            .map_err(|e| QuizError::PersistenceError(
                format!("Failed to write statistics file {}: {}", self.statistics_path.display(), e)
            ))?;

        Ok(())
    }

    /// Get statistics file path for external access
    pub fn path(&self) -> &Path {
        &self.statistics_path
    }
}
