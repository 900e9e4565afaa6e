//! Configuration management module
//!
//! Handles loading, saving, and validation of quiz configuration
//! and user preferences.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::{QuizError, Result, APP_NAME, CATALOG_FILE, CONFIG_FILE, DEFAULT_QUESTIONS_PER_ROUND};

pub mod persistence;

/// Quiz configuration structure containing all round parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Movie catalog file (JSON) the questions are built from
    pub catalog_path: PathBuf,
    /// Number of questions asked in one round
    pub questions_per_round: usize,
    /// Pause between showing an answer result and the next question
    pub answer_delay: Duration,
    /// Lowest rating threshold a question may ask about
    pub rating_threshold_min: u8,
    /// Highest rating threshold a question may ask about
    pub rating_threshold_max: u8,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            questions_per_round: DEFAULT_QUESTIONS_PER_ROUND,
            answer_delay: Duration::from_secs(1),
            rating_threshold_min: 7,
            rating_threshold_max: 9,
        }
    }
}

fn default_catalog_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME).join(CATALOG_FILE))
        .unwrap_or_else(|| PathBuf::from(CATALOG_FILE))
}

impl QuizConfig {
    /// Create a new quiz configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(QuizError::ConfigError(
                "Catalog path must not be empty".to_string()
            ));
        }

        if self.questions_per_round == 0 {
            return Err(QuizError::ConfigError(
                "Questions per round must be greater than 0".to_string()
            ));
        }

        const MAX_QUESTIONS: usize = 100;
        if self.questions_per_round > MAX_QUESTIONS {
            return Err(QuizError::ConfigError(
                format!("Too many questions per round: {} (max: {})",
                    self.questions_per_round, MAX_QUESTIONS)
            ));
        }

        const MAX_DELAY: Duration = Duration::from_secs(10);
        if self.answer_delay > MAX_DELAY {
            return Err(QuizError::ConfigError(
                format!("Answer delay too long: {}ms (max: {}ms)",
                    self.answer_delay.as_millis(), MAX_DELAY.as_millis())
            ));
        }

        if self.rating_threshold_max > 10 {
            return Err(QuizError::ConfigError(
                "Rating thresholds must be between 0 and 10".to_string()
            ));
        }

        if self.rating_threshold_min > self.rating_threshold_max {
            return Err(QuizError::ConfigError(
                format!("Rating threshold range is empty: {}..={}",
                    self.rating_threshold_min, self.rating_threshold_max)
            ));
        }

        Ok(())
    }

    /// Set the movie catalog path
    pub fn with_catalog_path(mut self, path: PathBuf) -> Self {
        self.catalog_path = path;
        self
    }

    /// Set the number of questions per round
    pub fn with_questions_per_round(mut self, count: usize) -> Self {
        self.questions_per_round = count;
        self
    }

    /// Set the delay before moving to the next question
    pub fn with_answer_delay(mut self, delay: Duration) -> Self {
        self.answer_delay = delay;
        self
    }

    /// Set the inclusive rating threshold range
    pub fn with_rating_thresholds(mut self, min: u8, max: u8) -> Self {
        self.rating_threshold_min = min;
        self.rating_threshold_max = max;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| QuizError::ConfigError(
                format!("Failed to read config file {}: {}", config_path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| QuizError::ConfigError(
                format!("Failed to parse config file {}: {}", config_path.display(), e)
            ))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| QuizError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| QuizError::ConfigError(
                format!("Failed to serialize configuration: {}", e)
            ))?;

        fs::write(config_path, content)
            .map_err(|e| QuizError::ConfigError(
                format!("Failed to write config file {}: {}", config_path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/moviequiz/moviequiz.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| QuizError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
