//! MovieQuiz - movie rating quiz
//!
//! Shows movie posters with a yes/no question about the movie's rating,
//! tracks correct answers through a round and keeps historical statistics
//! across rounds.

use std::fmt;

pub mod app;
pub mod config;
pub mod models;
pub mod quiz;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum QuizError {
    /// A question was requested past the end of the round
    OutOfRange { index: usize, len: usize },
    /// Movie catalog or poster data could not be loaded
    DataLoad(String),
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Statistics persistence error
    PersistenceError(String),
    /// TUI rendering or interaction error
    TuiError(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::OutOfRange { index, len } => {
                write!(f, "Question index {} out of range (round has {} questions)", index, len)
            }
            QuizError::DataLoad(msg) => write!(f, "Failed to load data: {}", msg),
            QuizError::IoError(err) => write!(f, "I/O error: {}", err),
            QuizError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            QuizError::PersistenceError(msg) => write!(f, "Statistics persistence error: {}", msg),
            QuizError::TuiError(msg) => write!(f, "TUI error: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for QuizError {
    fn from(err: std::io::Error) -> Self {
        QuizError::IoError(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for QuizError {
    fn from(err: toml::de::Error) -> Self {
        QuizError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for QuizError {
    fn from(err: toml::ser::Error) -> Self {
        QuizError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for MovieQuiz operations
pub type Result<T> = std::result::Result<T, QuizError>;

/// Error handling utilities
pub mod error {
    use super::QuizError;

    /// Whether the error comes from a contract violation rather than the environment
    pub fn is_fatal(error: &QuizError) -> bool {
        matches!(error, QuizError::OutOfRange { .. } | QuizError::TuiError(_))
    }

    /// Convert error to user-friendly message shown in alerts
    pub fn user_friendly_message(error: &QuizError) -> String {
        match error {
            QuizError::DataLoad(msg) => {
                format!("Could not load movies: {}. Check the catalog and try again.", msg)
            }
            QuizError::IoError(err) if err.kind() == std::io::ErrorKind::NotFound => {
                "Movie data not found. Check the catalog path in your settings.".to_string()
            }
            QuizError::IoError(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                "Permission denied while reading movie data.".to_string()
            }
            QuizError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            QuizError::PersistenceError(_) => {
                "Failed to save statistics. Check disk space and permissions.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "moviequiz";
pub const CONFIG_FILE: &str = "moviequiz.toml";
pub const STATISTICS_FILE: &str = "statistics.json";
pub const CATALOG_FILE: &str = "movies.json";
pub const DEFAULT_QUESTIONS_PER_ROUND: usize = 10;
