//! Data models module
//!
//! Contains movie catalog entries, quiz questions, game records
//! and round result definitions.

pub mod question;
pub mod result;

// Re-export commonly used types
pub use question::{Movie, MovieCatalog, Question};
pub use result::{GameRecord, GameStatistics, RoundResult};
