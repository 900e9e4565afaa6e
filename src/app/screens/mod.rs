//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod alert;
pub mod loading;
pub mod question;

pub use alert::AlertScreen;
pub use loading::LoadingScreen;
pub use question::QuestionScreen;
