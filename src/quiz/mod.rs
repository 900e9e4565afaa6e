//! Quiz module
//!
//! Session state machine, question building, historical statistics and
//! view-model conversion.

pub mod factory;
pub mod loader;
pub mod presenter;
pub mod session;
pub mod statistics;

pub use factory::{QuestionFactory, QuizEvent};
pub use loader::{JsonMoviesLoader, MoviesLoader};
pub use presenter::{AlertAction, AlertModel, QuizPresenter, QuizStepViewModel};
pub use session::{QuizSession, SessionState};
pub use statistics::{StatisticService, StatisticServiceImpl};
