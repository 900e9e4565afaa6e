//! Quiz presenter
//!
//! Turns questions, round results and load errors into the view models the
//! screens render.

use crate::error::user_friendly_message;
use crate::models::{Question, RoundResult};
use crate::QuizError;

/// What a screen shows for one question
#[derive(Debug, Clone, PartialEq)]
pub struct QuizStepViewModel {
    pub image: Vec<u8>,
    pub question: String,
    /// Position counter, e.g. "3/10"
    pub question_number: String,
}

/// What happens when the alert button is pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertAction {
    /// Play a new round with the loaded catalog
    RestartRound,
    /// Reload the catalog, then play a new round
    RetryLoad,
}

/// Modal alert content
#[derive(Debug, Clone, PartialEq)]
pub struct AlertModel {
    pub title: String,
    pub message: String,
    pub button_text: String,
    pub action: AlertAction,
}

/// Converts quiz models into view models
#[derive(Debug, Clone)]
pub struct QuizPresenter {
    questions_amount: usize,
}

impl QuizPresenter {
    pub fn new(questions_amount: usize) -> Self {
        Self { questions_amount }
    }

    /// View model for the question at `index` (0-based)
    pub fn convert(&self, question: &Question, index: usize) -> QuizStepViewModel {
        QuizStepViewModel {
            image: question.image.clone(),
            question: question.text.clone(),
            question_number: format!("{}/{}", index + 1, self.questions_amount),
        }
    }

    /// Alert shown when a round is over
    pub fn round_results(&self, result: &RoundResult) -> AlertModel {
        AlertModel {
            title: "This round is over!".to_string(),
            message: result.summary(),
            button_text: "Play again".to_string(),
            action: AlertAction::RestartRound,
        }
    }

    /// Alert shown when movie data could not be loaded
    pub fn load_error(&self, error: &QuizError) -> AlertModel {
        AlertModel {
            title: "Error".to_string(),
            message: user_friendly_message(error),
            button_text: "Try again".to_string(),
            action: AlertAction::RetryLoad,
        }
    }
}
