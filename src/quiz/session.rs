//! Quiz session state tracking
//!
//! A session owns the questions of one round and tracks the current
//! position and the running number of correct answers.

use crate::models::{Question, RoundResult};
use crate::quiz::statistics::StatisticService;
use crate::{QuizError, Result};

/// Phase of the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Current question is shown and no answer was given yet
    AwaitingAnswer,
    /// Current question was answered, its result is shown
    ShowingResult,
    /// Advanced past the last question
    Complete,
}

/// Progress through one round of questions
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current_index: usize,
    correct_count: u32,
    state: SessionState,
}

impl QuizSession {
    /// Start a round over the given questions
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            current_index: 0,
            correct_count: 0,
            state: SessionState::AwaitingAnswer,
        }
    }

    /// Replace the questions and start over
    pub fn load_questions(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.reset();
    }

    /// Question at the current position
    pub fn current_question(&self) -> Result<&Question> {
        self.questions.get(self.current_index).ok_or(QuizError::OutOfRange {
            index: self.current_index,
            len: self.questions.len(),
        })
    }

    /// Record the user's answer to the current question
    ///
    /// Returns whether the answer was correct. Does not move to the next
    /// question; a repeated answer to the same question is not counted again.
    pub fn record_answer(&mut self, user_choice: bool) -> Result<bool> {
        let is_correct = self.current_question()?.correct_answer == user_choice;

        if self.state == SessionState::AwaitingAnswer {
            if is_correct {
                self.correct_count += 1;
            }
            self.state = SessionState::ShowingResult;
        }

        Ok(is_correct)
    }

    /// Move to the next question, returns whether one remains
    pub fn advance(&mut self) -> bool {
        if self.current_index < self.questions.len() {
            self.current_index += 1;
        }

        let has_next = self.current_index < self.questions.len();
        self.state = if has_next {
            SessionState::AwaitingAnswer
        } else {
            SessionState::Complete
        };
        has_next
    }

    /// True while positioned on the last question of the round
    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.current_index == self.questions.len() - 1
    }

    /// Go back to the first question with no correct answers
    pub fn reset(&mut self) {
        self.current_index = 0;
        self.correct_count = 0;
        self.state = SessionState::AwaitingAnswer;
    }

    /// Summary of the finished round against the historical statistics
    pub fn round_result(&self, statistics: &dyn StatisticService) -> RoundResult {
        let best_game = statistics.best_game();
        RoundResult {
            correct_count: self.correct_count,
            total_count: self.total_count(),
            games_played: statistics.games_count(),
            best_score: best_game.as_ref().map(|game| (game.correct, game.total)),
            best_score_date: best_game.as_ref().map(|game| game.date),
            average_accuracy_percent: statistics.total_accuracy().round() as u32,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    pub fn total_count(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn has_questions(&self) -> bool {
        !self.questions.is_empty()
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
