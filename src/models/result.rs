//! Game record and round result data models
//!
//! Contains the persisted historical statistics and the read-only summary
//! computed when a round completes.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Correct answers in the round
    pub correct: u32,
    /// Questions asked in the round
    pub total: u32,
    /// When the round was finished
    pub date: DateTime<Utc>,
}

/// Historical statistics accumulated across rounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Number of finished rounds
    pub games_count: u32,
    /// Round with the most correct answers so far
    pub best_game: Option<GameRecord>,
    /// Correct answers over all rounds
    pub correct_total: u64,
    /// Questions asked over all rounds
    pub questions_total: u64,
}

/// Summary shown at the end of a round
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResult {
    pub correct_count: u32,
    pub total_count: u32,
    pub games_played: u32,
    pub best_score: Option<(u32, u32)>,
    pub best_score_date: Option<DateTime<Utc>>,
    pub average_accuracy_percent: u32,
}

impl GameRecord {
    /// Create a record for a round finished now
    pub fn new(correct: u32, total: u32) -> Self {
        Self::with_date(correct, total, Utc::now())
    }

    /// Create a record with an explicit finish date
    pub fn with_date(correct: u32, total: u32, date: DateTime<Utc>) -> Self {
        Self { correct, total, date }
    }

    /// A record beats another when it has more correct answers
    pub fn is_better_than(&self, other: &GameRecord) -> bool {
        self.correct > other.correct
    }

    /// Finish date in local time, e.g. "19.10.26 14:05"
    pub fn date_string(&self) -> String {
        self.date.with_timezone(&Local).format("%d.%m.%y %H:%M").to_string()
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.correct, self.total, self.date_string())
    }
}

impl GameStatistics {
    /// Fold a finished round into the statistics
    pub fn record(&mut self, game: GameRecord) {
        self.games_count += 1;
        self.correct_total += u64::from(game.correct);
        self.questions_total += u64::from(game.total);

        let is_best = match &self.best_game {
            Some(best) => game.is_better_than(best),
            None => true,
        };
        if is_best {
            self.best_game = Some(game);
        }
    }

    /// Average accuracy over all rounds in percent (0.0 to 100.0)
    pub fn total_accuracy(&self) -> f64 {
        if self.questions_total == 0 {
            0.0
        } else {
            self.correct_total as f64 / self.questions_total as f64 * 100.0
        }
    }
}

impl RoundResult {
    /// Human-readable multi-line summary of the round
    pub fn summary(&self) -> String {
        let record = match (self.best_score, self.best_score_date) {
            (Some((correct, total)), Some(date)) => {
                GameRecord::with_date(correct, total, date).to_string()
            }
            _ => "-".to_string(),
        };

        format!(
            "Your result: {}/{}\nQuizzes played: {}\nRecord: {}\nAverage accuracy: {}%",
            self.correct_count,
            self.total_count,
            self.games_played,
            record,
            self.average_accuracy_percent
        )
    }
}
