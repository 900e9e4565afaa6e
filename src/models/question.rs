//! Movie and question data models
//!
//! A `MovieCatalog` is what a movies loader delivers; a `Question` is what a
//! round is made of.

use serde::{Deserialize, Serialize};

/// One movie entry of the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Movie title
    pub title: String,
    /// Rating as delivered by the catalog, e.g. "8.6"
    #[serde(default)]
    pub rating: String,
    /// Poster location, relative to the catalog file
    pub image: String,
}

/// Movie catalog as stored in the JSON catalog file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieCatalog {
    /// Catalog entries
    #[serde(default)]
    pub items: Vec<Movie>,
    /// Non-empty when the catalog source reported a failure
    #[serde(default)]
    pub error_message: String,
}

impl Movie {
    /// Create a new movie entry
    pub fn new(title: impl Into<String>, rating: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rating: rating.into(),
            image: image.into(),
        }
    }

    /// Numeric rating; an unparsable rating counts as 0
    pub fn rating_value(&self) -> f32 {
        self.rating.trim().parse::<f32>().unwrap_or(0.0)
    }
}

impl MovieCatalog {
    /// Check whether the catalog source reported an error
    pub fn has_error(&self) -> bool {
        !self.error_message.trim().is_empty()
    }
}

/// A single yes/no quiz question
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    /// Poster image bytes
    pub image: Vec<u8>,
    /// Prompt shown under the poster
    pub text: String,
    /// Whether "yes" is the right answer
    pub correct_answer: bool,
}

impl Question {
    /// Create a new question
    pub fn new(image: Vec<u8>, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image,
            text: text.into(),
            correct_answer,
        }
    }

    /// Build the rating question for a movie and a threshold
    pub fn about_rating(movie: &Movie, image: Vec<u8>, threshold: u8) -> Self {
        let rating = movie.rating_value();
        Self {
            image,
            text: format!("Is this movie rated higher than {}?", threshold),
            correct_answer: rating > f32::from(threshold),
        }
    }
}
