//! Movie catalog loading
//!
//! `MoviesLoader` is the seam between the quiz and wherever movie data
//! comes from. `JsonMoviesLoader` reads a local catalog file whose poster
//! paths are relative to the catalog's directory.

use std::fs;
use std::path::{Path, PathBuf};
use crate::models::{Movie, MovieCatalog};
use crate::{QuizError, Result};

/// Source of movie data. Called from blocking tasks.
pub trait MoviesLoader: Send + Sync {
    /// Load the movie catalog
    fn load_movies(&self) -> Result<MovieCatalog>;

    /// Load the poster bytes of one movie
    fn load_image(&self, movie: &Movie) -> Result<Vec<u8>>;
}

/// Loader for a JSON catalog file on disk
#[derive(Debug, Clone)]
pub struct JsonMoviesLoader {
    catalog_path: PathBuf,
}

impl JsonMoviesLoader {
    /// Create a loader for the given catalog file
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
        }
    }

    fn image_path(&self, movie: &Movie) -> PathBuf {
        let image = Path::new(&movie.image);
        if image.is_absolute() {
            return image.to_path_buf();
        }
        match self.catalog_path.parent() {
            Some(dir) => dir.join(image),
            None => image.to_path_buf(),
        }
    }
}

impl MoviesLoader for JsonMoviesLoader {
    fn load_movies(&self) -> Result<MovieCatalog> {
        let content = fs::read_to_string(&self.catalog_path).map_err(|e| {
            QuizError::DataLoad(format!(
                "cannot read catalog {}: {}",
                self.catalog_path.display(),
                e
            ))
        })?;

        let catalog: MovieCatalog = serde_json::from_str(&content).map_err(|e| {
            QuizError::DataLoad(format!(
                "invalid catalog {}: {}",
                self.catalog_path.display(),
                e
            ))
        })?;

        if catalog.has_error() {
            return Err(QuizError::DataLoad(catalog.error_message));
        }

        if catalog.items.is_empty() {
            return Err(QuizError::DataLoad(format!(
                "catalog {} contains no movies",
                self.catalog_path.display()
            )));
        }

        log::info!(
            "Loaded {} movies from {}",
            catalog.items.len(),
            self.catalog_path.display()
        );
        Ok(catalog)
    }

    fn load_image(&self, movie: &Movie) -> Result<Vec<u8>> {
        let path = self.image_path(movie);
        fs::read(&path).map_err(|e| {
            QuizError::DataLoad(format!(
                "cannot load poster for \"{}\" from {}: {}",
                movie.title,
                path.display(),
                e
            ))
        })
    }
}
