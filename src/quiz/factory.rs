//! Question factory
//!
//! Loads the movie catalog and builds rounds of rating questions on
//! background tasks. Results are handed back as `QuizEvent`s over a single
//! channel whose receiver belongs to the presentation layer; the session is
//! only ever mutated by whoever drains that receiver.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::sync::{mpsc, Mutex};
use crate::config::QuizConfig;
use crate::models::{Movie, Question};
use crate::quiz::loader::MoviesLoader;
use crate::{QuizError, Result};

/// Capacity of the event channel
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Events emitted by the factory
#[derive(Debug)]
pub enum QuizEvent {
    /// Catalog loaded, rounds can be requested
    DataLoaded { generation: u64, movies: usize },
    /// A full round of questions is ready
    QuestionsReady { generation: u64, questions: Vec<Question> },
    /// Catalog or poster loading failed
    LoadFailed { generation: u64, error: QuizError },
}

impl QuizEvent {
    /// Request generation the event answers
    pub fn generation(&self) -> u64 {
        match self {
            QuizEvent::DataLoaded { generation, .. }
            | QuizEvent::QuestionsReady { generation, .. }
            | QuizEvent::LoadFailed { generation, .. } => *generation,
        }
    }
}

/// Builds quiz questions from a movie catalog
pub struct QuestionFactory {
    loader: Arc<dyn MoviesLoader>,
    movies: Arc<Mutex<Vec<Movie>>>,
    events_tx: mpsc::Sender<QuizEvent>,
    threshold_range: (u8, u8),
    seed: Option<u64>,
    generation: Arc<AtomicU64>,
}

impl QuestionFactory {
    /// Create a factory and the receiver its events are delivered to
    pub fn new(
        loader: Arc<dyn MoviesLoader>,
        config: &QuizConfig,
    ) -> (Self, mpsc::Receiver<QuizEvent>) {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let factory = Self {
            loader,
            movies: Arc::new(Mutex::new(Vec::new())),
            events_tx,
            threshold_range: (config.rating_threshold_min, config.rating_threshold_max),
            seed: None,
            generation: Arc::new(AtomicU64::new(0)),
        };
        (factory, events_rx)
    }

    /// Use a fixed random seed for reproducible rounds
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Whether the event answers the most recent request
    pub fn is_current(&self, event: &QuizEvent) -> bool {
        event.generation() == self.generation.load(Ordering::SeqCst)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Load the movie catalog in the background
    ///
    /// Emits `DataLoaded` or `LoadFailed`. Must be called inside a tokio runtime.
    pub fn load_data(&self) -> u64 {
        let generation = self.next_generation();
        let loader = Arc::clone(&self.loader);
        let movies = Arc::clone(&self.movies);
        let events_tx = self.events_tx.clone();

        tokio::spawn(async move {
            let loaded = tokio::task::spawn_blocking(move || loader.load_movies()).await;

            let event = match flatten_join(loaded) {
                Ok(catalog) => {
                    let count = catalog.items.len();
                    *movies.lock().await = catalog.items;
                    QuizEvent::DataLoaded { generation, movies: count }
                }
                Err(error) => {
                    log::warn!("Movie catalog failed to load: {}", error);
                    QuizEvent::LoadFailed { generation, error }
                }
            };
            send_event(&events_tx, event).await;
        });

        generation
    }

    /// Build a round of `count` questions in the background
    ///
    /// Emits `QuestionsReady` or `LoadFailed`. Must be called inside a tokio runtime.
    pub fn request_round(&self, count: usize) -> u64 {
        let generation = self.next_generation();
        let loader = Arc::clone(&self.loader);
        let movies = Arc::clone(&self.movies);
        let events_tx = self.events_tx.clone();
        let (min, max) = self.threshold_range;
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(generation)),
            None => SmallRng::from_entropy(),
        };

        tokio::spawn(async move {
            let movies = movies.lock().await.clone();
            let built = tokio::task::spawn_blocking(move || {
                build_round(loader.as_ref(), &movies, count, (min, max), &mut rng)
            })
            .await;

            let event = match flatten_join(built) {
                Ok(questions) => {
                    log::debug!("Round of {} questions ready", questions.len());
                    QuizEvent::QuestionsReady { generation, questions }
                }
                Err(error) => {
                    log::warn!("Round failed to build: {}", error);
                    QuizEvent::LoadFailed { generation, error }
                }
            };
            send_event(&events_tx, event).await;
        });

        generation
    }
}

/// Pick movies for a round and turn each into a rating question
///
/// Movies are distinct when the catalog has at least `count` of them.
pub fn build_round<R: Rng>(
    loader: &dyn MoviesLoader,
    movies: &[Movie],
    count: usize,
    (min, max): (u8, u8),
    rng: &mut R,
) -> Result<Vec<Question>> {
    if movies.is_empty() {
        return Err(QuizError::DataLoad("no movies loaded".to_string()));
    }

    let picked: Vec<&Movie> = if movies.len() >= count {
        movies.choose_multiple(rng, count).collect()
    } else {
        (0..count)
            .map(|_| &movies[rng.gen_range(0..movies.len())])
            .collect()
    };

    picked
        .into_iter()
        .map(|movie| {
            let image = loader.load_image(movie)?;
            let threshold = rng.gen_range(min..=max);
            Ok(Question::about_rating(movie, image, threshold))
        })
        .collect()
}

fn flatten_join<T>(joined: std::result::Result<Result<T>, tokio::task::JoinError>) -> Result<T> {
    match joined {
        Ok(result) => result,
        Err(join_error) => Err(QuizError::DataLoad(format!("loader task failed: {}", join_error))),
    }
}

async fn send_event(events_tx: &mpsc::Sender<QuizEvent>, event: QuizEvent) {
    if let Err(err) = events_tx.send(event).await {
        log::debug!("Quiz event dropped, receiver closed: {:?}", err.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieCatalog;
    use std::collections::HashSet;

    struct StaticLoader {
        movies: Vec<Movie>,
        broken_image: Option<String>,
    }

    impl StaticLoader {
        fn new(movies: Vec<Movie>) -> Self {
            Self { movies, broken_image: None }
        }
    }

    impl MoviesLoader for StaticLoader {
        fn load_movies(&self) -> Result<MovieCatalog> {
            if self.movies.is_empty() {
                return Err(QuizError::DataLoad("offline".to_string()));
            }
            Ok(MovieCatalog {
                items: self.movies.clone(),
                error_message: String::new(),
            })
        }

        fn load_image(&self, movie: &Movie) -> Result<Vec<u8>> {
            if self.broken_image.as_deref() == Some(movie.title.as_str()) {
                return Err(QuizError::DataLoad("poster missing".to_string()));
            }
            Ok(movie.title.as_bytes().to_vec())
        }
    }

    fn catalog(count: usize) -> Vec<Movie> {
        (0..count)
            .map(|i| Movie::new(format!("Movie {}", i), format!("{}.5", 5 + i % 5), format!("{}.jpg", i)))
            .collect()
    }

    #[test]
    fn test_build_round_distinct_movies() {
        let movies = catalog(20);
        let loader = StaticLoader::new(movies.clone());
        let mut rng = SmallRng::seed_from_u64(7);

        let questions = build_round(&loader, &movies, 10, (7, 9), &mut rng).unwrap();
        assert_eq!(questions.len(), 10);

        let posters: HashSet<Vec<u8>> = questions.iter().map(|q| q.image.clone()).collect();
        assert_eq!(posters.len(), 10);
    }

    #[test]
    fn test_build_round_answers_match_rating() {
        let movies = catalog(12);
        let loader = StaticLoader::new(movies.clone());
        let mut rng = SmallRng::seed_from_u64(42);

        for question in build_round(&loader, &movies, 10, (5, 9), &mut rng).unwrap() {
            let title = String::from_utf8(question.image.clone()).unwrap();
            let movie = movies.iter().find(|m| m.title == title).unwrap();
            let threshold: u8 = question
                .text
                .trim_start_matches("Is this movie rated higher than ")
                .trim_end_matches('?')
                .parse()
                .unwrap();
            assert!((5..=9).contains(&threshold));
            assert_eq!(question.correct_answer, movie.rating_value() > f32::from(threshold));
        }
    }

    #[test]
    fn test_build_round_small_catalog_repeats() {
        let movies = catalog(3);
        let loader = StaticLoader::new(movies.clone());
        let mut rng = SmallRng::seed_from_u64(1);

        let questions = build_round(&loader, &movies, 10, (7, 7), &mut rng).unwrap();
        assert_eq!(questions.len(), 10);
    }

    #[test]
    fn test_build_round_failures() {
        let loader = StaticLoader::new(Vec::new());
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(build_round(&loader, &[], 10, (7, 9), &mut rng).is_err());

        let movies = catalog(1);
        let loader = StaticLoader {
            movies: movies.clone(),
            broken_image: Some("Movie 0".to_string()),
        };
        assert!(matches!(
            build_round(&loader, &movies, 1, (7, 9), &mut rng),
            Err(QuizError::DataLoad(_))
        ));
    }

    #[tokio::test]
    async fn test_load_data_then_request_round() {
        let config = QuizConfig::new().with_questions_per_round(4);
        let (factory, mut events) =
            QuestionFactory::new(Arc::new(StaticLoader::new(catalog(8))), &config);
        let factory = factory.with_seed(3);

        factory.load_data();
        let event = events.recv().await.unwrap();
        assert!(factory.is_current(&event));
        match event {
            QuizEvent::DataLoaded { movies, .. } => assert_eq!(movies, 8),
            other => panic!("expected DataLoaded, got {:?}", other),
        }

        factory.request_round(config.questions_per_round);
        match events.recv().await.unwrap() {
            QuizEvent::QuestionsReady { questions, .. } => assert_eq!(questions.len(), 4),
            other => panic!("expected QuestionsReady, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_load_failure_event() {
        let (factory, mut events) =
            QuestionFactory::new(Arc::new(StaticLoader::new(Vec::new())), &QuizConfig::default());

        factory.load_data();
        match events.recv().await.unwrap() {
            QuizEvent::LoadFailed { error, .. } => assert!(matches!(error, QuizError::DataLoad(_))),
            other => panic!("expected LoadFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_superseded_events_are_not_current() {
        let (factory, mut events) =
            QuestionFactory::new(Arc::new(StaticLoader::new(catalog(5))), &QuizConfig::default());

        factory.load_data();
        let first = events.recv().await.unwrap();
        factory.load_data();
        let second = events.recv().await.unwrap();

        assert!(!factory.is_current(&first));
        assert!(factory.is_current(&second));
    }
}
