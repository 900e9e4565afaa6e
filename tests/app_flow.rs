use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use moviequiz::app::{App, AppState};
use moviequiz::config::persistence::StatisticsStorage;
use moviequiz::config::QuizConfig;
use moviequiz::models::Question;
use moviequiz::quiz::{
    AlertAction, JsonMoviesLoader, QuestionFactory, QuizEvent, StatisticService,
    StatisticServiceImpl,
};
use moviequiz::QuizError;
use ratatui::{backend::TestBackend, Terminal};
use tempfile::TempDir;
use tokio::sync::mpsc;

const CATALOG: &str = r#"{
    "items": [
        {"title": "Heat", "rating": "8.3", "image": "heat.jpg"},
        {"title": "Alien", "rating": "8.5", "image": "alien.jpg"},
        {"title": "Cats", "rating": "2.8", "image": "cats.jpg"},
        {"title": "Drive", "rating": "7.8", "image": "drive.jpg"}
    ]
}"#;

fn write_catalog(dir: &Path) -> PathBuf {
    for poster in ["heat.jpg", "alien.jpg", "cats.jpg", "drive.jpg"] {
        fs::write(dir.join(poster), [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    }
    let path = dir.join("movies.json");
    fs::write(&path, CATALOG).unwrap();
    path
}

fn app_for(catalog_path: PathBuf) -> App {
    let config = QuizConfig::default()
        .with_catalog_path(catalog_path.clone())
        .with_questions_per_round(3)
        .with_answer_delay(Duration::ZERO);
    App::new(
        config,
        Arc::new(JsonMoviesLoader::new(catalog_path)),
        Box::new(StatisticServiceImpl::in_memory()),
    )
}

/// App whose events come from the returned sender instead of the factory
fn app_with_events(
    config: QuizConfig,
    statistics: Box<dyn StatisticService>,
) -> (App, mpsc::Sender<QuizEvent>) {
    let loader = Arc::new(JsonMoviesLoader::new(config.catalog_path.clone()));
    let (factory, _factory_rx) = QuestionFactory::new(loader, &config);
    let (events_tx, events_rx) = mpsc::channel(16);
    (App::with_factory(config, factory, events_rx, statistics), events_tx)
}

fn round_config(questions: usize, answer_delay: Duration) -> QuizConfig {
    QuizConfig::default()
        .with_catalog_path(PathBuf::from("unused.json"))
        .with_questions_per_round(questions)
        .with_answer_delay(answer_delay)
}

fn questions(count: usize) -> Vec<Question> {
    (0..count)
        .map(|_| Question::new(vec![0xFF, 0xD8, 0xFF], "Is this movie rated higher than 7?", true))
        .collect()
}

/// Deliver the catalog (request 1) and a round (request 2) to a started app
async fn deliver_round(app: &mut App, events_tx: &mpsc::Sender<QuizEvent>, count: usize) {
    app.start();
    events_tx.send(QuizEvent::DataLoaded { generation: 1, movies: 4 }).await.unwrap();
    app.tick().unwrap();
    events_tx
        .send(QuizEvent::QuestionsReady { generation: 2, questions: questions(count) })
        .await
        .unwrap();
    app.tick().unwrap();
    assert_eq!(app.state(), AppState::Question);
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn rendered_text(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

async fn pump_until(app: &mut App, state: AppState) {
    for _ in 0..500 {
        app.tick().unwrap();
        if app.state() == state {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("app never reached {:?}, stuck in {:?}", state, app.state());
}

#[tokio::test]
async fn test_full_round_then_play_again() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = app_for(write_catalog(temp_dir.path()));

    app.start();
    assert_eq!(app.state(), AppState::Loading);
    pump_until(&mut app, AppState::Question).await;
    assert!(rendered_text(&app, 80, 24).contains("1/3"));
    assert!(rendered_text(&app, 30, 10).contains("Terminal too small"));

    for _ in 0..3 {
        let expected = app.session().current_question().unwrap().correct_answer;
        app.handle_key(key(if expected { KeyCode::Char('y') } else { KeyCode::Char('n') }))
            .unwrap();
        assert_eq!(app.state(), AppState::AnswerResult);

        // Answers are ignored while the result is shown
        app.handle_key(key(KeyCode::Char('y'))).unwrap();
        app.tick().unwrap();
    }

    assert_eq!(app.state(), AppState::Alert);
    let alert = app.alert().unwrap();
    assert_eq!(alert.title, "This round is over!");
    assert_eq!(alert.action, AlertAction::RestartRound);
    assert!(alert.message.contains("Your result: 3/3"));
    assert_eq!(app.statistics().games_count(), 1);
    assert!(rendered_text(&app, 80, 30).contains("Play again"));

    app.handle_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(app.state(), AppState::Loading);
    pump_until(&mut app, AppState::Question).await;

    assert_eq!(app.session().current_index(), 0);
    assert_eq!(app.session().correct_count(), 0);
    assert_eq!(app.session().total_count(), 3);
}

#[tokio::test]
async fn test_load_error_then_retry() {
    let temp_dir = TempDir::new().unwrap();
    let catalog_path = temp_dir.path().join("movies.json");
    let mut app = app_for(catalog_path);

    app.start();
    pump_until(&mut app, AppState::Alert).await;

    let alert = app.alert().unwrap();
    assert_eq!(alert.title, "Error");
    assert_eq!(alert.button_text, "Try again");
    assert_eq!(alert.action, AlertAction::RetryLoad);

    write_catalog(temp_dir.path());
    app.handle_key(key(KeyCode::Char(' '))).unwrap();
    pump_until(&mut app, AppState::Question).await;
    assert!(app.session().has_questions());
}

#[tokio::test]
async fn test_quit_from_any_state() {
    let temp_dir = TempDir::new().unwrap();
    let mut app = app_for(write_catalog(temp_dir.path()));

    app.start();
    assert!(!app.should_quit());
    app.handle_key(key(KeyCode::Esc)).unwrap();
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_answer_result_stays_for_the_delay() {
    let (mut app, events_tx) = app_with_events(
        round_config(2, Duration::from_millis(300)),
        Box::new(StatisticServiceImpl::in_memory()),
    );
    deliver_round(&mut app, &events_tx, 2).await;

    app.handle_key(key(KeyCode::Char('y'))).unwrap();
    app.tick().unwrap();
    assert_eq!(app.state(), AppState::AnswerResult);
    assert_eq!(app.session().current_index(), 0);

    tokio::time::sleep(Duration::from_millis(350)).await;
    app.tick().unwrap();
    assert_eq!(app.state(), AppState::Question);
    assert_eq!(app.session().current_index(), 1);

    app.handle_key(key(KeyCode::Char('y'))).unwrap();
    app.tick().unwrap();
    assert_eq!(app.state(), AppState::AnswerResult);

    tokio::time::sleep(Duration::from_millis(350)).await;
    app.tick().unwrap();
    assert_eq!(app.state(), AppState::Alert);
    assert!(app.alert().unwrap().message.contains("Your result: 2/2"));
}

#[tokio::test]
async fn test_failed_statistics_save_is_shown_in_summary() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("statistics.json");
    let statistics = StatisticServiceImpl::with_storage(StatisticsStorage::at_path(&path)).unwrap();
    // A directory in place of the file makes every save fail
    fs::create_dir(&path).unwrap();

    let (mut app, events_tx) = app_with_events(round_config(1, Duration::ZERO), Box::new(statistics));
    deliver_round(&mut app, &events_tx, 1).await;

    app.handle_key(key(KeyCode::Char('y'))).unwrap();
    app.tick().unwrap();

    assert_eq!(app.state(), AppState::Alert);
    let alert = app.alert().unwrap();
    assert!(alert.message.contains("Your result: 1/1"));
    assert!(alert.message.contains("Failed to save statistics"));
    assert_eq!(app.statistics().games_count(), 1);
}

#[tokio::test]
async fn test_superseded_events_are_ignored() {
    let (mut app, events_tx) = app_with_events(
        round_config(3, Duration::ZERO),
        Box::new(StatisticServiceImpl::in_memory()),
    );
    app.start();

    events_tx
        .send(QuizEvent::LoadFailed { generation: 0, error: QuizError::DataLoad("old".into()) })
        .await
        .unwrap();
    app.tick().unwrap();
    assert_eq!(app.state(), AppState::Loading);
    assert!(app.alert().is_none());

    events_tx.send(QuizEvent::DataLoaded { generation: 1, movies: 4 }).await.unwrap();
    app.tick().unwrap();

    // The catalog answer started request 2, so a round for request 1 is stale
    events_tx
        .send(QuizEvent::QuestionsReady { generation: 1, questions: questions(5) })
        .await
        .unwrap();
    app.tick().unwrap();
    assert_eq!(app.state(), AppState::Loading);
    assert!(!app.session().has_questions());

    events_tx
        .send(QuizEvent::QuestionsReady { generation: 2, questions: questions(3) })
        .await
        .unwrap();
    app.tick().unwrap();
    assert_eq!(app.state(), AppState::Question);
    assert_eq!(app.session().total_count(), 3);
}
