use moviequiz::app::{App, Tui};
use moviequiz::config::QuizConfig;
use moviequiz::error::{is_fatal, user_friendly_message};
use moviequiz::quiz::{JsonMoviesLoader, StatisticServiceImpl};
use moviequiz::{QuizError, Result};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    pretty_env_logger::init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    log::info!("Using catalog {}", config.catalog_path.display());

    let statistics = match StatisticServiceImpl::new() {
        Ok(statistics) => statistics,
        Err(e) => {
            log::warn!("Statistics unavailable, playing without saving: {}", e);
            eprintln!("Warning: {}", user_friendly_message(&e));
            StatisticServiceImpl::in_memory()
        }
    };

    let loader = Arc::new(JsonMoviesLoader::new(config.catalog_path.clone()));
    let mut app = App::new(config, loader, Box::new(statistics));

    if let Err(e) = run(&mut app) {
        exit_with(&e);
    }
}

fn run(app: &mut App) -> Result<()> {
    let mut tui = Tui::new()?;
    tui.init()?;
    let outcome = app.run(&mut tui);
    tui.restore()?;
    outcome
}

/// Saved configuration; an optional first argument points at a different catalog
fn load_config() -> Result<QuizConfig> {
    let mut config = QuizConfig::load()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_catalog_path(PathBuf::from(path));
        config.validate()?;
    }
    Ok(config)
}

fn exit_with(error: &QuizError) -> ! {
    if is_fatal(error) {
        eprintln!("Application error: {}", error);
    } else {
        eprintln!("{}", user_friendly_message(error));
    }
    std::process::exit(1);
}
