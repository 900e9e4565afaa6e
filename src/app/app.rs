//! Main application controller
//!
//! Owns the quiz session and the screens, drains factory events and
//! keyboard input on one thread, and runs the render loop.

use std::sync::Arc;
use std::time::Instant;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::Alignment,
    widgets::{Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc;
use crate::{
    app::{
        screens::{AlertScreen, LoadingScreen, QuestionScreen},
        state::{AppState, NavigationAction, StateManager},
        tui::{self, Tui},
    },
    config::QuizConfig,
    error::user_friendly_message,
    quiz::{
        AlertAction, AlertModel, MoviesLoader, QuestionFactory, QuizEvent, QuizPresenter,
        QuizSession, StatisticService,
    },
    QuizError, Result,
};

/// TUI application controller
pub struct App {
    config: QuizConfig,
    state_manager: StateManager,
    session: QuizSession,
    factory: QuestionFactory,
    events_rx: mpsc::Receiver<QuizEvent>,
    statistics: Box<dyn StatisticService>,
    presenter: QuizPresenter,
    loading_screen: LoadingScreen,
    question_screen: QuestionScreen,
    alert_screen: AlertScreen,
    /// When the shown answer result gives way to the next question
    advance_at: Option<Instant>,
}

impl App {
    /// Create a new application instance
    pub fn new(
        config: QuizConfig,
        loader: Arc<dyn MoviesLoader>,
        statistics: Box<dyn StatisticService>,
    ) -> Self {
        let (factory, events_rx) = QuestionFactory::new(loader, &config);
        Self::with_factory(config, factory, events_rx, statistics)
    }

    /// Create an application around an existing factory and its receiver
    pub fn with_factory(
        config: QuizConfig,
        factory: QuestionFactory,
        events_rx: mpsc::Receiver<QuizEvent>,
        statistics: Box<dyn StatisticService>,
    ) -> Self {
        Self {
            presenter: QuizPresenter::new(config.questions_per_round),
            config,
            state_manager: StateManager::new(),
            session: QuizSession::default(),
            factory,
            events_rx,
            statistics,
            loading_screen: LoadingScreen::new(),
            question_screen: QuestionScreen::new(),
            alert_screen: AlertScreen::new(),
            advance_at: None,
        }
    }

    /// Start loading movie data. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        self.load_data();
    }

    /// Run the main application loop until the user quits
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        self.start();

        while !self.state_manager.should_quit() {
            self.tick()?;
            tui.draw(|f| self.render(f))?;

            match tui.next_key()? {
                Some(key) => self.handle_key(key)?,
                None => self.loading_screen.tick(),
            }
        }

        log::info!("Quitting after {} games", self.statistics.games_count());
        Ok(())
    }

    /// Apply pending factory events and an expired answer delay
    pub fn tick(&mut self) -> Result<()> {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_quiz_event(event)?;
        }

        if let Some(advance_at) = self.advance_at {
            if Instant::now() >= advance_at {
                self.advance_at = None;
                self.show_next_question_or_results()?;
            }
        }

        Ok(())
    }

    /// Draw the current screen
    pub fn render(&self, f: &mut Frame) {
        if !tui::fits(f.size()) {
            let hint = Paragraph::new(format!(
                "Terminal too small, need {}x{}",
                tui::MIN_WIDTH,
                tui::MIN_HEIGHT
            ))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            f.render_widget(hint, f.size());
            return;
        }

        match self.state_manager.current_state() {
            AppState::Loading => self.loading_screen.render(f),
            AppState::Question | AppState::AnswerResult => self.question_screen.render(f),
            AppState::Alert => {
                if self.question_screen.step().is_some() {
                    self.question_screen.render(f);
                }
                self.alert_screen.render(f);
            }
        }
    }

    /// Handle a key press according to the current screen
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = StateManager::key_to_navigation(key);

        match (self.state_manager.current_state(), action) {
            (_, NavigationAction::Quit) => self.state_manager.quit(),
            (AppState::Question, NavigationAction::Yes) => self.answer(true)?,
            (AppState::Question, NavigationAction::No) => self.answer(false)?,
            (AppState::Alert, NavigationAction::Select) => self.dismiss_alert(),
            _ => {}
        }

        Ok(())
    }

    fn handle_quiz_event(&mut self, event: QuizEvent) -> Result<()> {
        if !self.factory.is_current(&event) {
            log::debug!("Ignoring superseded event for request {}", event.generation());
            return Ok(());
        }

        match event {
            QuizEvent::DataLoaded { movies, .. } => {
                log::info!("{} movies available", movies);
                self.request_round();
            }
            QuizEvent::QuestionsReady { questions, .. } => {
                self.session.load_questions(questions);
                self.show_current_question()?;
            }
            QuizEvent::LoadFailed { error, .. } => self.show_load_error(&error),
        }

        Ok(())
    }

    fn answer(&mut self, user_choice: bool) -> Result<()> {
        let is_correct = self.session.record_answer(user_choice)?;
        log::debug!(
            "Answer {} to question {} was {}",
            if user_choice { "yes" } else { "no" },
            self.session.current_index() + 1,
            if is_correct { "correct" } else { "wrong" }
        );

        self.question_screen.show_answer_result(is_correct);
        self.state_manager.transition_to(AppState::AnswerResult);
        self.advance_at = Some(Instant::now() + self.config.answer_delay);
        Ok(())
    }

    fn show_current_question(&mut self) -> Result<()> {
        let question = self.session.current_question()?;
        let step = self.presenter.convert(question, self.session.current_index());
        self.question_screen.show(step);
        self.state_manager.transition_to(AppState::Question);
        Ok(())
    }

    fn show_next_question_or_results(&mut self) -> Result<()> {
        if !self.session.is_complete() {
            self.session.advance();
            return self.show_current_question();
        }

        let stored = self
            .statistics
            .store(self.session.correct_count(), self.session.total_count());
        let result = self.session.round_result(self.statistics.as_ref());
        let mut alert = self.presenter.round_results(&result);
        if let Err(err) = stored {
            log::error!("Statistics were not saved: {}", err);
            alert.message.push_str("\n\n");
            alert.message.push_str(&user_friendly_message(&err));
        }

        self.session.advance();
        self.show_alert(alert);
        Ok(())
    }

    fn show_load_error(&mut self, error: &QuizError) {
        log::warn!("Showing load error: {}", error);
        let alert = self.presenter.load_error(error);
        self.show_alert(alert);
    }

    fn show_alert(&mut self, alert: AlertModel) {
        self.alert_screen.show(alert);
        self.state_manager.transition_to(AppState::Alert);
    }

    fn dismiss_alert(&mut self) {
        match self.alert_screen.dismiss() {
            Some(AlertAction::RestartRound) => self.restart_round(),
            Some(AlertAction::RetryLoad) => self.load_data(),
            None => {}
        }
    }

    /// Single path for starting over: reset the session, then fetch a new round
    fn restart_round(&mut self) {
        self.session.reset();
        self.advance_at = None;
        self.request_round();
    }

    fn request_round(&mut self) {
        self.loading_screen.set_message("Preparing round...");
        self.state_manager.transition_to(AppState::Loading);
        self.factory.request_round(self.config.questions_per_round);
    }

    fn load_data(&mut self) {
        self.session.reset();
        self.advance_at = None;
        self.loading_screen.set_message("Loading movies...");
        self.state_manager.transition_to(AppState::Loading);
        self.factory.load_data();
    }

    pub fn state(&self) -> AppState {
        self.state_manager.current_state()
    }

    pub fn should_quit(&self) -> bool {
        self.state_manager.should_quit()
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn alert(&self) -> Option<&AlertModel> {
        self.alert_screen.model()
    }

    pub fn statistics(&self) -> &dyn StatisticService {
        self.statistics.as_ref()
    }
}
