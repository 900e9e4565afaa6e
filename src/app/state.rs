//! Application state management
//!
//! Handles screen transitions and keyboard event mapping for the TUI
//! application.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Application screens/states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Movie data or a round is being loaded
    #[default]
    Loading,
    /// A question is shown, waiting for yes/no
    Question,
    /// The answer result is shown until the next question
    AnswerResult,
    /// Modal alert (round summary or load error)
    Alert,
}

/// Navigation actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationAction {
    /// Answer "yes" (arrow right, y)
    Yes,
    /// Answer "no" (arrow left, n)
    No,
    /// Confirm the alert button (Enter, Space)
    Select,
    /// Quit application (q, Q, Esc, Ctrl+C)
    Quit,
    /// No action
    None,
}

/// Application state manager
#[derive(Debug, Default)]
pub struct StateManager {
    current_state: AppState,
    previous_state: Option<AppState>,
    should_quit: bool,
}

impl StateManager {
    /// Create a new state manager starting at the loading screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current application state
    pub fn current_state(&self) -> AppState {
        self.current_state
    }

    /// Get the previous state if available
    pub fn previous_state(&self) -> Option<AppState> {
        self.previous_state
    }

    /// Check if the application should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Set the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: AppState) {
        if new_state != self.current_state {
            log::trace!("State {:?} -> {:?}", self.current_state, new_state);
            self.previous_state = Some(self.current_state);
            self.current_state = new_state;
        }
    }

    /// Convert keyboard event to navigation action
    pub fn key_to_navigation(key: KeyEvent) -> NavigationAction {
        // Windows reports releases as well
        if key.kind == KeyEventKind::Release {
            return NavigationAction::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => NavigationAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                NavigationAction::Quit
            }

            KeyCode::Right | KeyCode::Char('y') | KeyCode::Char('Y') => NavigationAction::Yes,
            KeyCode::Left | KeyCode::Char('n') | KeyCode::Char('N') => NavigationAction::No,

            KeyCode::Enter | KeyCode::Char(' ') => NavigationAction::Select,

            _ => NavigationAction::None,
        }
    }
}
