//! Loading screen implementation
//!
//! Activity indicator shown while the catalog or a round is loading.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SPINNER: &[char] = &['|', '/', '-', '\\'];

/// Loading screen component
#[derive(Debug)]
pub struct LoadingScreen {
    message: String,
    frame: usize,
}

impl LoadingScreen {
    pub fn new() -> Self {
        Self {
            message: "Loading movies...".to_string(),
            frame: 0,
        }
    }

    /// Change the text shown next to the indicator
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = message.into();
    }

    /// Advance the indicator animation by one frame
    pub fn tick(&mut self) {
        self.frame = (self.frame + 1) % SPINNER.len();
    }

    /// Render the loading screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();
        let area = Rect {
            y: size.y + size.height.saturating_sub(5) / 2,
            height: size.height.min(5),
            ..size
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    format!("{} ", SPINNER[self.frame]),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(self.message.as_str()),
            ]),
        ];

        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default()
                .title("MovieQuiz")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)));

        f.render_widget(paragraph, area);
    }
}

impl Default for LoadingScreen {
    fn default() -> Self {
        Self::new()
    }
}
