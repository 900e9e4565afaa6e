//! Alert screen implementation
//!
//! Modal dialog used for the round summary and for load errors, with a
//! single button whose action is carried by the `AlertModel`.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use crate::quiz::{AlertAction, AlertModel};

/// Alert screen component
#[derive(Debug, Default)]
pub struct AlertScreen {
    model: Option<AlertModel>,
}

impl AlertScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alert to display
    pub fn show(&mut self, model: AlertModel) {
        self.model = Some(model);
    }

    /// Get the current alert
    pub fn model(&self) -> Option<&AlertModel> {
        self.model.as_ref()
    }

    /// Dismiss the alert, returning the action of its button
    pub fn dismiss(&mut self) -> Option<AlertAction> {
        self.model.take().map(|model| model.action)
    }

    /// Render the alert centered over the whole screen
    pub fn render(&self, f: &mut Frame) {
        let Some(model) = &self.model else {
            return;
        };

        let message_lines = model.message.lines().count() as u16;
        let area = centered_rect(60, message_lines + 8, f.size());

        let border_color = match model.action {
            AlertAction::RestartRound => Color::Cyan,
            AlertAction::RetryLoad => Color::Red,
        };

        let block = Block::default()
            .title(model.title.as_str())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Message
                Constraint::Length(3), // Button
            ])
            .split(inner);

        let message: Vec<Line> = model.message.lines().map(Line::from).collect();
        let message = Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(message, chunks[0]);

        let button_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(24),
                Constraint::Min(0),
            ])
            .split(chunks[1])[1];

        let button = Paragraph::new(model.button_text.as_str())
            .style(Style::default().fg(Color::Black).bg(border_color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)));
        f.render_widget(button, button_area);
    }
}

/// Rectangle of `percent_x` width and `height` rows centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn summary_alert() -> AlertModel {
        AlertModel {
            title: "This round is over!".to_string(),
            message: "Your result: 5/10\nQuizzes played: 1".to_string(),
            button_text: "Play again".to_string(),
            action: AlertAction::RestartRound,
        }
    }

    #[test]
    fn test_alert_screen_creation() {
        let screen = AlertScreen::new();
        assert!(screen.model().is_none());
    }

    #[test]
    fn test_dismiss_returns_action() {
        let mut screen = AlertScreen::new();
        screen.show(summary_alert());
        assert_eq!(screen.model().unwrap().button_text, "Play again");

        assert_eq!(screen.dismiss(), Some(AlertAction::RestartRound));
        assert!(screen.model().is_none());
        assert_eq!(screen.dismiss(), None);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 10, area);
        assert_eq!(rect, Rect::new(20, 15, 60, 10));

        let small = centered_rect(60, 50, Rect::new(0, 0, 10, 5));
        assert_eq!(small.height, 5);
    }

    #[test]
    fn test_render_alert() {
        let mut screen = AlertScreen::new();
        screen.show(summary_alert());

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| screen.render(f)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(text.contains("This round is over!"));
        assert!(text.contains("Your result: 5/10"));
        assert!(text.contains("Play again"));
    }
}
