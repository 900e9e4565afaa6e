//! Question screen implementation
//!
//! Shows the poster placeholder, the question counter and the yes/no
//! prompt. After an answer the poster frame turns green or red.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};
use crate::quiz::QuizStepViewModel;
use crate::util::format::describe_poster;

/// Question screen component
#[derive(Debug, Default)]
pub struct QuestionScreen {
    step: Option<QuizStepViewModel>,
    answer_result: Option<bool>,
}

impl QuestionScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a new question with a neutral poster frame
    pub fn show(&mut self, step: QuizStepViewModel) {
        self.step = Some(step);
        self.answer_result = None;
    }

    /// Highlight the poster frame with the answer result
    pub fn show_answer_result(&mut self, is_correct: bool) {
        self.answer_result = Some(is_correct);
    }

    pub fn step(&self) -> Option<&QuizStepViewModel> {
        self.step.as_ref()
    }

    pub fn answer_result(&self) -> Option<bool> {
        self.answer_result
    }

    /// Render the question screen
    pub fn render(&self, f: &mut Frame) {
        let size = f.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title and counter
                Constraint::Min(8),    // Poster
                Constraint::Length(4), // Question text
                Constraint::Length(3), // Answer buttons
                Constraint::Length(3), // Help text
            ])
            .split(size);

        self.render_header(f, chunks[0]);
        self.render_poster(f, chunks[1]);
        self.render_question(f, chunks[2]);
        self.render_buttons(f, chunks[3]);
        self.render_help(f, chunks[4]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let counter = self
            .step
            .as_ref()
            .map(|step| step.question_number.as_str())
            .unwrap_or("-");

        let header = Paragraph::new(Line::from(vec![
            Span::styled("Question: ", Style::default().fg(Color::White)),
            Span::styled(counter, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)));

        f.render_widget(header, area);
    }

    fn render_poster(&self, f: &mut Frame, area: Rect) {
        let (border_style, border_type) = match self.answer_result {
            Some(true) => (Style::default().fg(Color::Green), BorderType::Thick),
            Some(false) => (Style::default().fg(Color::Red), BorderType::Thick),
            None => (Style::default().fg(Color::DarkGray), BorderType::Rounded),
        };

        let description = self
            .step
            .as_ref()
            .map(|step| describe_poster(&step.image))
            .unwrap_or_default();

        let poster = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(description, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
        .block(Block::default()
            .title("Poster")
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style));

        f.render_widget(poster, area);
    }

    fn render_question(&self, f: &mut Frame, area: Rect) {
        let text = self
            .step
            .as_ref()
            .map(|step| step.question.clone())
            .unwrap_or_default();

        let question = Paragraph::new(text)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(question, area);
    }

    fn render_buttons(&self, f: &mut Frame, area: Rect) {
        let button_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        // Answers are locked while the result is shown
        let style = if self.answer_result.is_some() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };

        let no_button = Paragraph::new("← No")
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        let yes_button = Paragraph::new("Yes →")
            .style(style)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));

        f.render_widget(no_button, button_chunks[0]);
        f.render_widget(yes_button, button_chunks[1]);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let key_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let help_text = vec![Line::from(vec![
            Span::styled("←/N", key_style),
            Span::raw(" No  "),
            Span::styled("→/Y", key_style),
            Span::raw(" Yes  "),
            Span::styled("Q", key_style),
            Span::raw(" Quit"),
        ])];

        let help = Paragraph::new(help_text)
            .alignment(Alignment::Center)
            .block(Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)));

        f.render_widget(help, area);
    }
}
