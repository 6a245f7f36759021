//! Confirmation dialog component
//!
//! Asks a yes/no question before quitting or deleting a record.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Yes/no confirmation dialog
pub struct ConfirmDialog {
    title: String,
    question: String,
    /// Sent when the user answers yes
    confirm: Action,
    accent: Color,
}

impl ConfirmDialog {
    pub fn quit() -> Self {
        Self {
            title: "Quit?".to_string(),
            question: "Are you sure you want to quit?".to_string(),
            confirm: Action::ForceQuit,
            accent: Color::Yellow,
        }
    }

    /// Ask before deleting the record called `name`
    pub fn delete(record_label: &str, name: &str) -> Self {
        Self {
            title: format!("Delete {}?", record_label),
            question: format!("Are you sure you want to delete \"{}\"?", name),
            confirm: Action::ConfirmModal,
            accent: Color::Red,
        }
    }
}

impl Component for ConfirmDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(self.confirm.clone()),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::CloseModal),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let width = (self.question.chars().count() as u16 + 6).clamp(40, 70);
        let popup_area = centered_popup(area, width, 8);

        frame.render_widget(Clear, popup_area);

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.question.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    " y ",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Yes  "),
                Span::styled(
                    " n/Esc ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw("No, cancel"),
            ]),
        ];

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.accent))
                    .title(format!(" {} ", self.title))
                    .title_style(
                        Style::default()
                            .fg(self.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Center);

        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}
