//! Record detail overlay
//!
//! Field-by-field view of the record opened from a grid row.

use crate::action::Action;
use crate::component::Component;
use crate::format::format_date;
use crate::grid::CellValue;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use serde::Serialize;
use serde_json::Value;

const LABEL_WIDTH: usize = 22;

/// Record detail overlay component
#[derive(Default)]
pub struct RecordDetail {
    title: String,
    content: Vec<Line<'static>>,
    scroll_offset: u16,
}

impl RecordDetail {
    /// Show `record`, titled with its page label and name
    pub fn set_record<R: Serialize>(&mut self, title: impl Into<String>, record: &R) -> Result<()> {
        let value = serde_json::to_value(record).context("Failed to serialize record")?;
        self.title = title.into();
        self.content = render_fields(&value);
        self.scroll_offset = 0;
        Ok(())
    }
}

impl Component for RecordDetail {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => {
                let max = self.content.len().saturating_sub(1) as u16;
                self.scroll_offset = self.scroll_offset.saturating_add(1).min(max);
            }
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let margin = 2;
        let overlay_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );
        frame.render_widget(Clear, overlay_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(overlay_area);

        let paragraph = Paragraph::new(self.content.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(format!(" {} ", self.title))
                    .title_style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
            )
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset, 0));
        frame.render_widget(paragraph, chunks[0]);

        let help = Paragraph::new(Line::from(vec![
            Span::styled(
                " j/k ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Scroll  "),
            Span::styled(
                " Esc ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("Close"),
        ]))
        .alignment(Alignment::Left)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[1]);

        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Helper functions
// ─────────────────────────────────────────────────────────────────────────────

fn render_fields(value: &Value) -> Vec<Line<'static>> {
    let Value::Object(fields) = value else {
        return vec![Line::from(CellValue::from(value.clone()).display_text())];
    };

    let mut lines = vec![Line::from("")];
    for (key, field) in fields {
        lines.push(Line::from(vec![
            Span::styled(
                format!("  {:width$}", field_label(key), width = LABEL_WIDTH),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(field_text(key, field)),
        ]));
    }
    lines
}

/// `start_date` reads "Start date"
fn field_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn field_text(key: &str, field: &Value) -> String {
    match field {
        Value::Null => "-".to_string(),
        Value::String(s) if is_timestamp_field(key) => format_date(s),
        Value::Array(items) if items.is_empty() => "-".to_string(),
        Value::Array(items) if items.iter().all(|i| !i.is_object()) => items
            .iter()
            .map(|i| CellValue::from(i.clone()).display_text())
            .collect::<Vec<_>>()
            .join(", "),
        other => CellValue::from(other.clone()).display_text(),
    }
}

fn is_timestamp_field(key: &str) -> bool {
    key.ends_with("_at")
}
