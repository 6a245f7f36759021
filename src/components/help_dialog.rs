//! Help dialog component
//!
//! Lists the keyboard and mouse bindings of the portal.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Rows",
        &[
            ("j / ↓", "Next row"),
            ("k / ↑", "Previous row"),
            ("g / G", "First / last row"),
            ("Enter", "Open record details"),
            ("click", "Select row and open details"),
        ],
    ),
    (
        "Sorting",
        &[
            ("h / l", "Focus previous / next column"),
            ("s", "Sort by focused column"),
            ("1-9", "Sort by column number"),
            ("click", "Sort by clicked header"),
        ],
    ),
    (
        "Record Actions",
        &[
            ("e", "Edit record in $EDITOR"),
            ("c", "Duplicate record"),
            ("d / Del", "Delete record"),
            ("[Edit] ...", "Click a row button"),
        ],
    ),
    (
        "Pages",
        &[
            ("Tab", "Next page"),
            ("Shift+Tab", "Previous page"),
            ("a", "Toggle active / archived campaigns"),
            ("X", "Export page as CSV"),
            ("R", "Reload dataset"),
        ],
    ),
    (
        "General",
        &[
            ("Esc", "Dismiss newest notification"),
            ("?", "Show this help"),
            ("q", "Quit"),
        ],
    ),
];

/// Help dialog showing all keyboard shortcuts
#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_add(1),
            Action::ScrollUp => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content = build_help_content();
        let total = content.len();

        let dialog_area = centered_popup(area, 60, total as u16 + 2);
        frame.render_widget(Clear, dialog_area);

        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

fn build_help_content() -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (title, shortcuts) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));

        for (key, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  {:12}", key),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(description.to_string(), Style::default().fg(Color::White)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        Style::default().fg(Color::DarkGray),
    )));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_row_actions() {
        let text: Vec<String> = build_help_content()
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert!(text.iter().any(|l| l.contains("Duplicate record")));
        assert!(text.iter().any(|l| l.contains("Sort by clicked header")));
    }

    #[test]
    fn test_scroll_updates() {
        let mut dialog = HelpDialog::default();
        dialog.update(Action::ScrollDown).unwrap();
        dialog.update(Action::ScrollDown).unwrap();
        dialog.update(Action::ScrollUp).unwrap();
        assert_eq!(dialog.scroll_offset, 1);
    }
}
