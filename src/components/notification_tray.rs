//! Notification tray
//!
//! Stacks the visible notifications in the top-right corner, newest last.

use crate::components::layout::notification_area;
use crate::model::notification::Notification;
use crate::model::{NotificationCenter, NotificationKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const MAX_WIDTH: usize = 60;
const MIN_WIDTH: usize = 24;

fn notification_line(notification: &Notification) -> Line<'static> {
    let (icon, color) = match notification.kind {
        NotificationKind::Success => ("✓", Color::Green),
        NotificationKind::Error => ("✗", Color::Red),
    };
    Line::from(vec![
        Span::styled(
            format!(" {} ", icon),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(notification.message.clone(), Style::default().fg(color)),
    ])
}

/// Draw the tray over `area`; nothing is drawn when there are no notifications
pub fn draw_notifications(frame: &mut Frame, area: Rect, notifications: &NotificationCenter) {
    if notifications.is_empty() {
        return;
    }

    let lines: Vec<Line> = notifications
        .visible()
        .iter()
        .map(notification_line)
        .collect();

    let content_width = lines.iter().map(|l| l.width()).max().unwrap_or(0);
    let width = (content_width + 3).clamp(MIN_WIDTH, MAX_WIDTH) as u16;
    let tray = notification_area(area, width, lines.len() as u16 + 2);

    let border = if notifications
        .visible()
        .iter()
        .any(|n| n.kind == NotificationKind::Error)
    {
        Color::Red
    } else {
        Color::Green
    };

    frame.render_widget(Clear, tray);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Notifications "),
        ),
        tray,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(center: &NotificationCenter) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 10)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_notifications(frame, area, center)
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_tray_sits_top_right() {
        let mut center = NotificationCenter::default();
        center.success("Campaign duplicated");
        center.error("Failed to save dataset");

        let lines = render(&center);
        assert!(lines[0].trim_end().ends_with('┐'));
        assert!(lines[1].contains("✓ Campaign duplicated"));
        assert!(lines[2].contains("✗ Failed to save dataset"));
        assert!(lines[1].starts_with("    "));
    }

    #[test]
    fn test_empty_tray_draws_nothing() {
        let lines = render(&NotificationCenter::default());
        assert!(lines.iter().all(|l| l.trim().is_empty()));
    }
}
