//! Layout calculations for the UI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main screen layout areas
pub struct MainLayout {
    pub tabs: Rect,
    pub grid: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Calculate main screen layout: page tabs, grid, status line and help bar
pub fn calculate_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    MainLayout {
        tabs: chunks[0],
        grid: chunks[1],
        status: chunks[2],
        help: chunks[3],
    }
}

/// Area of the notification tray in the top-right corner
pub fn notification_area(area: Rect, width: u16, lines: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(
        area.x + area.width - width,
        area.y,
        width,
        lines.min(area.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_popup() {
        let popup = centered_popup(Rect::new(0, 0, 100, 40), 40, 10);
        assert_eq!(popup, Rect::new(30, 15, 40, 10));

        let clipped = centered_popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!(clipped, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_main_layout_fills_area() {
        let layout = calculate_main_layout(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.tabs.height, 3);
        assert_eq!(layout.grid.height, 23);
        assert_eq!(layout.status.y, 26);
        assert_eq!(layout.help.y, 27);
    }

    #[test]
    fn test_notification_area_is_top_right() {
        let tray = notification_area(Rect::new(0, 0, 80, 30), 30, 4);
        assert_eq!(tray, Rect::new(50, 0, 30, 4));
    }
}
