//! Generic data grid component
//!
//! Renders a caller-owned slice of records as a sortable table. The grid
//! only borrows the records while drawing or handling an event; it never
//! mutates or stores them. Edit/duplicate/delete intents and row navigation
//! are handed back to the caller through the row handlers.

use crate::action::Action;
use crate::component::Component;
use crate::grid::{sorted_indices, Column, SortDirection, SortState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState},
    Frame,
};
use std::io;
use unicode_width::UnicodeWidthStr;

/// Shown instead of a grid frame when there are no records
pub const EMPTY_PLACEHOLDER: &str = "No data available.";

const HIGHLIGHT_SYMBOL: &str = "▶ ";
const COLUMN_SPACING: u16 = 1;
const MAX_COLUMN_WIDTH: usize = 40;
const MIN_COLUMN_WIDTH: u16 = 3;

/// Callback invoked with one record; may answer with a follow-up Action
pub type RowHandler<T> = Box<dyn FnMut(&T) -> Option<Action>>;

/// Buttons of the row action cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Duplicate,
    Delete,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::Duplicate => "Duplicate",
            RowAction::Delete => "Delete",
        }
    }

    fn color(self) -> Color {
        match self {
            RowAction::Edit => Color::Blue,
            RowAction::Duplicate => Color::Green,
            RowAction::Delete => Color::Red,
        }
    }

    /// Rendered width of the `[Label]` button
    fn width(self) -> u16 {
        self.label().len() as u16 + 2
    }
}

struct RowHandlers<T> {
    edit: Option<RowHandler<T>>,
    duplicate: Option<RowHandler<T>>,
    delete: Option<RowHandler<T>>,
    /// Row-level navigation layered over the cells by the caller
    open: Option<RowHandler<T>>,
}

impl<T> Default for RowHandlers<T> {
    fn default() -> Self {
        Self {
            edit: None,
            duplicate: None,
            delete: None,
            open: None,
        }
    }
}

impl<T> RowHandlers<T> {
    fn get_mut(&mut self, action: RowAction) -> Option<&mut RowHandler<T>> {
        match action {
            RowAction::Edit => self.edit.as_mut(),
            RowAction::Duplicate => self.duplicate.as_mut(),
            RowAction::Delete => self.delete.as_mut(),
        }
    }

    fn is_set(&self, action: RowAction) -> bool {
        match action {
            RowAction::Edit => self.edit.is_some(),
            RowAction::Duplicate => self.duplicate.is_some(),
            RowAction::Delete => self.delete.is_some(),
        }
    }
}

/// Screen positions captured on the last draw, for mouse hit-testing
#[derive(Debug, Clone, Default)]
struct GridGeometry {
    header_y: u16,
    body_top: u16,
    /// Exclusive
    body_bottom: u16,
    row_height: u16,
    offset: usize,
    /// Absolute x and width of each column
    columns: Vec<(u16, u16)>,
}

impl GridGeometry {
    fn new(inner: Rect, selection_width: u16, widths: &[u16], row_height: u16, offset: usize) -> Self {
        let mut x = inner.x.saturating_add(selection_width);
        let columns = widths
            .iter()
            .map(|&width| {
                let column = (x, width);
                x = x.saturating_add(width + COLUMN_SPACING);
                column
            })
            .collect();

        let body_top = inner.y.saturating_add(1);
        let visible_rows = inner.height.saturating_sub(1) / row_height.max(1);

        Self {
            header_y: inner.y,
            body_top,
            body_bottom: body_top.saturating_add(visible_rows * row_height),
            row_height: row_height.max(1),
            offset,
            columns,
        }
    }

    fn column_at(&self, x: u16) -> Option<usize> {
        self.columns
            .iter()
            .position(|&(start, width)| x >= start && x < start.saturating_add(width))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Header(usize),
    Row {
        position: usize,
        action: Option<RowAction>,
    },
}

/// Sortable table over records of type `T`
pub struct DataGrid<T> {
    title: String,
    columns: Vec<Column<T>>,
    sort: SortState,
    /// Selection indexes the sorted view, not the source slice
    state: TableState,
    focused_column: usize,
    handlers: RowHandlers<T>,
    geometry: Option<GridGeometry>,
}

impl<T> DataGrid<T> {
    pub fn new(title: impl Into<String>, columns: Vec<Column<T>>) -> Self {
        debug_assert!(!columns.is_empty(), "a grid needs at least one column");
        debug_assert!(
            columns
                .iter()
                .enumerate()
                .all(|(i, c)| columns[..i].iter().all(|other| other.key != c.key)),
            "column keys must be unique"
        );

        Self {
            title: title.into(),
            columns,
            sort: SortState::default(),
            state: TableState::default(),
            focused_column: 0,
            handlers: RowHandlers::default(),
            geometry: None,
        }
    }

    /// Initial sort column and direction
    pub fn with_sort(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = SortState::new(key, direction);
        self
    }

    pub fn on_edit(mut self, handler: impl FnMut(&T) -> Option<Action> + 'static) -> Self {
        self.handlers.edit = Some(Box::new(handler));
        self
    }

    pub fn on_duplicate(mut self, handler: impl FnMut(&T) -> Option<Action> + 'static) -> Self {
        self.handlers.duplicate = Some(Box::new(handler));
        self
    }

    pub fn on_delete(mut self, handler: impl FnMut(&T) -> Option<Action> + 'static) -> Self {
        self.handlers.delete = Some(Box::new(handler));
        self
    }

    /// Row navigation, triggered by Enter or a click outside the action cluster
    pub fn on_open(mut self, handler: impl FnMut(&T) -> Option<Action> + 'static) -> Self {
        self.handlers.open = Some(Box::new(handler));
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn focused_column(&self) -> usize {
        self.focused_column
    }

    /// Selected position in the sorted view
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Action buttons that have a handler, in display order
    pub fn action_cluster(&self) -> Vec<RowAction> {
        [RowAction::Edit, RowAction::Duplicate, RowAction::Delete]
            .into_iter()
            .filter(|action| self.handlers.is_set(*action))
            .collect()
    }

    fn shows_action_cluster(&self) -> bool {
        self.columns.iter().any(|c| c.actions) && !self.action_cluster().is_empty()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sorted View
    // ─────────────────────────────────────────────────────────────────────────

    /// Indices into `data` in display order
    ///
    /// Recomputed from scratch on every call, so replacing `data` between
    /// calls never leaves a stale order behind.
    pub fn sorted_indices(&self, data: &[T]) -> Vec<usize> {
        sorted_indices(data, &self.columns, &self.sort)
    }

    pub fn sorted<'a>(&self, data: &'a [T]) -> Vec<&'a T> {
        self.sorted_indices(data)
            .into_iter()
            .map(|i| &data[i])
            .collect()
    }

    pub fn selected_record<'a>(&self, data: &'a [T]) -> Option<&'a T> {
        let position = self.state.selected()?;
        let order = self.sorted_indices(data);
        order.get(position).map(|&i| &data[i])
    }

    /// Click the header of the column at `index`
    ///
    /// Returns whether the sort state changed; non-sortable columns only
    /// take focus.
    pub fn click_header(&mut self, index: usize) -> bool {
        let Some(column) = self.columns.get(index) else {
            return false;
        };

        let changed = self.sort.click(column);
        if changed {
            log::debug!(
                "{}: sort by {} {:?}",
                self.title,
                column.key,
                self.sort.direction
            );
        }
        self.focused_column = index;
        changed
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────

    /// Select next row, wrapping to the first
    pub fn next_row(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let next = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(next));
    }

    /// Select previous row, wrapping to the last
    pub fn previous_row(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let previous = match self.state.selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.state.select(Some(previous));
    }

    pub fn first_row(&mut self, len: usize) {
        self.state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn last_row(&mut self, len: usize) {
        self.state.select(len.checked_sub(1));
    }

    /// Keep the selection inside a view of `len` rows
    pub fn clamp_selection(&mut self, len: usize) {
        let selected = match (self.state.selected(), len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
        self.state.select(selected);
    }

    pub fn focus_next_column(&mut self) {
        self.focused_column = (self.focused_column + 1) % self.columns.len().max(1);
    }

    pub fn focus_previous_column(&mut self) {
        let count = self.columns.len().max(1);
        self.focused_column = (self.focused_column + count - 1) % count;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Row Intents
    // ─────────────────────────────────────────────────────────────────────────

    /// Invoke an action handler with the selected record
    pub fn trigger(&mut self, action: RowAction, data: &[T]) -> Option<Action> {
        let record = self.selected_record(data)?;
        let handler = self.handlers.get_mut(action)?;
        handler(record)
    }

    /// Invoke the row navigation handler with the selected record
    pub fn open_selected(&mut self, data: &[T]) -> Option<Action> {
        let record = self.selected_record(data)?;
        let handler = self.handlers.open.as_mut()?;
        handler(record)
    }

    /// Apply a grid Action against the current records
    ///
    /// Returns whatever a row handler answered with.
    pub fn apply(&mut self, action: &Action, data: &[T]) -> Option<Action> {
        match action {
            Action::NextItem => self.next_row(data.len()),
            Action::PrevItem => self.previous_row(data.len()),
            Action::FirstItem => self.first_row(data.len()),
            Action::LastItem => self.last_row(data.len()),
            Action::NextColumn => self.focus_next_column(),
            Action::PrevColumn => self.focus_previous_column(),
            Action::SortFocusedColumn => {
                self.click_header(self.focused_column);
            }
            Action::SortColumn(index) => {
                self.click_header(*index);
            }
            Action::OpenSelected => return self.open_selected(data),
            Action::EditSelected => return self.trigger(RowAction::Edit, data),
            Action::DuplicateSelected => return self.trigger(RowAction::Duplicate, data),
            Action::DeleteSelected => return self.trigger(RowAction::Delete, data),
            _ => {}
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────────────────

    /// Handle a mouse event against the layout of the last draw
    ///
    /// A click on an action button invokes only that button's handler; the
    /// row navigation handler fires for clicks anywhere else on the row.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, data: &[T]) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::ScrollDown => {
                self.next_row(data.len());
                None
            }
            MouseEventKind::ScrollUp => {
                self.previous_row(data.len());
                None
            }
            MouseEventKind::Down(MouseButton::Left) => {
                match self.hit(mouse.column, mouse.row, data.len())? {
                    Hit::Header(index) => {
                        self.click_header(index);
                        None
                    }
                    Hit::Row { position, action } => {
                        self.state.select(Some(position));
                        match action {
                            Some(action) => self.trigger(action, data),
                            None => self.open_selected(data),
                        }
                    }
                }
            }
            _ => None,
        }
    }

    fn hit(&self, x: u16, y: u16, len: usize) -> Option<Hit> {
        let geometry = self.geometry.as_ref()?;
        let column = geometry.column_at(x);

        if y == geometry.header_y {
            return column.map(Hit::Header);
        }
        if y < geometry.body_top || y >= geometry.body_bottom {
            return None;
        }

        let relative = y - geometry.body_top;
        let position = geometry.offset + (relative / geometry.row_height) as usize;
        if position >= len {
            return None;
        }

        // The action cluster sits on the second line of its cell
        let action = match column {
            Some(index) if self.columns[index].actions && relative % geometry.row_height == 1 => {
                let (start, width) = geometry.columns[index];
                self.cluster_hit(x - start, width)
            }
            _ => None,
        };

        Some(Hit::Row { position, action })
    }

    fn cluster_hit(&self, offset: u16, width: u16) -> Option<RowAction> {
        let mut start = 0u16;
        for action in self.action_cluster() {
            let end = (start + action.width()).min(width);
            if offset >= start && offset < end {
                return Some(action);
            }
            start += action.width() + 1;
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────────────────────

    /// Write the sorted view as CSV (headers, then cell text)
    ///
    /// Returns the number of records written.
    pub fn export_csv<W: io::Write>(&self, data: &[T], writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.columns.iter().map(|c| c.header.as_str()))?;

        let order = self.sorted_indices(data);
        for &index in &order {
            csv_writer.write_record(self.columns.iter().map(|c| c.cell_text(&data[index])))?;
        }
        csv_writer.flush()?;

        Ok(order.len())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the grid for `data`
    pub fn draw_with_data(&mut self, frame: &mut Frame, area: Rect, data: &[T]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ({}) ", self.title, data.len()))
            .border_style(Style::default().fg(Color::DarkGray));

        if data.is_empty() {
            self.state.select(None);
            self.geometry = None;

            let placeholder = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    EMPTY_PLACEHOLDER,
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .block(block)
            .alignment(Alignment::Center);
            frame.render_widget(placeholder, area);
            return;
        }

        self.clamp_selection(data.len());

        let order = self.sorted_indices(data);
        let inner = block.inner(area);
        let selection_width = HIGHLIGHT_SYMBOL.width() as u16;
        let widths = self.column_widths(data, &order, inner.width.saturating_sub(selection_width));
        let show_cluster = self.shows_action_cluster();
        let row_height = if show_cluster { 2 } else { 1 };

        let header = Row::new(
            self.columns
                .iter()
                .enumerate()
                .map(|(i, column)| Cell::from(self.header_line(i, column))),
        );

        let rows: Vec<Row> = order
            .iter()
            .map(|&index| {
                let record = &data[index];
                let cells = self.columns.iter().map(|column| {
                    let mut lines = vec![column.cell(record)];
                    if show_cluster && column.actions {
                        lines.push(self.action_cluster_line());
                    }
                    Cell::from(Text::from(lines))
                });
                Row::new(cells).height(row_height)
            })
            .collect();

        let table = Table::new(rows, widths.iter().map(|&w| Constraint::Length(w)))
            .header(header)
            .block(block)
            .column_spacing(COLUMN_SPACING)
            .flex(Flex::Start)
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(HIGHLIGHT_SYMBOL)
            .highlight_spacing(HighlightSpacing::Always);

        frame.render_stateful_widget(table, area, &mut self.state);

        self.geometry = Some(GridGeometry::new(
            inner,
            selection_width,
            &widths,
            row_height,
            self.state.offset(),
        ));
    }

    fn header_line(&self, index: usize, column: &Column<T>) -> Line<'static> {
        let mut style = if column.sortable {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD)
        };
        if index == self.focused_column {
            style = style.add_modifier(Modifier::UNDERLINED);
        }

        let mut spans = vec![Span::styled(column.header.clone(), style)];
        if self.sort.is_active(&column.key) {
            spans.push(Span::styled(
                format!(" {}", self.sort.direction.indicator()),
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    }

    fn action_cluster_line(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, action) in self.action_cluster().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("[{}]", action.label()),
                Style::default()
                    .fg(action.color())
                    .add_modifier(Modifier::BOLD),
            ));
        }
        Line::from(spans)
    }

    fn action_cluster_width(&self) -> usize {
        let actions = self.action_cluster();
        let buttons: usize = actions.iter().map(|a| a.width() as usize).sum();
        buttons + actions.len().saturating_sub(1)
    }

    /// Column widths fitted to `available` terminal columns
    fn column_widths(&self, data: &[T], order: &[usize], available: u16) -> Vec<u16> {
        let cluster_width = if self.shows_action_cluster() {
            self.action_cluster_width()
        } else {
            0
        };

        let mut widths: Vec<u16> = self
            .columns
            .iter()
            .map(|column| {
                // Leave room for the sort indicator
                let header = column.header.width() + 2;
                let content = order
                    .iter()
                    .map(|&i| column.cell_width(&data[i]))
                    .max()
                    .unwrap_or(0);
                let cluster = if column.actions { cluster_width } else { 0 };
                header.max(content).max(cluster).min(MAX_COLUMN_WIDTH) as u16
            })
            .collect();

        fit_widths(&mut widths, available);
        widths
    }
}

/// Shrink the widest columns until everything fits in `available`
fn fit_widths(widths: &mut [u16], available: u16) {
    let spacing = COLUMN_SPACING * widths.len().saturating_sub(1) as u16;
    let budget = available.saturating_sub(spacing) as u32;
    let mut total: u32 = widths.iter().map(|&w| w as u32).sum();

    while total > budget {
        let Some(widest) = widths.iter_mut().max_by_key(|w| **w) else {
            break;
        };
        if *widest <= MIN_COLUMN_WIDTH {
            break;
        }
        *widest -= 1;
        total -= 1;
    }
}

impl<T> Component for DataGrid<T> {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            // Rows
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextItem),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevItem),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),

            // Headers
            KeyCode::Char('h') | KeyCode::Left => Some(Action::PrevColumn),
            KeyCode::Char('l') | KeyCode::Right => Some(Action::NextColumn),
            KeyCode::Char('s') => Some(Action::SortFocusedColumn),
            KeyCode::Char(c @ '1'..='9') => Some(Action::SortColumn(c as usize - '1' as usize)),

            // Row intents
            KeyCode::Enter => Some(Action::OpenSelected),
            KeyCode::Char('e') => Some(Action::EditSelected),
            KeyCode::Char('c') => Some(Action::DuplicateSelected),
            KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteSelected),

            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Drawing needs the records; see draw_with_data
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Page, RecordRef};
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Post {
        id: i64,
        name: &'static str,
        published: bool,
        updated_at: &'static str,
    }

    fn post(id: i64, name: &'static str, published: bool, updated_at: &'static str) -> Post {
        Post {
            id,
            name,
            published,
            updated_at,
        }
    }

    fn posts() -> Vec<Post> {
        vec![
            post(1, "B", true, "2024-01-01"),
            post(2, "A", false, "2024-03-01"),
        ]
    }

    fn columns() -> Vec<Column<Post>> {
        vec![
            Column::new("name", "Name", |p: &Post| p.name.into()).with_actions(),
            Column::new("published", "Published", |p: &Post| p.published.into()),
            Column::new("updated_at", "Updated", |p: &Post| p.updated_at.into()),
            Column::new("notes", "Notes", |_: &Post| "n/a".into()).unsortable(),
        ]
    }

    fn grid() -> DataGrid<Post> {
        DataGrid::new("Posts", columns()).with_sort("updated_at", SortDirection::Descending)
    }

    fn open_ref(p: &Post) -> Option<Action> {
        Some(Action::OpenRecord(RecordRef::new(Page::Campaigns, p.id.to_string(), p.name)))
    }

    fn render(grid: &mut DataGrid<Post>, data: &[Post]) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 16)).unwrap();
        terminal
            .draw(|frame| grid.draw_with_data(frame, frame.area(), data))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    /// Screen position of the first occurrence of `needle` at or below `from_row`
    fn find(lines: &[String], needle: &str, from_row: usize) -> Option<(u16, u16)> {
        lines.iter().enumerate().skip(from_row).find_map(|(y, line)| {
            line.find(needle)
                .map(|byte| (line[..byte].chars().count() as u16, y as u16))
        })
    }

    fn click(x: u16, y: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ids(grid: &DataGrid<Post>, data: &[Post]) -> Vec<i64> {
        grid.sorted(data).iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_empty_data_renders_placeholder() {
        let mut grid = grid();
        let lines = render(&mut grid, &[]);

        assert!(lines.iter().any(|l| l.contains(EMPTY_PLACEHOLDER)));
        assert!(!lines.iter().any(|l| l.contains("Published")));
        assert_eq!(grid.selected(), None);
    }

    #[test]
    fn test_default_sort_scenario() {
        let data = posts();
        let grid = grid();
        assert_eq!(ids(&grid, &data), vec![2, 1]);
    }

    #[test]
    fn test_header_clicks_scenario() {
        let data = posts();
        let mut grid = grid();

        assert!(grid.click_header(0));
        assert_eq!(ids(&grid, &data), vec![2, 1]);

        assert!(grid.click_header(0));
        assert_eq!(ids(&grid, &data), vec![1, 2]);
    }

    #[test]
    fn test_unsortable_header_click_keeps_order() {
        let data = posts();
        let mut grid = grid();
        let before = grid.sort_state().clone();

        assert!(!grid.click_header(3));
        assert_eq!(grid.sort_state(), &before);
        assert_eq!(ids(&grid, &data), vec![2, 1]);
    }

    #[test]
    fn test_default_cell_text_and_sort_indicator() {
        let mut grid = grid();
        let lines = render(&mut grid, &posts());

        assert!(lines.iter().any(|l| l.contains("Updated ▼")));
        assert!(lines.iter().any(|l| l.contains("Yes")));
        assert!(lines.iter().any(|l| l.contains("No")));
    }

    #[test]
    fn test_only_delete_handler_renders_one_button_per_row() {
        let data = posts();
        let mut grid = grid().on_delete(|_| None);
        let lines = render(&mut grid, &data);

        let deletes: usize = lines.iter().map(|l| l.matches("[Delete]").count()).sum();
        assert_eq!(deletes, data.len());
        assert!(!lines.iter().any(|l| l.contains("[Edit]")));
        assert!(!lines.iter().any(|l| l.contains("[Duplicate]")));
    }

    #[test]
    fn test_no_handlers_renders_no_cluster() {
        let mut grid = grid();
        let lines = render(&mut grid, &posts());
        assert!(!lines.iter().any(|l| l.contains('[')));
    }

    #[test]
    fn test_clicking_delete_calls_handler_not_navigation() {
        let data = posts();
        let deleted = Rc::new(RefCell::new(Vec::new()));
        let opened = Rc::new(RefCell::new(Vec::new()));

        let deleted_log = Rc::clone(&deleted);
        let opened_log = Rc::clone(&opened);
        let mut grid = grid()
            .on_delete(move |p: &Post| {
                deleted_log.borrow_mut().push(p.clone());
                None
            })
            .on_open(move |p: &Post| {
                opened_log.borrow_mut().push(p.clone());
                None
            });

        let lines = render(&mut grid, &data);
        // Second data row in display order is id 1 ("B")
        let (_, first_button_y) = find(&lines, "[Delete]", 0).unwrap();
        let (x, y) = find(&lines, "[Delete]", first_button_y as usize + 1).unwrap();

        grid.handle_mouse(click(x + 1, y), &data);

        assert_eq!(deleted.borrow().as_slice(), &[data[0].clone()]);
        assert!(opened.borrow().is_empty());
        assert_eq!(grid.selected(), Some(1));
    }

    #[test]
    fn test_clicking_row_content_opens_record() {
        let data = posts();
        let mut grid = grid().on_delete(|_| None).on_open(open_ref);

        let lines = render(&mut grid, &data);
        let (x, y) = find(&lines, "2024-03-01", 0).unwrap();

        let action = grid.handle_mouse(click(x, y), &data);
        assert_eq!(
            action,
            Some(Action::OpenRecord(RecordRef::new(Page::Campaigns, "2", "A")))
        );
    }

    #[test]
    fn test_clicking_header_sorts() {
        let data = posts();
        let mut grid = grid();

        let lines = render(&mut grid, &data);
        let (x, y) = find(&lines, "Name", 0).unwrap();

        assert_eq!(grid.handle_mouse(click(x, y), &data), None);
        assert!(grid.sort_state().is_active("name"));
        assert_eq!(ids(&grid, &data), vec![2, 1]);

        let (x, y) = find(&lines, "Notes", 0).unwrap();
        grid.handle_mouse(click(x, y), &data);
        assert!(grid.sort_state().is_active("name"));
    }

    #[test]
    fn test_keyboard_intents_use_sorted_selection() {
        let data = posts();
        let edited = Rc::new(RefCell::new(Vec::new()));
        let edited_log = Rc::clone(&edited);
        let mut grid = grid().on_edit(move |p: &Post| {
            edited_log.borrow_mut().push(p.id);
            None
        });

        grid.first_row(data.len());
        grid.apply(&Action::EditSelected, &data);
        grid.apply(&Action::NextItem, &data);
        grid.apply(&Action::EditSelected, &data);

        assert_eq!(edited.borrow().as_slice(), &[2, 1]);
    }

    #[test]
    fn test_missing_handler_is_a_no_op() {
        let data = posts();
        let mut grid = grid();
        grid.first_row(data.len());

        assert_eq!(grid.apply(&Action::DuplicateSelected, &data), None);
        assert_eq!(grid.apply(&Action::OpenSelected, &data), None);
    }

    #[test]
    fn test_key_bindings() {
        let mut grid = grid();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);

        assert_eq!(
            grid.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::SortColumn(2))
        );
        assert_eq!(
            grid.handle_key_event(key(KeyCode::Delete)).unwrap(),
            Some(Action::DeleteSelected)
        );
        assert_eq!(grid.handle_key_event(key(KeyCode::Char('z'))).unwrap(), None);
    }

    #[test]
    fn test_focused_column_sorting() {
        let data = posts();
        let mut grid = grid();

        grid.apply(&Action::PrevColumn, &data);
        assert_eq!(grid.focused_column(), 3);
        grid.apply(&Action::NextColumn, &data);
        grid.apply(&Action::NextColumn, &data);
        assert_eq!(grid.focused_column(), 1);

        grid.apply(&Action::SortFocusedColumn, &data);
        assert!(grid.sort_state().is_active("published"));
        // false < true
        assert_eq!(ids(&grid, &data), vec![2, 1]);
    }

    #[test]
    fn test_selection_survives_data_replacement() {
        let many: Vec<Post> = (1..=5).map(|i| post(i, "x", true, "2024-01-01")).collect();
        let mut grid = grid();

        render(&mut grid, &many);
        grid.last_row(many.len());
        assert_eq!(grid.selected(), Some(4));

        let few = posts();
        render(&mut grid, &few);
        assert_eq!(grid.selected(), Some(1));
        assert_eq!(grid.selected_record(&few).map(|p| p.id), Some(1));
    }

    #[test]
    fn test_navigation_wraps() {
        let mut grid = grid();
        grid.next_row(3);
        assert_eq!(grid.selected(), Some(0));
        grid.previous_row(3);
        assert_eq!(grid.selected(), Some(2));
        grid.next_row(3);
        assert_eq!(grid.selected(), Some(0));
        grid.next_row(0);
        assert_eq!(grid.selected(), None);
    }

    #[test]
    fn test_export_csv_follows_sorted_view() {
        let data = posts();
        let grid = grid();
        let mut out = Vec::new();

        let written = grid.export_csv(&data, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            text,
            "Name,Published,Updated,Notes\nA,No,2024-03-01,n/a\nB,Yes,2024-01-01,n/a\n"
        );
    }

    #[test]
    fn test_fit_widths_shrinks_widest_first() {
        let mut widths = vec![10, 30, 5];
        fit_widths(&mut widths, 32);
        assert_eq!(widths.iter().sum::<u16>() + 2, 32);
        assert_eq!(widths[2], 5);
        assert!(widths[1] >= widths[0]);
    }
}
