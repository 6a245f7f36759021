//! Column descriptors
//!
//! A column pairs a unique key and a header label with a typed accessor
//! into the record. The key is the column's sort identity; the accessor
//! replaces dynamic field lookup by name.

use super::value::CellValue;
use ratatui::text::Line;
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Reads the sortable value of a column out of a record
pub type Accessor<T> = Box<dyn Fn(&T) -> CellValue>;

/// Formats a record into the content of one cell
pub type Renderer<T> = Box<dyn Fn(&T) -> Line<'static>>;

/// How text values of a column are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKind {
    /// Text that parses as dates on both sides compares as instants,
    /// anything else as locale-aware text
    #[default]
    Auto,
    /// Opaque identifiers: always compared as locale-aware text
    Identifier,
}

/// Describes how one field of a record is labeled, formatted and sorted
pub struct Column<T> {
    pub key: String,
    pub header: String,
    pub sortable: bool,
    /// Hosts the row action cluster (edit/duplicate/delete)
    pub actions: bool,
    pub sort_kind: SortKind,
    accessor: Accessor<T>,
    render: Option<Renderer<T>>,
}

impl<T> Column<T> {
    pub fn new(
        key: impl Into<String>,
        header: impl Into<String>,
        accessor: impl Fn(&T) -> CellValue + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: true,
            actions: false,
            sort_kind: SortKind::Auto,
            accessor: Box::new(accessor),
            render: None,
        }
    }

    /// Use a custom renderer instead of the default cell text
    pub fn render(mut self, render: impl Fn(&T) -> Line<'static> + 'static) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    /// Ignore header clicks on this column
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Render the row action cluster inside this column
    pub fn with_actions(mut self) -> Self {
        self.actions = true;
        self
    }

    pub fn sort_as(mut self, kind: SortKind) -> Self {
        self.sort_kind = kind;
        self
    }

    pub fn value(&self, record: &T) -> CellValue {
        (self.accessor)(record)
    }

    /// Content of this column's cell for `record`
    pub fn cell(&self, record: &T) -> Line<'static> {
        match &self.render {
            Some(render) => render(record),
            None => Line::from(self.value(record).display_text()),
        }
    }

    /// Cell content flattened to plain text
    pub fn cell_text(&self, record: &T) -> String {
        self.cell(record)
            .spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    /// Display width of the cell content in terminal columns
    pub fn cell_width(&self, record: &T) -> usize {
        self.cell_text(record).width()
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("actions", &self.actions)
            .field("sort_kind", &self.sort_kind)
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}
