//! Sort state and comparators
//!
//! Sorting never touches the caller's records: it produces a vector of
//! indices into the source slice, ordered by the active column.

use super::column::{Column, SortKind};
use super::value::{parse_date, CellValue};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }

    /// Turn an ascending comparison into one for this direction
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// Active sort column and direction of one grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.key.as_deref() == Some(key)
    }

    /// Apply a click on `column`'s header
    ///
    /// A new column becomes active in ascending order; clicking the active
    /// column flips the direction. Returns false (and changes nothing) for
    /// columns marked non-sortable.
    pub fn click<T>(&mut self, column: &Column<T>) -> bool {
        if !column.sortable {
            return false;
        }

        if self.is_active(&column.key) {
            self.direction = self.direction.toggled();
        } else {
            self.key = Some(column.key.clone());
            self.direction = SortDirection::Ascending;
        }
        true
    }
}

/// Locale-aware text comparison
///
/// Case-insensitive first; strings that differ only in case put the
/// lowercase form first.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Ascending comparison of two cell values
///
/// Nulls sort before every present value. Numbers, booleans and dates
/// compare by value; text compares as instants when both sides parse as
/// dates (unless the column holds identifiers) and as locale-aware text
/// otherwise. Values of different types compare by their plain text.
pub fn compare_values(a: &CellValue, b: &CellValue, kind: SortKind) -> Ordering {
    match (a, b) {
        (CellValue::Null, CellValue::Null) => Ordering::Equal,
        (CellValue::Null, _) => Ordering::Less,
        (_, CellValue::Null) => Ordering::Greater,
        (CellValue::Number(x), CellValue::Number(y)) => x.total_cmp(y),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Date(x), CellValue::Date(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => compare_strings(x, y, kind),
        _ => compare_text(&a.plain_text(), &b.plain_text()),
    }
}

fn compare_strings(a: &str, b: &str, kind: SortKind) -> Ordering {
    if kind == SortKind::Auto {
        if let (Some(x), Some(y)) = (parse_date(a), parse_date(b)) {
            return x.cmp(&y);
        }
    }
    compare_text(a, b)
}

/// Indices of `data` in display order for `state`
///
/// The sort is stable: records comparing equal keep their source order.
/// When no column matches the active key the source order is returned.
pub fn sorted_indices<T>(data: &[T], columns: &[Column<T>], state: &SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..data.len()).collect();

    let column = match state.key.as_deref() {
        Some(key) => columns.iter().find(|c| c.key == key),
        None => None,
    };
    let Some(column) = column else {
        return indices;
    };

    let values: Vec<CellValue> = data.iter().map(|record| column.value(record)).collect();
    indices.sort_by(|&a, &b| {
        state
            .direction
            .apply(compare_values(&values[a], &values[b], column.sort_kind))
    });

    indices
}
