//! Generic sortable grid core
//!
//! - `value` - Typed cell values and default cell text
//! - `column` - Column descriptors (key, header, accessor, renderer)
//! - `sort` - Sort state machine and comparators
//!
//! The terminal component built on top of this lives in
//! `components::data_grid`.

pub mod column;
pub mod sort;
pub mod value;

pub use column::{Column, SortKind};
pub use sort::{sorted_indices, SortDirection, SortState};
pub use value::{parse_date, CellValue};
