//! Date formatting for table cells

use crate::grid::parse_date;

/// Human readable timestamp, e.g. "Jan 5, 2024, 09:30"
///
/// Empty input reads "N/A" and unparsable input "Invalid date".
pub fn format_date(value: &str) -> String {
    if value.trim().is_empty() {
        return "N/A".to_string();
    }

    match parse_date(value) {
        Some(date) => date.format("%b %-d, %Y, %H:%M").to_string(),
        None => "Invalid date".to_string(),
    }
}

/// Calendar day as `YYYY-MM-DD`, or an empty string
pub fn format_day(value: Option<&str>) -> String {
    value
        .and_then(parse_date)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
