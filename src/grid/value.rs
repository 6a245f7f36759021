//! Typed cell values
//!
//! Columns read a `CellValue` out of a record through an accessor instead of
//! looking a field up by name. The value drives both the default cell text
//! and the sort order of the column.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// A single value extracted from a record for one column
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Missing or null field
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Date(DateTime<Utc>),
    /// Structured value (object or array)
    Json(Value),
}

impl CellValue {
    /// Default cell text, used when a column has no custom renderer
    ///
    /// Booleans read "Yes"/"No", structured values are serialized as
    /// compact JSON and nulls render as an empty string.
    pub fn display_text(&self) -> String {
        match self {
            CellValue::Bool(true) => "Yes".to_string(),
            CellValue::Bool(false) => "No".to_string(),
            other => other.plain_text(),
        }
    }

    /// Plain string conversion, used to compare values of unrelated types
    pub fn plain_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.clone(),
            CellValue::Date(d) => d.to_rfc3339(),
            CellValue::Json(v) => v.to_string(),
        }
    }
}

/// Integral numbers print without a trailing `.0`
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Parse a string as a calendar date or timestamp
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DD[T| ]HH:MM:SS[.f]`
/// timestamps (read as UTC) and bare `YYYY-MM-DD` dates (midnight UTC).
/// Anything else is not considered a date.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    // Postgres style offsets ("2024-03-01 10:00:00+00")
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Date(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => CellValue::Null,
            Value::Bool(b) => CellValue::Bool(b),
            Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or(CellValue::Null),
            Value::String(s) => CellValue::Text(s),
            structured => CellValue::Json(structured),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_default_text_for_booleans() {
        assert_eq!(CellValue::Bool(true).display_text(), "Yes");
        assert_eq!(CellValue::Bool(false).display_text(), "No");
    }

    #[test]
    fn test_default_text_for_null_is_empty() {
        assert_eq!(CellValue::Null.display_text(), "");
        assert_eq!(CellValue::from(None::<String>).display_text(), "");
    }

    #[test]
    fn test_default_text_for_structured_values() {
        let value = CellValue::from(json!({"a": 1, "b": [true]}));
        assert_eq!(value.display_text(), r#"{"a":1,"b":[true]}"#);

        let list = CellValue::from(json!(["x", "y"]));
        assert_eq!(list.display_text(), r#"["x","y"]"#);
    }

    #[test]
    fn test_numbers_print_without_trailing_zero() {
        assert_eq!(CellValue::from(42i64).display_text(), "42");
        assert_eq!(CellValue::Number(2.5).display_text(), "2.5");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap();
        assert_eq!(parse_date("2024-03-01T10:30:00Z"), Some(expected));
        assert_eq!(parse_date("2024-03-01T10:30:00+00:00"), Some(expected));
        assert_eq!(parse_date("2024-03-01 10:30:00"), Some(expected));
        assert_eq!(parse_date("2024-03-01T12:30:00+02:00"), Some(expected));
        assert_eq!(
            parse_date("2024-03-01"),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_date_rejects_non_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("Spring launch"), None);
        assert_eq!(parse_date("0b4e7a1c-8d2f-4c1e-9a3b-5f6d7e8c9a0b"), None);
        assert_eq!(parse_date("2024"), None);
    }
}
