//! Cell and record values.

use std::fmt;

use serde::{Serialize, Serializer};

/// Sentinel written for measurements that have no value.
pub const MISSING: &str = "Missing";

/// A decoded sheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Builds a text cell, collapsing blank text and `NaN` to [`CellValue::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            Self::Empty
        } else if trimmed.len() == value.len() {
            Self::Text(value)
        } else {
            Self::Text(trimmed.to_string())
        }
    }

    /// Parses raw text from a delimited file: numbers become [`CellValue::Number`].
    ///
    /// Zero-padded codes such as `"01001"` stay text.
    pub fn parse(raw: &str) -> Self {
        match Self::text(raw) {
            Self::Text(text) if is_zero_padded(&text) => Self::Text(text),
            Self::Text(text) => match parse_numeric(&text) {
                Some(number) => Self::Number(number),
                None => Self::Text(text),
            },
            other => other,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Text rendering used for header cells and string exports.
    pub fn as_text(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(text) => text.clone(),
            Self::Number(number) => format_numeric(*number),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::Empty
        } else {
            Self::Number(value)
        }
    }
}

/// A value in a [`NormalizedRecord`](crate::NormalizedRecord).
///
/// `Null` carries an empty metadata cell through unchanged; `Missing` is the
/// explicit sentinel for absent measurements.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Null,
    Text(String),
    Number(f64),
    Missing,
}

impl RecordValue {
    /// Metadata values pass empty cells through as `Null`.
    pub fn metadata(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => Self::Null,
            CellValue::Text(text) => Self::Text(text.clone()),
            CellValue::Number(number) => Self::Number(*number),
        }
    }

    /// Measurement values substitute the `Missing` sentinel for empty or absent cells.
    pub fn measurement(cell: Option<&CellValue>) -> Self {
        match cell {
            None | Some(CellValue::Empty) => Self::Missing,
            Some(cell) => Self::metadata(cell),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Text rendering; `None` only for `Null`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Text(text) => Some(text.clone()),
            Self::Number(number) => Some(format_numeric(*number)),
            Self::Missing => Some(MISSING.to_string()),
        }
    }
}

impl fmt::Display for RecordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => f.write_str(&format_numeric(*number)),
            Self::Missing => f.write_str(MISSING),
        }
    }
}

impl Serialize for RecordValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::Missing => serializer.serialize_str(MISSING),
        }
    }
}

impl From<&str> for RecordValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for RecordValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Parses a text cell as a number.
///
/// Accepts thousands separators and surrounding whitespace; returns `None` for
/// empty or non-numeric text.
pub fn parse_numeric(value: &str) -> Option<f64> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return None;
    }

    // Remove thousands separators and whitespace
    let cleaned = trimmed
        .replace(',', "")
        .replace(' ', "")
        .replace('\u{a0}', ""); // Non-breaking space

    let number: f64 = cleaned.parse().ok()?;
    number.is_finite().then_some(number)
}

fn is_zero_padded(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next() == Some('0') && chars.next().is_some_and(|ch| ch.is_ascii_digit())
}

/// Formats a number without trailing zeros after the decimal point.
///
/// Integer-valued floats like 40.0 are formatted as "40".
///
/// # Examples
///
/// ```
/// use tds_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    // Only trim trailing zeros if there's a decimal point
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_collapses_blank_and_nan() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::text("   "), CellValue::Empty);
        assert_eq!(CellValue::text("NaN"), CellValue::Empty);
        assert_eq!(CellValue::text(" Wake "), CellValue::Text("Wake".to_string()));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(CellValue::parse("12.5"), CellValue::Number(12.5));
        assert_eq!(CellValue::parse("1,234"), CellValue::Number(1234.0));
        assert_eq!(CellValue::parse(" 8 "), CellValue::Number(8.0));
        assert_eq!(CellValue::parse("NC"), CellValue::Text("NC".to_string()));
        assert_eq!(CellValue::parse("01001"), CellValue::Text("01001".to_string()));
        assert_eq!(CellValue::parse("0.5"), CellValue::Number(0.5));
        assert_eq!(CellValue::parse(""), CellValue::Empty);
    }

    #[test]
    fn test_parse_numeric_rejects_non_finite() {
        assert_eq!(parse_numeric("inf"), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("12.34.56"), None);
        assert_eq!(parse_numeric("1.5E-3"), Some(0.0015));
    }

    #[test]
    fn test_measurement_substitutes_missing() {
        assert_eq!(RecordValue::measurement(None), RecordValue::Missing);
        assert_eq!(
            RecordValue::measurement(Some(&CellValue::Empty)),
            RecordValue::Missing
        );
        assert_eq!(
            RecordValue::measurement(Some(&CellValue::Number(8.0))),
            RecordValue::Number(8.0)
        );
        assert_eq!(RecordValue::metadata(&CellValue::Empty), RecordValue::Null);
    }

    #[test]
    fn test_record_value_text() {
        assert_eq!(RecordValue::Missing.to_string(), "Missing");
        assert_eq!(RecordValue::Number(12.0).to_string(), "12");
        assert_eq!(RecordValue::Null.as_text(), None);
        assert_eq!(RecordValue::Number(12.5).as_text().as_deref(), Some("12.5"));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(12.25), "12.25");
    }
}
