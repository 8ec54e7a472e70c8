//! Field values stored in records.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::column::ColumnType;

/// A single field value: text, number, or boolean.
///
/// Persisted as the matching bare JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A boolean flag.
    Bool(bool),
    /// A JSON number, kept exactly as stored.
    Number(Number),
    /// Free text. The empty string is the "no value" marker.
    Text(String),
}

impl FieldValue {
    /// The empty value written into records when a column is added.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Parse raw form input for a column of the given type.
    ///
    /// Number columns keep numeric input as a number; everything else is text.
    #[must_use]
    pub fn parse_for(column_type: ColumnType, raw: &str) -> Self {
        if column_type == ColumnType::Number {
            let trimmed = raw.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Self::Number(n.into());
            }
            if let Some(n) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
                return Self::Number(n);
            }
        }
        Self::Text(raw.to_string())
    }

    /// Whether this is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Whether the value counts as "no value" for search and display:
    /// empty text, `false`, or zero.
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Bool(b) => !b,
            Self::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
            Self::Text(s) => s.is_empty(),
        }
    }

    /// Return the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_column() {
        assert_eq!(
            FieldValue::parse_for(ColumnType::Number, " 42 "),
            FieldValue::from(42)
        );
        assert_eq!(
            FieldValue::parse_for(ColumnType::Number, "2.5").to_string(),
            "2.5"
        );
        assert_eq!(
            FieldValue::parse_for(ColumnType::Number, "lots"),
            FieldValue::from("lots")
        );
    }

    #[test]
    fn parse_text_column_keeps_raw() {
        assert_eq!(
            FieldValue::parse_for(ColumnType::Tel, "007"),
            FieldValue::from("007")
        );
    }

    #[test]
    fn falsy_values() {
        assert!(FieldValue::empty().is_falsy());
        assert!(FieldValue::from(false).is_falsy());
        assert!(FieldValue::from(0).is_falsy());
        assert!(!FieldValue::from("0").is_falsy());
        assert!(!FieldValue::from(true).is_falsy());
    }

    #[test]
    fn untagged_json() {
        let values: Vec<FieldValue> = serde_json::from_str(r#"["x", 3, true, 1.5]"#).unwrap();
        assert_eq!(values[0], FieldValue::from("x"));
        assert_eq!(values[1], FieldValue::from(3));
        assert_eq!(values[2], FieldValue::from(true));
        assert_eq!(values[3].to_string(), "1.5");
    }
}
