//! Schema column definitions.
//!
//! A column describes one field of a record: the key used in the record's field
//! mapping, the label shown to the admin, the input type, the legal values of a
//! select column, and whether the column is required.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Input type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Single-line free text.
    #[default]
    Text,
    /// Email address.
    Email,
    /// Calendar date (`YYYY-MM-DD`).
    Date,
    /// One of a fixed list of options.
    Select,
    /// Telephone number.
    Tel,
    /// Numeric value.
    Number,
    /// Multi-line free text.
    Textarea,
}

impl ColumnType {
    /// All supported column types, in the order the admin form lists them.
    pub const ALL: [Self; 7] = [
        Self::Text,
        Self::Email,
        Self::Tel,
        Self::Date,
        Self::Number,
        Self::Select,
        Self::Textarea,
    ];

    /// Return the persisted name of this type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Date => "date",
            Self::Select => "select",
            Self::Tel => "tel",
            Self::Number => "number",
            Self::Textarea => "textarea",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == lowered)
            .ok_or_else(|| CoreError::UnknownColumnType(s.to_string()))
    }
}

/// A column of the user table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Field name in every record. Unique within the schema.
    pub key: String,
    /// Display name.
    pub label: String,
    /// Input type.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Legal values; only present for select columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Required columns cannot be removed and must be filled on submission.
    #[serde(default)]
    pub required: bool,
}

impl Column {
    /// Create an optional column without options.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
            options: None,
            required: false,
        }
    }

    /// Mark the column as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the option list of a select column.
    #[must_use]
    pub fn with_options<I, T>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    /// Whether values are restricted to the option list.
    #[must_use]
    pub const fn is_select(&self) -> bool {
        matches!(self.column_type, ColumnType::Select)
    }

    /// The option list, or an empty slice for non-select columns.
    #[must_use]
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or_default()
    }
}

/// The four columns every schema starts with.
#[must_use]
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name", ColumnType::Text).required(),
        Column::new("email", "Email", ColumnType::Email).required(),
        Column::new("datePurchased", "Date Purchased", ColumnType::Date).required(),
        Column::new("status", "Status", ColumnType::Select)
            .with_options(["Active", "Inactive", "Pending"])
            .required(),
    ]
}

/// Parse a comma-separated option list, trimming each entry and dropping blanks.
#[must_use]
pub fn parse_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|opt| !opt.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_columns_are_required() {
        let columns = default_columns();
        let keys: Vec<_> = columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, ["name", "email", "datePurchased", "status"]);
        assert!(columns.iter().all(|c| c.required));
        assert_eq!(columns[3].options(), ["Active", "Inactive", "Pending"]);
    }

    #[test]
    fn column_type_parse() {
        assert_eq!("Tel".parse::<ColumnType>().unwrap(), ColumnType::Tel);
        assert_eq!(
            "textarea".parse::<ColumnType>().unwrap(),
            ColumnType::Textarea
        );
        assert!(matches!(
            "checkbox".parse::<ColumnType>(),
            Err(CoreError::UnknownColumnType(_))
        ));
    }

    #[test]
    fn parse_options_trims() {
        assert_eq!(parse_options(" Gold, Silver ,,Bronze "), ["Gold", "Silver", "Bronze"]);
        assert!(parse_options(" , ").is_empty());
    }

    #[test]
    fn column_json_layout() {
        let column = Column::new("phone", "Phone", ColumnType::Tel);
        let json = serde_json::to_value(&column).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key": "phone",
                "label": "Phone",
                "type": "tel",
                "required": false
            })
        );
    }

    #[test]
    fn columns_json_roundtrip_keeps_order() {
        let mut columns = default_columns();
        columns.push(Column::new("notes", "Notes", ColumnType::Textarea));
        let json = serde_json::to_string(&columns).unwrap();
        let parsed: Vec<Column> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, columns);
    }
}
