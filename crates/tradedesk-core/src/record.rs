//! User records.
//!
//! A record's shape is not fixed by the type system: its fields are an ordered
//! map from column key to value, and the current schema decides which keys are
//! legal.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ids::RecordId;
use crate::value::FieldValue;

/// Placeholder shown for a field that is absent or empty.
pub const EMPTY_CELL: &str = "N/A";

/// Ordered mapping from column key to value.
pub type Fields = IndexMap<String, FieldValue>;

/// A user entry managed from the admin panel.
///
/// Persisted as a flat JSON object: `id` plus one property per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Durable identifier.
    pub id: RecordId,
    /// Field values keyed by column key.
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    /// Create a record from an ID and its fields.
    #[must_use]
    pub const fn new(id: RecordId, fields: Fields) -> Self {
        Self { id, fields }
    }

    /// Get a field value by column key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Render a field for display, substituting [`EMPTY_CELL`] for absent or falsy values.
    #[must_use]
    pub fn display_value(&self, key: &str) -> String {
        match self.fields.get(key) {
            Some(value) if !value.is_falsy() => value.to_string(),
            _ => EMPTY_CELL.to_string(),
        }
    }

    /// Whether the ID or any non-empty field contains `needle`, ignoring case.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.id.as_str().to_lowercase().contains(needle)
            || self
                .fields
                .values()
                .filter(|value| !value.is_falsy())
                .any(|value| value.to_string().to_lowercase().contains(needle))
    }
}
