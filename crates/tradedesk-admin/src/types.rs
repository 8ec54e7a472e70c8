//! Request, response and configuration types for admin operations.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tradedesk_core::{parse_options, Column, ColumnType};

/// Result of an operation that may be declined or may target a missing entry.
///
/// Lookup misses are not errors: updating or deleting an unknown ID leaves the
/// stores untouched and reports `NotFound`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// The mutation was applied.
    Applied(T),
    /// The admin declined the confirmation prompt.
    Cancelled,
    /// No entry matched.
    NotFound,
}

impl<T> Outcome<T> {
    /// Whether the mutation was applied.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Return the applied value, if any.
    #[must_use]
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Cancelled | Self::NotFound => None,
        }
    }
}

/// Raw input of the "add column" form.
///
/// Options are a single comma-separated string, as typed by the admin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnDraft {
    /// Column key.
    pub key: String,
    /// Column label.
    pub label: String,
    /// Input type.
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    /// Comma-separated option list; only read for select columns.
    #[serde(default)]
    pub options: String,
    /// Whether the column is required.
    #[serde(default)]
    pub required: bool,
}

impl ColumnDraft {
    /// Create a draft for an optional column.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            column_type,
            ..Self::default()
        }
    }

    /// Convert to a column definition, trimming the key and label.
    #[must_use]
    pub fn into_column(self) -> Column {
        let column = Column {
            key: self.key.trim().to_string(),
            label: self.label.trim().to_string(),
            column_type: self.column_type,
            options: None,
            required: self.required,
        };
        if column.is_select() {
            column.with_options(parse_options(&self.options))
        } else {
            column
        }
    }
}

/// Summary figures shown above the user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdminStats {
    /// Number of records.
    pub total_users: usize,
    /// Records whose `status` is `Active`.
    pub active_users: usize,
    /// Number of schema columns.
    pub columns: usize,
}

/// Configuration for the admin service.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Directory of the `RocksDB` database.
    #[serde(default = "AdminConfig::default_data_dir")]
    pub data_dir: PathBuf,

    /// Admin username. Login is refused while unset.
    #[serde(default)]
    pub admin_username: Option<String>,

    /// Admin password. Login is refused while unset.
    #[serde(default)]
    pub admin_password: Option<String>,

    /// How long a login stays valid, in hours.
    #[serde(default = "AdminConfig::default_session_ttl")]
    pub session_ttl_hours: u64,
}

impl AdminConfig {
    fn default_data_dir() -> PathBuf {
        PathBuf::from("./tradedesk-data")
    }

    const fn default_session_ttl() -> u64 {
        24
    }

    /// Get the session validity window as a `Duration`.
    #[must_use]
    pub const fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_hours.saturating_mul(60 * 60))
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            admin_username: None,
            admin_password: None,
            session_ttl_hours: Self::default_session_ttl(),
        }
    }
}
