//! Named storage keys.
//!
//! Every persisted value lives under one of these keys. The names match the
//! browser storage layout of the original admin panel so exported data can be
//! loaded as-is.

use std::fmt;

use crate::schema::cf;

/// A named slot in the key-value storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// JSON array of column definitions.
    Columns,
    /// JSON array of user records.
    Users,
    /// `"true"` while an admin session is open.
    Authenticated,
    /// Login time in milliseconds since the Unix epoch.
    LoginTime,
}

impl StorageKey {
    /// All storage keys.
    pub const ALL: [Self; 4] = [
        Self::Columns,
        Self::Users,
        Self::Authenticated,
        Self::LoginTime,
    ];

    /// The persisted key name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Columns => "admin_columns",
            Self::Users => "admin_users",
            Self::Authenticated => "admin_authenticated",
            Self::LoginTime => "admin_login_time",
        }
    }

    /// The column family holding this key.
    #[must_use]
    pub const fn column_family(self) -> &'static str {
        match self {
            Self::Columns | Self::Users => cf::ADMIN,
            Self::Authenticated | Self::LoginTime => cf::SESSION,
        }
    }

    /// Encode the key for `RocksDB`.
    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
