//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Admin data: the column sequence and the record set.
    pub const ADMIN: &str = "admin";

    /// Session markers consumed by the admin gate.
    pub const SESSION: &str = "session";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::ADMIN, cf::SESSION]
}
