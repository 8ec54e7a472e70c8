//! Common error types for tradedesk.
//!
//! This module provides the error types that are shared by the store and the
//! admin service.

use thiserror::Error;

/// A result type using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur while parsing domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The column type name is not one of the supported input types.
    #[error("unknown column type: {0}")]
    UnknownColumnType(String),

    /// A schema or submission rule was violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rule violations detected before any mutation takes place.
///
/// These are surfaced to the admin as blocking messages; they are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A column definition was submitted without a key.
    #[error("column key is required")]
    MissingKey,

    /// A column definition was submitted without a label.
    #[error("column label is required")]
    MissingLabel,

    /// The column key is already used by another column.
    #[error("column key already exists: {0}")]
    DuplicateKey(String),

    /// The column key collides with the record identifier field.
    #[error("column key is reserved: {0}")]
    ReservedKey(String),

    /// A select column was defined without any options.
    #[error("select column {0} needs at least one option")]
    MissingOptions(String),

    /// A required field was left empty on record submission.
    #[error("{label} is required")]
    MissingField {
        /// Key of the empty column.
        key: String,
        /// Display label of the empty column.
        label: String,
    },
}
