//! Error types for the admin service.
//!
//! This module defines all errors that can occur during schema and record
//! management operations.

use thiserror::Error;
use tradedesk_core::ValidationError;

/// A result type using `AdminError`.
pub type Result<T> = std::result::Result<T, AdminError>;

/// Errors that can occur in admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// A column definition or record submission broke a rule.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Required columns cannot be removed.
    #[error("cannot remove required column: {0}")]
    ProtectedColumn(String),

    /// The username or password did not match.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// No valid admin session is open.
    #[error("admin session missing or expired")]
    Unauthorized,

    /// Storage layer error.
    #[error("storage error: {0}")]
    Store(#[from] tradedesk_store::StoreError),
}

impl AdminError {
    /// Returns true if the error should be shown to the admin as a blocking message
    /// rather than treated as a system failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Store(_))
    }

    /// Returns true if this error might be resolved by retrying.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradedesk_store::StoreError;

    #[test]
    fn user_facing_errors() {
        assert!(AdminError::from(ValidationError::MissingKey).is_user_facing());
        assert!(AdminError::ProtectedColumn("name".into()).is_user_facing());
        assert!(AdminError::InvalidCredentials.is_user_facing());
        assert!(!AdminError::Store(StoreError::Database("io".into())).is_user_facing());
    }

    #[test]
    fn only_storage_errors_retry() {
        assert!(AdminError::Store(StoreError::Database("io".into())).is_retriable());
        assert!(!AdminError::ProtectedColumn("email".into()).is_retriable());
        assert!(!AdminError::Unauthorized.is_retriable());
    }

    #[test]
    fn messages() {
        assert_eq!(
            AdminError::ProtectedColumn("status".into()).to_string(),
            "cannot remove required column: status"
        );
        assert_eq!(
            AdminError::from(ValidationError::MissingLabel).to_string(),
            "validation failed: column label is required"
        );
    }
}
