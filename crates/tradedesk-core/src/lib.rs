//! Core types for the tradedesk admin store.
//!
//! This crate provides the foundational types shared by the storage layer and
//! the admin service:
//!
//! - **Identifiers**: timestamp-derived record IDs
//! - **Schema**: column definitions and their input types
//! - **Records**: user entries whose shape is governed by the schema at runtime
//! - **Error types**: validation and parsing errors shared across crates
//!
//! # Example
//!
//! ```
//! use tradedesk_core::{default_columns, FieldValue, Fields, Record, RecordId};
//!
//! let columns = default_columns();
//! assert_eq!(columns.len(), 4);
//!
//! let mut fields = Fields::new();
//! fields.insert("name".to_string(), FieldValue::from("A. Trader"));
//! let record = Record::new(RecordId::from_millis(1_704_067_200_000), fields);
//!
//! assert_eq!(record.display_value("name"), "A. Trader");
//! assert_eq!(record.display_value("email"), "N/A");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod column;
pub mod error;
pub mod ids;
pub mod record;
pub mod value;

pub use column::{default_columns, parse_options, Column, ColumnType};
pub use error::{CoreError, Result, ValidationError};
pub use ids::{IdError, RecordId};
pub use record::{Fields, Record, EMPTY_CELL};
pub use value::FieldValue;
