//! Dynamic-schema user administration for tradedesk.
//!
//! This crate provides the admin panel's data layer: a user table whose columns
//! are defined at runtime, and the reconciliation that keeps every stored record
//! in step with the schema.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Admin front end (CLI)                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        AdminService                         │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │ SchemaStore │ │ RecordStore │ │   Reconciliation    │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┴──────────────┐
//!               ▼                             ▼
//!        ┌────────────┐               ┌─────────────┐
//!        │   Store    │               │ SessionGate │
//!        │ (RocksDB)  │               │  (markers)  │
//!        └────────────┘               └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use tradedesk_admin::{AdminService, AlwaysConfirm, Column, ColumnType, Fields};
//! use tradedesk_store::RocksStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RocksStore::open("/tmp/tradedesk")?);
//! let mut admin = AdminService::open(store)?;
//!
//! // Every existing record gains `phone = ""`
//! admin.add_column(Column::new("phone", "Phone", ColumnType::Tel))?;
//!
//! // ...and loses it again
//! admin.remove_column("phone", &AlwaysConfirm)?;
//!
//! let matches = admin.search("trader");
//! println!("{} matching users", matches.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Reconciliation
//!
//! - Adding a column appends it to the schema, then sets it to the empty value on
//!   every record.
//! - Removing a column deletes it from the schema, then strips it from every
//!   record.
//! - Required columns can never be removed.
//!
//! All operations run to completion synchronously. Concurrent writers to the same
//! storage are not coordinated; the last write wins.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod confirm;
pub mod error;
pub mod records;
pub mod schema;
pub mod service;
pub mod session;
pub mod types;

pub use confirm::{AlwaysConfirm, Confirm, NeverConfirm};
pub use error::{AdminError, Result};
pub use records::RecordStore;
pub use schema::SchemaStore;
pub use service::AdminService;
pub use session::{Authorizer, Credentials, SessionGate};
pub use types::{AdminConfig, AdminStats, ColumnDraft, Outcome};

// Re-export commonly used types from dependencies for convenience
pub use tradedesk_core::{
    Column, ColumnType, CoreError, FieldValue, Fields, Record, RecordId, ValidationError,
};
