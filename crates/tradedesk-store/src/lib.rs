//! Key-value persistence layer for the tradedesk admin store.
//!
//! The admin panel keeps all of its state as serialized text under a handful of
//! named keys. This crate provides that storage with a small `get`/`put`/`delete`
//! interface and two backends:
//!
//! - [`RocksStore`]: durable, backed by `RocksDB` with one column family for admin
//!   data and one for session markers
//! - [`MemoryStore`]: process-local, used by tests and dry runs
//!
//! Writes are whole-value replacements. There is no locking across processes:
//! when two writers race, the last write to complete wins.
//!
//! # Example
//!
//! ```no_run
//! use tradedesk_store::{RocksStore, StorageKey, Store};
//!
//! let store = RocksStore::open("/tmp/tradedesk-db").unwrap();
//! store.put(StorageKey::Authenticated, "true").unwrap();
//! assert_eq!(store.get(StorageKey::Authenticated).unwrap().as_deref(), Some("true"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod codec;
pub mod error;
pub mod keys;
pub mod memory;
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use keys::StorageKey;
pub use memory::MemoryStore;
pub use rocks::RocksStore;

/// The storage trait defining all persistence operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    /// Read the text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace the text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put(&self, key: StorageKey, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete(&self, key: StorageKey) -> Result<()>;
}
