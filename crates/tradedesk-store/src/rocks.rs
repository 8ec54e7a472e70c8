//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};

use crate::error::{Result, StoreError};
use crate::keys::StorageKey;
use crate::schema::all_column_families;
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path.as_ref(), cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(path = %path.as_ref().display(), "Opened RocksDB store");

        Ok(Self { db: Arc::new(db) })
    }

    /// Get the column family handle for a key.
    fn cf(&self, key: StorageKey) -> Result<Arc<BoundColumnFamily<'_>>> {
        let name = key.column_family();
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }
}

impl Store for RocksStore {
    fn get(&self, key: StorageKey) -> Result<Option<String>> {
        let cf = self.cf(key)?;

        self.db
            .get_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| {
                String::from_utf8(data).map_err(|e| StoreError::Serialization(e.to_string()))
            })
            .transpose()
    }

    fn put(&self, key: StorageKey, value: &str) -> Result<()> {
        let cf = self.cf(key)?;

        self.db
            .put_cf(&cf, key.as_bytes(), value.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn delete(&self, key: StorageKey) -> Result<()> {
        let cf = self.cf(key)?;

        self.db
            .delete_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use tempfile::TempDir;
    use tradedesk_core::{default_columns, Column};

    fn create_test_store() -> (RocksStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn value_crud() {
        let (store, _dir) = create_test_store();

        // Create
        store.put(StorageKey::Authenticated, "true").unwrap();

        // Read
        assert_eq!(
            store.get(StorageKey::Authenticated).unwrap().as_deref(),
            Some("true")
        );

        // Update
        store.put(StorageKey::Authenticated, "false").unwrap();
        assert_eq!(
            store.get(StorageKey::Authenticated).unwrap().as_deref(),
            Some("false")
        );

        // Delete
        store.delete(StorageKey::Authenticated).unwrap();
        assert!(store.get(StorageKey::Authenticated).unwrap().is_none());
    }

    #[test]
    fn missing_key_reads_none() {
        let (store, _dir) = create_test_store();
        assert!(store.get(StorageKey::Users).unwrap().is_none());
        store.delete(StorageKey::Users).unwrap();
    }

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let columns = default_columns();

        {
            let store = RocksStore::open(dir.path()).unwrap();
            codec::save(&store, StorageKey::Columns, &columns).unwrap();
        }

        let store = RocksStore::open(dir.path()).unwrap();
        let loaded: Vec<Column> = codec::load(&store, StorageKey::Columns).unwrap().unwrap();
        assert_eq!(loaded, columns);
    }

    #[test]
    fn corrupt_value_is_serialization_error() {
        let (store, _dir) = create_test_store();
        store.put(StorageKey::Columns, "{not json").unwrap();

        let result: Result<Option<Vec<Column>>> = codec::load(&store, StorageKey::Columns);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
