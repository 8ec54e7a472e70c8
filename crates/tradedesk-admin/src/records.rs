//! Record store: the set of user records.
//!
//! Records are kept in insertion order. Every mutation rewrites the full record
//! set to storage; there is no batching.

use std::sync::Arc;

use tradedesk_core::{Column, FieldValue, Fields, Record, RecordId};
use tradedesk_store::{codec, StorageKey, Store};

use crate::confirm::{Confirm, DELETE_RECORD_PROMPT};
use crate::error::Result;
use crate::types::Outcome;

/// Owns the user records and reconciles them against schema changes.
pub struct RecordStore<S: Store> {
    store: Arc<S>,
    records: Vec<Record>,
    /// Highest numeric ID issued or loaded, so new IDs never collide.
    last_id: Option<i64>,
}

impl<S: Store> RecordStore<S> {
    /// Hydrate from storage, falling back to an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record set cannot be read or decoded.
    pub fn load(store: Arc<S>) -> Result<Self> {
        let records: Vec<Record> = codec::load(&*store, StorageKey::Users)?.unwrap_or_default();
        let last_id = records.iter().filter_map(|r| r.id.as_millis()).max();
        tracing::debug!(records = records.len(), "Loaded records");
        Ok(Self {
            store,
            records,
            last_id,
        })
    }

    /// All records in insertion order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Find a record by ID.
    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == *id)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record holds a value under `key`.
    #[must_use]
    pub fn holds_key(&self, key: &str) -> bool {
        self.records.iter().any(|r| r.fields.contains_key(key))
    }

    /// Append a new record with a fresh ID.
    ///
    /// Only keys of `schema` are kept, in schema order; keys the caller left out
    /// are stored empty. Field values need not be unique across records.
    ///
    /// # Errors
    ///
    /// Returns an error if the record set cannot be persisted.
    pub fn add_record(&mut self, fields: &Fields, schema: &[Column]) -> Result<&Record> {
        let fields = schema
            .iter()
            .map(|c| {
                let value = fields.get(&c.key).cloned().unwrap_or_default();
                (c.key.clone(), value)
            })
            .collect();

        let id = RecordId::generate_after(self.last_id);
        let record = Record::new(id, fields);

        let mut updated = self.records.clone();
        updated.push(record);
        self.commit(updated)?;
        self.last_id = self.last_id.max(self.records.last().and_then(|r| r.id.as_millis()));

        let added = &self.records[self.records.len() - 1];
        tracing::debug!(id = %added.id, "Added record");
        Ok(added)
    }

    /// Replace the fields of the record with `id`.
    ///
    /// This is a full replace, not a merge: schema keys missing from `fields`
    /// are dropped from the record. Keys outside `schema` are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the record set cannot be persisted.
    pub fn update_record(
        &mut self,
        id: &RecordId,
        fields: &Fields,
        schema: &[Column],
    ) -> Result<Outcome<&Record>> {
        let Some(index) = self.position(id) else {
            tracing::debug!(id = %id, "Update skipped, record not found");
            return Ok(Outcome::NotFound);
        };

        let replaced: Fields = schema
            .iter()
            .filter_map(|c| fields.get(&c.key).map(|v| (c.key.clone(), v.clone())))
            .collect();

        let mut updated = self.records.clone();
        updated[index].fields = replaced;
        self.commit(updated)?;

        tracing::debug!(id = %id, "Updated record");
        Ok(Outcome::Applied(&self.records[index]))
    }

    /// Delete the record with `id` after confirmation.
    ///
    /// An unknown ID is reported as `Outcome::NotFound` without prompting.
    ///
    /// # Errors
    ///
    /// Returns an error if the record set cannot be persisted.
    pub fn delete_record(&mut self, id: &RecordId, confirm: &dyn Confirm) -> Result<Outcome<Record>> {
        let Some(index) = self.position(id) else {
            return Ok(Outcome::NotFound);
        };
        if !confirm.confirm(DELETE_RECORD_PROMPT) {
            return Ok(Outcome::Cancelled);
        }

        let mut updated = self.records.clone();
        let removed = updated.remove(index);
        self.commit(updated)?;

        tracing::debug!(id = %removed.id, "Deleted record");
        Ok(Outcome::Applied(removed))
    }

    /// Set `key` to the empty value on every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record set cannot be persisted.
    pub fn reconcile_for_added_column(&mut self, key: &str) -> Result<()> {
        let mut updated = self.records.clone();
        for record in &mut updated {
            record.fields.insert(key.to_string(), FieldValue::empty());
        }
        self.commit(updated)
    }

    /// Remove `key` from every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record set cannot be persisted.
    pub fn reconcile_for_removed_column(&mut self, key: &str) -> Result<()> {
        let mut updated = self.records.clone();
        for record in &mut updated {
            record.fields.shift_remove(key);
        }
        self.commit(updated)
    }

    /// Records where the ID or any field contains `term`, ignoring case.
    ///
    /// An empty term returns every record. Order is preserved.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Record> {
        if term.is_empty() {
            return self.records.iter().collect();
        }
        let needle = term.to_lowercase();
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    /// Count records whose `key` holds exactly `value`.
    #[must_use]
    pub fn count_matching(&self, key: &str, value: &str) -> usize {
        self.records
            .iter()
            .filter(|r| r.get(key).and_then(FieldValue::as_text) == Some(value))
            .count()
    }

    /// Drop the persisted records and start empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be deleted.
    pub fn reset(&mut self) -> Result<()> {
        self.store.delete(StorageKey::Users)?;
        self.records.clear();
        Ok(())
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| r.id == *id)
    }

    /// Persist `updated`, then make it current.
    fn commit(&mut self, updated: Vec<Record>) -> Result<()> {
        codec::save(&*self.store, StorageKey::Users, &updated)?;
        self.records = updated;
        Ok(())
    }
}
