//! Admin service implementation.
//!
//! `AdminService` owns both stores and keeps them consistent: schema changes are
//! applied first, then the record set is reconciled. If the reconciliation cannot
//! be persisted, the previous schema is written back.

use std::sync::Arc;

use tradedesk_core::{Column, Fields, Record, RecordId};
use tradedesk_store::Store;

use crate::confirm::Confirm;
use crate::error::Result;
use crate::records::RecordStore;
use crate::schema::SchemaStore;
use crate::types::{AdminStats, ColumnDraft, Outcome};

/// Status value counted as an active user.
const ACTIVE_STATUS: &str = "Active";

/// The admin panel's data layer: schema, records, and their reconciliation.
pub struct AdminService<S: Store> {
    schema: SchemaStore<S>,
    records: RecordStore<S>,
}

impl<S: Store> AdminService<S> {
    /// Hydrate both stores from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if persisted data cannot be read or decoded.
    pub fn open(store: Arc<S>) -> Result<Self> {
        let schema = SchemaStore::load(Arc::clone(&store))?;
        let records = RecordStore::load(store)?;
        Ok(Self { schema, records })
    }

    /// Get the schema store.
    #[must_use]
    pub const fn schema(&self) -> &SchemaStore<S> {
        &self.schema
    }

    /// Get the record store.
    #[must_use]
    pub const fn records(&self) -> &RecordStore<S> {
        &self.records
    }

    /// The current columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        self.schema.columns()
    }

    // =========================================================================
    // Schema Operations
    // =========================================================================

    /// Append a column and back-fill it with an empty value on every record.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if the definition is rejected; neither
    /// store is touched in that case.
    pub fn add_column(&mut self, def: Column) -> Result<&[Column]> {
        let previous = self.schema.columns().to_vec();
        let key = self
            .schema
            .add_column(def)?
            .last()
            .map(|c| c.key.clone())
            .unwrap_or_default();

        if let Err(err) = self.records.reconcile_for_added_column(&key) {
            self.roll_back_schema(previous);
            return Err(err);
        }
        Ok(self.schema.columns())
    }

    /// Append a column from raw form input.
    ///
    /// # Errors
    ///
    /// See [`AdminService::add_column`].
    pub fn add_column_from_draft(&mut self, draft: ColumnDraft) -> Result<&[Column]> {
        self.add_column(draft.into_column())
    }

    /// Remove a column after confirmation and strip it from every record.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::ProtectedColumn` for a required column; neither store
    /// is touched in that case. If the stripped records cannot be persisted, the
    /// column is put back and the storage error is returned.
    ///
    /// A key that is no longer in the schema but still held by records is
    /// stripped from them, and the outcome is `Outcome::NotFound`.
    pub fn remove_column(&mut self, key: &str, confirm: &dyn Confirm) -> Result<Outcome<Column>> {
        let previous = self.schema.columns().to_vec();
        let outcome = self.schema.remove_column(key, confirm)?;

        match &outcome {
            Outcome::Applied(_) => {
                if let Err(err) = self.records.reconcile_for_removed_column(key) {
                    self.roll_back_schema(previous);
                    return Err(err);
                }
            }
            Outcome::NotFound if self.records.holds_key(key) => {
                tracing::warn!(key, "Stripping field left over from an earlier removal");
                self.records.reconcile_for_removed_column(key)?;
            }
            Outcome::NotFound | Outcome::Cancelled => {}
        }
        Ok(outcome)
    }

    fn roll_back_schema(&mut self, previous: Vec<Column>) {
        if let Err(err) = self.schema.restore(previous) {
            tracing::error!(error = %err, "Failed to roll back schema change");
        }
    }

    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Validate and append a record.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if a required field is empty.
    pub fn add_record(&mut self, fields: &Fields) -> Result<&Record> {
        self.schema.validate_submission(fields)?;
        self.records.add_record(fields, self.schema.columns())
    }

    /// Validate and replace the fields of an existing record.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if a required field is empty. An unknown
    /// ID is not an error.
    pub fn update_record(&mut self, id: &RecordId, fields: &Fields) -> Result<Outcome<&Record>> {
        self.schema.validate_submission(fields)?;
        self.records.update_record(id, fields, self.schema.columns())
    }

    /// Delete a record after confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the record set cannot be persisted.
    pub fn delete_record(&mut self, id: &RecordId, confirm: &dyn Confirm) -> Result<Outcome<Record>> {
        self.records.delete_record(id, confirm)
    }

    /// Records matching `term`; see [`RecordStore::search`].
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&Record> {
        self.records.search(term)
    }

    /// The edit form for a record: every schema key, prefilled from the record.
    #[must_use]
    pub fn edit_form(&self, id: &RecordId) -> Option<Fields> {
        let record = self.records.get(id)?;
        Some(
            self.schema
                .columns()
                .iter()
                .map(|c| (c.key.clone(), record.get(&c.key).cloned().unwrap_or_default()))
                .collect(),
        )
    }

    // =========================================================================
    // Operational
    // =========================================================================

    /// Summary figures for the dashboard header.
    #[must_use]
    pub fn stats(&self) -> AdminStats {
        AdminStats {
            total_users: self.records.len(),
            active_users: self.records.count_matching("status", ACTIVE_STATUS),
            columns: self.schema.len(),
        }
    }

    /// Delete all persisted admin data and return to the default schema with no
    /// records. Session markers are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored values cannot be deleted.
    pub fn clear_data(&mut self) -> Result<()> {
        self.records.reset()?;
        self.schema.reset()?;
        tracing::info!("Cleared admin data");
        Ok(())
    }
}
