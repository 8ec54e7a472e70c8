//! Schema store: the ordered column sequence.
//!
//! Columns are append-only apart from removal. There is no rename or retype;
//! a column is immutable once added.

use std::sync::Arc;

use tradedesk_core::{default_columns, Column, FieldValue, Fields, ValidationError};
use tradedesk_store::{codec, StorageKey, Store};

use crate::confirm::{Confirm, REMOVE_COLUMN_PROMPT};
use crate::error::{AdminError, Result};
use crate::types::Outcome;

/// Field name reserved for the record identifier.
const RESERVED_KEY: &str = "id";

/// Owns the column sequence and persists it after every change.
pub struct SchemaStore<S: Store> {
    store: Arc<S>,
    columns: Vec<Column>,
}

impl<S: Store> SchemaStore<S> {
    /// Hydrate from storage, falling back to the default columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored column sequence cannot be read or decoded.
    pub fn load(store: Arc<S>) -> Result<Self> {
        let columns = codec::load(&*store, StorageKey::Columns)?.unwrap_or_else(default_columns);
        tracing::debug!(columns = columns.len(), "Loaded schema");
        Ok(Self { store, columns })
    }

    /// The columns in display order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Find a column by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Append a column.
    ///
    /// The key and label are trimmed. Options are dropped from non-select columns.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::Validation` if the key or label is empty, the key is
    /// taken or reserved, or a select column has no options. Nothing is changed
    /// or persisted in that case.
    pub fn add_column(&mut self, mut def: Column) -> Result<&[Column]> {
        def.key = def.key.trim().to_string();
        def.label = def.label.trim().to_string();
        self.check_new(&def)?;
        if !def.is_select() {
            def.options = None;
        }

        let mut updated = self.columns.clone();
        updated.push(def);
        codec::save(&*self.store, StorageKey::Columns, &updated)?;
        self.columns = updated;

        if let Some(added) = self.columns.last() {
            tracing::info!(key = %added.key, column_type = %added.column_type, "Added column");
        }
        Ok(&self.columns)
    }

    /// Remove a non-required column after confirmation.
    ///
    /// An unknown key is reported as `Outcome::NotFound` without prompting.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::ProtectedColumn` for a required column, before any
    /// prompt is shown.
    pub fn remove_column(&mut self, key: &str, confirm: &dyn Confirm) -> Result<Outcome<Column>> {
        let Some(index) = self.columns.iter().position(|c| c.key == key) else {
            return Ok(Outcome::NotFound);
        };
        if self.columns[index].required {
            return Err(AdminError::ProtectedColumn(key.to_string()));
        }
        if !confirm.confirm(REMOVE_COLUMN_PROMPT) {
            return Ok(Outcome::Cancelled);
        }

        let mut updated = self.columns.clone();
        let removed = updated.remove(index);
        codec::save(&*self.store, StorageKey::Columns, &updated)?;
        self.columns = updated;

        tracing::info!(key = %removed.key, "Removed column");
        Ok(Outcome::Applied(removed))
    }

    /// Check that every required column has a non-empty value in `fields`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::MissingField` for the first required column that
    /// is absent or empty.
    pub fn validate_submission(&self, fields: &Fields) -> std::result::Result<(), ValidationError> {
        let missing = self
            .columns
            .iter()
            .filter(|c| c.required)
            .find(|c| fields.get(&c.key).map_or(true, FieldValue::is_empty));

        match missing {
            Some(column) => Err(ValidationError::MissingField {
                key: column.key.clone(),
                label: column.label.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Replace the column sequence and persist it.
    pub(crate) fn restore(&mut self, columns: Vec<Column>) -> Result<()> {
        codec::save(&*self.store, StorageKey::Columns, &columns)?;
        self.columns = columns;
        Ok(())
    }

    /// Drop the persisted schema and return to the default columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value cannot be deleted.
    pub fn reset(&mut self) -> Result<()> {
        self.store.delete(StorageKey::Columns)?;
        self.columns = default_columns();
        Ok(())
    }

    fn check_new(&self, def: &Column) -> std::result::Result<(), ValidationError> {
        if def.key.is_empty() {
            return Err(ValidationError::MissingKey);
        }
        if def.label.is_empty() {
            return Err(ValidationError::MissingLabel);
        }
        if def.key == RESERVED_KEY {
            return Err(ValidationError::ReservedKey(def.key.clone()));
        }
        if self.get(&def.key).is_some() {
            return Err(ValidationError::DuplicateKey(def.key.clone()));
        }
        if def.is_select() && def.options().is_empty() {
            return Err(ValidationError::MissingOptions(def.key.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::{AlwaysConfirm, NeverConfirm};
    use tradedesk_core::ColumnType;
    use tradedesk_store::MemoryStore;

    fn create_test_schema() -> (SchemaStore<MemoryStore>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let schema = SchemaStore::load(Arc::clone(&store)).unwrap();
        (schema, store)
    }

    fn persisted(store: &MemoryStore) -> Option<Vec<Column>> {
        codec::load(store, StorageKey::Columns).unwrap()
    }

    #[test]
    fn hydrates_defaults_when_empty() {
        let (schema, store) = create_test_schema();
        assert_eq!(schema.columns(), default_columns().as_slice());
        // Loading alone writes nothing
        assert!(store.is_empty());
    }

    #[test]
    fn add_column_appends_last() {
        let (mut schema, store) = create_test_schema();
        let before = schema.len();

        let columns = schema
            .add_column(Column::new("phone", "Phone", ColumnType::Tel))
            .unwrap();
        assert_eq!(columns.len(), before + 1);
        assert_eq!(columns.last().unwrap().key, "phone");

        assert_eq!(persisted(&store).unwrap(), schema.columns());
    }

    #[test]
    fn add_column_rejects_missing_key_and_label() {
        let (mut schema, store) = create_test_schema();

        let err = schema
            .add_column(Column::new("", "Phone", ColumnType::Tel))
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(ValidationError::MissingKey)));

        let err = schema
            .add_column(Column::new("phone", "", ColumnType::Tel))
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(ValidationError::MissingLabel)));

        assert_eq!(schema.len(), 4);
        assert!(persisted(&store).is_none());
    }

    #[test]
    fn add_column_rejects_duplicate_and_reserved_keys() {
        let (mut schema, _store) = create_test_schema();

        let err = schema
            .add_column(Column::new("email", "Other Email", ColumnType::Email))
            .unwrap_err();
        assert!(matches!(
            err,
            AdminError::Validation(ValidationError::DuplicateKey(ref k)) if k == "email"
        ));

        let err = schema
            .add_column(Column::new("id", "Identifier", ColumnType::Text))
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(ValidationError::ReservedKey(_))));
    }

    #[test]
    fn add_column_trims_key_before_duplicate_check() {
        let (mut schema, _store) = create_test_schema();
        schema
            .add_column(Column::new("phone", "Phone", ColumnType::Tel))
            .unwrap();

        let err = schema
            .add_column(Column::new(" phone ", "Other Phone", ColumnType::Tel))
            .unwrap_err();
        assert!(matches!(
            err,
            AdminError::Validation(ValidationError::DuplicateKey(ref k)) if k == "phone"
        ));

        let columns = schema
            .add_column(Column::new(" fax\t", " Fax ", ColumnType::Tel))
            .unwrap();
        let added = columns.last().unwrap();
        assert_eq!((added.key.as_str(), added.label.as_str()), ("fax", "Fax"));
    }

    #[test]
    fn select_column_needs_options() {
        let (mut schema, _store) = create_test_schema();

        let err = schema
            .add_column(Column::new("tier", "Tier", ColumnType::Select))
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(ValidationError::MissingOptions(_))));

        schema
            .add_column(Column::new("tier", "Tier", ColumnType::Select).with_options(["Gold"]))
            .unwrap();
        assert_eq!(schema.get("tier").unwrap().options(), ["Gold"]);
    }

    #[test]
    fn non_select_options_dropped() {
        let (mut schema, _store) = create_test_schema();
        schema
            .add_column(Column::new("notes", "Notes", ColumnType::Textarea).with_options(["x"]))
            .unwrap();
        assert!(schema.get("notes").unwrap().options.is_none());
    }

    #[test]
    fn remove_required_column_is_protected() {
        let (mut schema, store) = create_test_schema();

        let err = schema.remove_column("status", &AlwaysConfirm).unwrap_err();
        assert!(matches!(err, AdminError::ProtectedColumn(ref k) if k == "status"));
        assert_eq!(schema.columns(), default_columns().as_slice());
        assert!(persisted(&store).is_none());
    }

    #[test]
    fn remove_column_requires_confirmation() {
        let (mut schema, _store) = create_test_schema();
        schema
            .add_column(Column::new("phone", "Phone", ColumnType::Tel))
            .unwrap();

        let outcome = schema.remove_column("phone", &NeverConfirm).unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        assert!(schema.get("phone").is_some());

        let outcome = schema.remove_column("phone", &AlwaysConfirm).unwrap();
        assert_eq!(outcome.applied().unwrap().key, "phone");
        assert!(schema.get("phone").is_none());
    }

    #[test]
    fn remove_unknown_column_skips_prompt() {
        let (mut schema, _store) = create_test_schema();
        let prompted = std::cell::Cell::new(false);
        let confirm = |_: &str| {
            prompted.set(true);
            true
        };

        assert_eq!(schema.remove_column("nope", &confirm).unwrap(), Outcome::NotFound);
        assert!(!prompted.get());
    }

    #[test]
    fn validate_submission_reports_first_missing_field() {
        let (schema, _store) = create_test_schema();
        let mut fields = Fields::new();
        fields.insert("name".into(), "A. Trader".into());
        fields.insert("email".into(), FieldValue::empty());

        let err = schema.validate_submission(&fields).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                key: "email".into(),
                label: "Email".into()
            }
        );
    }

    #[test]
    fn reset_restores_defaults() {
        let (mut schema, store) = create_test_schema();
        schema
            .add_column(Column::new("phone", "Phone", ColumnType::Tel))
            .unwrap();

        schema.reset().unwrap();
        assert_eq!(schema.len(), 4);
        assert!(persisted(&store).is_none());
    }
}
