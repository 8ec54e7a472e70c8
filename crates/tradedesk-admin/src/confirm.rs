//! Interactive confirmation for destructive operations.

/// Prompt shown before a column and its data are removed.
pub const REMOVE_COLUMN_PROMPT: &str =
    "Are you sure you want to remove this column? This will delete all data in this column.";

/// Prompt shown before a record is deleted.
pub const DELETE_RECORD_PROMPT: &str = "Are you sure you want to delete this user?";

/// Asks the admin to confirm a destructive operation.
pub trait Confirm {
    /// Return `true` to proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Confirms every prompt. Used for non-interactive runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Declines every prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        false
    }
}
