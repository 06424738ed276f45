//! Bulk ingestion payload types

use serde::{Deserialize, Serialize};

/// Result of a committed bulk insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkInsertResult {
    /// Number of records written
    pub inserted: usize,
    /// Identifiers assigned by the store, in payload order
    pub ids: Vec<String>,
}

/// One schema violation found in an uploaded row
///
/// `row` is the 0-based index into the submitted array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowViolation {
    pub row: usize,
    pub field: String,
    pub reason: String,
}

impl RowViolation {
    pub fn new(row: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            row,
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for RowViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {}: {} {}", self.row + 1, self.field, self.reason)
    }
}
