//! Store-neutral atomic write batches.
//!
//! The engine never talks to a document store directly; it assembles a
//! [`WriteBatch`] of field-level mutations that an external collaborator
//! commits as one all-or-nothing unit. Store-specific sentinels (delete
//! this field, stamp a server-side time) are modeled as [`FieldOp`]
//! variants for the collaborator to interpret.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::WeekId;

/// A single field-level mutation inside a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "snake_case")]
pub enum FieldOp {
    /// Set the field to the given value.
    Set(serde_json::Value),
    /// Remove the field from the document.
    Delete,
    /// Set the field to the store's server-assigned timestamp.
    ServerTimestamp,
}

/// A store-neutral reference to one document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef {
    path: String,
}

impl DocumentRef {
    /// The document holding one employee's shifts for one week.
    pub fn employee_shifts(location_id: &str, week_id: &WeekId, employee_id: &str) -> Self {
        Self {
            path: format!("locations/{location_id}/shifts/{week_id}_{employee_id}"),
        }
    }

    /// The document holding a week's wage summary snapshot.
    pub fn week_summary(location_id: &str, week_id: &WeekId) -> Self {
        Self {
            path: format!("locations/{location_id}/summaries/{week_id}"),
        }
    }

    /// The slash-separated document path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// An ordered set of field mutations grouped per document.
///
/// The batch is only assembled here; committing it atomically is the
/// document-store collaborator's responsibility.
///
/// # Example
///
/// ```
/// use roster_engine::models::{DocumentRef, FieldOp, WeekId, WriteBatch};
///
/// let week: WeekId = "2024-W23".parse().unwrap();
/// let doc = DocumentRef::employee_shifts("loc_1", &week, "emp_001");
///
/// let mut batch = WriteBatch::new();
/// batch.set_field(doc.clone(), "shifts.1-abc.status", FieldOp::Set("draft".into()));
/// batch.set_field(doc, "updatedAt", FieldOp::ServerTimestamp);
/// assert_eq!(batch.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch {
    writes: BTreeMap<DocumentRef, BTreeMap<String, FieldOp>>,
}

impl WriteBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a mutation of one field path in one document. A later
    /// mutation of the same field in the same document replaces the
    /// earlier one.
    pub fn set_field(&mut self, doc: DocumentRef, field_path: impl Into<String>, op: FieldOp) {
        self.writes
            .entry(doc)
            .or_default()
            .insert(field_path.into(), op);
    }

    /// Returns the mutations recorded for a document, if any.
    pub fn document(&self, doc: &DocumentRef) -> Option<&BTreeMap<String, FieldOp>> {
        self.writes.get(doc)
    }

    /// Iterates over all documents and their mutations.
    pub fn documents(&self) -> impl Iterator<Item = (&DocumentRef, &BTreeMap<String, FieldOp>)> {
        self.writes.iter()
    }

    /// Total number of field mutations across all documents.
    pub fn len(&self) -> usize {
        self.writes.values().map(BTreeMap::len).sum()
    }

    /// Returns true if no mutation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}
