//! Caller-owned in-memory record store.
//!
//! A [`MemoryStore`] holds one collection of records in insertion order.
//! There is no global state: every test or run constructs its own store
//! and hands it to the facade that needs it.

use standin_core::{FieldValue, Record};
use std::collections::HashMap;

/// Errors for store writes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Insert with an id the store already holds
    #[error("duplicate id: {0}")]
    DuplicateId(String),
}

/// In-memory record collection with id-keyed access.
///
/// Records keep their insertion order, which is the default order the
/// query pipeline preserves for unsorted queries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a generated batch.
    ///
    /// The batch is trusted to have distinct ids, which generated ids
    /// are by construction.
    pub fn with_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Insert a record, rejecting duplicate ids.
    pub fn insert(&mut self, record: Record) -> Result<(), StoreError> {
        if self.records.iter().any(|existing| existing.id == record.id) {
            return Err(StoreError::DuplicateId(id_display(&record.id)));
        }
        self.records.push(record);
        Ok(())
    }

    /// Look up a record by id.
    pub fn get(&self, id: &FieldValue) -> Option<&Record> {
        self.records.iter().find(|record| &record.id == id)
    }

    /// Merge `fields` into the record with `id`.
    ///
    /// Unknown field names are added, existing ones overwritten; an `id`
    /// key in `fields` is ignored so updates cannot change identity.
    /// Returns `None` when no record has that id.
    pub fn update(
        &mut self,
        id: &FieldValue,
        fields: HashMap<String, FieldValue>,
    ) -> Option<&Record> {
        let position = self.records.iter().position(|record| &record.id == id)?;
        let record = &mut self.records[position];
        for (name, value) in fields {
            if name == "id" {
                continue;
            }
            record.fields.insert(name, value);
        }
        Some(&self.records[position])
    }

    /// Remove and return the record with `id`.
    pub fn remove(&mut self, id: &FieldValue) -> Option<Record> {
        let position = self.records.iter().position(|record| &record.id == id)?;
        Some(self.records.remove(position))
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

/// Render an id for error messages.
pub(crate) fn id_display(id: &FieldValue) -> String {
    match id.as_str() {
        Some(text) => text.to_string(),
        None => id.to_json().to_string(),
    }
}
