//! Entity record representation.
//!
//! A [`Record`] is one generated entity: an identifier plus an open set of
//! named fields. Every engine stage (generation, filtering, sorting,
//! storage) works on records without knowing the entity kind.

use crate::value::FieldValue;
use serde::Serialize;
use std::collections::HashMap;

/// A single generated entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Position in the generated batch (for reproducibility; not serialized)
    #[serde(skip)]
    pub index: u64,

    /// Identifier value, unique within a collection
    pub id: FieldValue,

    /// Field values (field name -> value), flattened on serialization
    #[serde(flatten)]
    pub fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Create a new record.
    pub fn new(index: u64, id: FieldValue, fields: HashMap<String, FieldValue>) -> Self {
        Self { index, id, fields }
    }

    /// Create a new record with a builder pattern.
    pub fn builder(index: u64, id: FieldValue) -> RecordBuilder {
        RecordBuilder {
            index,
            id,
            fields: HashMap::new(),
        }
    }

    /// Get a field value by name.
    ///
    /// `"id"` resolves to the identifier, so query stages can address the
    /// id and ordinary fields uniformly.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        if name == "id" {
            Some(&self.id)
        } else {
            self.fields.get(name)
        }
    }

    /// Get the number of fields (excluding the id).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Project the record to a flat JSON object (`id` plus all fields).
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("id".to_string(), self.id.to_json());
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

/// Builder for [`Record`].
pub struct RecordBuilder {
    index: u64,
    id: FieldValue,
    fields: HashMap<String, FieldValue>,
}

impl RecordBuilder {
    /// Add a field to the record.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Build the record.
    pub fn build(self) -> Record {
        Record {
            index: self.index,
            id: self.id,
            fields: self.fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = Record::builder(0, FieldValue::from("dev-1"))
            .field("name", "Alpha")
            .field("age", 30)
            .build();

        assert_eq!(record.index, 0);
        assert_eq!(record.id, FieldValue::from("dev-1"));
        assert_eq!(record.field_count(), 2);
        assert_eq!(record.get("name"), Some(&FieldValue::from("Alpha")));
        assert_eq!(record.get("age"), Some(&FieldValue::Int(30)));
    }

    #[test]
    fn test_get_resolves_id() {
        let record = Record::builder(3, FieldValue::Int(7)).build();
        assert_eq!(record.get("id"), Some(&FieldValue::Int(7)));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_json_projection_is_flat() {
        let record = Record::builder(0, FieldValue::from("c-1"))
            .field("status", "online")
            .build();

        let json = record.to_json();
        assert_eq!(json["id"], serde_json::json!("c-1"));
        assert_eq!(json["status"], serde_json::json!("online"));
        assert!(json.get("fields").is_none());

        // The serde view matches the explicit projection
        let via_serde = serde_json::to_value(&record).unwrap();
        assert_eq!(via_serde, json);
    }
}
