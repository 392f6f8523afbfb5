//! Field schemas for response validation.

use serde_json::Value;
use std::fmt;

/// JSON type a field is expected to carry.
///
/// Arrays are their own type here, unlike the loose `typeof` view where
/// they collapse into `object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Number,
    String,
    Boolean,
    Object,
    Array,
}

impl FieldType {
    /// Whether `value` carries this type.
    pub fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Number, Value::Number(_))
                | (Self::String, Value::String(_))
                | (Self::Boolean, Value::Bool(_))
                | (Self::Object, Value::Object(_))
                | (Self::Array, Value::Array(_))
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        };
        write!(f, "{name}")
    }
}

/// Name of the type `value` actually carries.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Contract for one field of a response object.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    /// Field name in the response object
    pub name: String,
    /// Expected JSON type
    pub expected: FieldType,
    /// Required fields must be present; optional ones are checked only
    /// when present
    pub required: bool,
    /// Whether JSON `null` satisfies the contract
    pub nullable: bool,
    /// Allowed values for enum-constrained string fields (empty = any)
    pub enum_values: Vec<String>,
    /// Sub-schemas checked recursively when the field is an object
    pub nested: Vec<FieldSchema>,
}

impl FieldSchema {
    /// A field that must be present with the expected type.
    pub fn required(name: impl Into<String>, expected: FieldType) -> Self {
        Self {
            name: name.into(),
            expected,
            required: true,
            nullable: false,
            enum_values: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// A field checked only when present.
    pub fn optional(name: impl Into<String>, expected: FieldType) -> Self {
        Self {
            required: false,
            ..Self::required(name, expected)
        }
    }

    /// Accept JSON `null` as a valid value.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Constrain a string field to a fixed set of values.
    pub fn one_of(mut self, values: &[&str]) -> Self {
        self.enum_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Check object fields against `fields` recursively.
    pub fn nested(mut self, fields: Vec<FieldSchema>) -> Self {
        self.nested = fields;
        self
    }
}

/// Contract for the uniform `{code, message, data, timestamp}` envelope.
///
/// `data` is an object that may be `null` (error envelopes carry no
/// payload).
pub fn envelope_schema() -> Vec<FieldSchema> {
    vec![
        FieldSchema::required("code", FieldType::Number),
        FieldSchema::required("message", FieldType::String),
        FieldSchema::required("data", FieldType::Object).nullable(),
    ]
}
