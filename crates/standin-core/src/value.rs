//! Value representation for the standin mock data engine.
//!
//! This module defines the dynamic field value type shared by the
//! generator, the query pipeline and the in-memory store.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Dynamic field value.
///
/// `FieldValue` represents a single field of a generated entity. It is the
/// type-agnostic currency of the whole engine: generators produce it, the
/// query pipeline filters and sorts over it, and the response layer projects
/// it to JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Null / absent value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    Text(String),

    /// Date/time with timezone
    DateTime(DateTime<Utc>),

    /// Array of values
    Array(Vec<FieldValue>),

    /// Object/map of values
    Object(HashMap<String, FieldValue>),
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a number, coercing integers to f64.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a DateTime.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Try to get this value as an array.
    pub fn as_array(&self) -> Option<&Vec<FieldValue>> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get this value as an object.
    pub fn as_object(&self) -> Option<&HashMap<String, FieldValue>> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Compare two values for ordering, coercing across related types.
    ///
    /// Integers and floats compare numerically. Datetimes compare by
    /// timestamp, including against strings that parse as RFC 3339 or
    /// `YYYY-MM-DD` dates. Strings compare lexicographically by byte
    /// order. Unrelated types (and NaN) return `None` so callers can
    /// apply their own missing-value policy.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).partial_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::DateTime(b)) => Some(a.cmp(b)),
            (Self::DateTime(a), Self::Text(s)) => parse_datetime(s).map(|b| a.cmp(&b)),
            (Self::Text(s), Self::DateTime(b)) => parse_datetime(s).map(|a| a.cmp(b)),
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Project this value to JSON.
    ///
    /// Datetimes render as RFC 3339 with millisecond precision; floats
    /// that JSON cannot represent (NaN, infinities) render as null.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::Number((*i).into()),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Self::Text(s) => Value::String(s.clone()),
            Self::DateTime(dt) => {
                Value::String(dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Self::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

// Serializes through the JSON projection so datetimes always render the
// same way regardless of the serialization path.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Date-only form used by dashboard range pickers
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| DateTime::from_naive_utc_and_offset(ndt, Utc))
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::DateTime(v)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(v: Vec<FieldValue>) -> Self {
        Self::Array(v)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(0.0)),
            },
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_accessors() {
        assert_eq!(FieldValue::Bool(true).as_bool(), Some(true));
        assert_eq!(FieldValue::Int(42).as_i64(), Some(42));
        assert_eq!(FieldValue::Float(3.5).as_f64(), Some(3.5));
        assert_eq!(FieldValue::from("test").as_str(), Some("test"));
        assert!(FieldValue::Null.is_null());

        // Numeric coercion
        assert_eq!(FieldValue::Int(42).as_number(), Some(42.0));
        assert_eq!(FieldValue::Bool(true).as_i64(), None);
    }

    #[test]
    fn test_numeric_compare_coerces_int_and_float() {
        let a = FieldValue::Int(5);
        let b = FieldValue::Float(5.0);
        assert_eq!(a.compare(&b), Some(Ordering::Equal));

        let c = FieldValue::Float(4.5);
        assert_eq!(a.compare(&c), Some(Ordering::Greater));
    }

    #[test]
    fn test_datetime_compares_against_date_strings() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let v = FieldValue::DateTime(dt);

        assert_eq!(
            v.compare(&FieldValue::from("2024-06-01")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            v.compare(&FieldValue::from("2024-06-15T12:00:00Z")),
            Some(Ordering::Equal)
        );
        assert_eq!(v.compare(&FieldValue::from("not a date")), None);
    }

    #[test]
    fn test_unrelated_types_do_not_compare() {
        assert_eq!(FieldValue::Int(1).compare(&FieldValue::from("1")), None);
        assert_eq!(FieldValue::Null.compare(&FieldValue::Null), None);
    }

    #[test]
    fn test_json_projection() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let v = FieldValue::Object(HashMap::from([
            ("n".to_string(), FieldValue::Int(7)),
            ("when".to_string(), FieldValue::DateTime(dt)),
        ]));

        let json = v.to_json();
        assert_eq!(json["n"], serde_json::json!(7));
        assert_eq!(json["when"], serde_json::json!("2024-01-02T03:04:05.000Z"));
    }

    #[test]
    fn test_from_json_round_trip() {
        let json = serde_json::json!({"a": 1, "b": [true, null], "c": 1.5});
        let v = FieldValue::from(json.clone());
        assert_eq!(v.to_json(), json);
    }
}
