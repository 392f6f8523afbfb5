//! Record-level filter predicates.

use standin_core::{FieldValue, RangeFilter, Record};
use std::cmp::Ordering;

/// Case-insensitive keyword match across the configured fields.
///
/// Text fields match on substring; array fields match when any element
/// does. An absent or empty keyword matches every record.
pub(crate) fn matches_keyword(record: &Record, fields: &[String], keyword: Option<&str>) -> bool {
    let Some(keyword) = keyword else {
        return true;
    };
    if keyword.is_empty() {
        return true;
    }

    let needle = keyword.to_lowercase();
    fields
        .iter()
        .any(|field| record.get(field).is_some_and(|value| contains(value, &needle)))
}

fn contains(value: &FieldValue, needle: &str) -> bool {
    match value {
        FieldValue::Text(text) => text.to_lowercase().contains(needle),
        FieldValue::Array(items) => items.iter().any(|item| contains(item, needle)),
        _ => false,
    }
}

/// Exact equality filter with the engine's cross-type coercion.
///
/// Values that `FieldValue::compare` can order count as equal when the
/// ordering is `Equal` (so `Int(100)` matches `Float(100.0)`); unrelated
/// types fall back to structural equality. Records missing the field are
/// excluded.
pub(crate) fn matches_exact(record: &Record, field: &str, expected: &FieldValue) -> bool {
    match record.get(field) {
        Some(actual) => match actual.compare(expected) {
            Some(ordering) => ordering == Ordering::Equal,
            None => actual == expected,
        },
        None => false,
    }
}

/// Inclusive range filter.
///
/// Records missing the field, or whose value cannot be compared against
/// a bound, are excluded.
pub(crate) fn matches_range(record: &Record, range: &RangeFilter) -> bool {
    let Some(value) = record.get(&range.field) else {
        return false;
    };

    if let Some(min) = &range.min {
        match value.compare(min) {
            Some(Ordering::Less) | None => return false,
            _ => {}
        }
    }
    if let Some(max) = &range.max {
        match value.compare(max) {
            Some(Ordering::Greater) | None => return false,
            _ => {}
        }
    }
    true
}
