//! Stable record ordering for the query pipeline.

use standin_core::{Record, SortOrder};
use std::cmp::Ordering;

/// Sort record references by one field, stably.
///
/// Records missing the sort key sink to the end in both directions, and
/// pairs `FieldValue::compare` cannot order keep their relative order.
pub(crate) fn sort_refs(records: &mut [&Record], field: &str, order: SortOrder) {
    records.sort_by(|a, b| compare_by_field(a, b, field, order));
}

fn compare_by_field(a: &Record, b: &Record, field: &str, order: SortOrder) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(x), Some(y)) => {
            let ordering = x.compare(y).unwrap_or(Ordering::Equal);
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
