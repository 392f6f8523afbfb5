//! Query pipeline: keyword search, filters, sort and pagination.
//!
//! A [`QueryEngine`] executes a declarative `Query` against a slice of
//! records in a fixed stage order: keyword match, exact filters, range
//! filters, sort, paginate. The input is never mutated; the engine
//! clones only the records that end up on the returned page.

mod filter;
mod sort;

use standin_core::{Page, Query, Record};
use std::collections::BTreeMap;

/// Page size used when a query does not name one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Executes queries against record collections.
///
/// The engine is configured per collection with the fields keyword
/// search scans and the default page size.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    keyword_fields: Vec<String>,
    default_page_size: u64,
}

impl QueryEngine {
    /// Create an engine whose keyword search scans `keyword_fields`.
    pub fn new(keyword_fields: &[&str]) -> Self {
        Self {
            keyword_fields: keyword_fields.iter().map(|f| f.to_string()).collect(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Override the page size used when a query does not set one.
    pub fn with_default_page_size(mut self, page_size: u64) -> Self {
        self.default_page_size = page_size;
        self
    }

    pub fn default_page_size(&self) -> u64 {
        self.default_page_size
    }

    pub fn keyword_fields(&self) -> &[String] {
        &self.keyword_fields
    }

    /// Run `query` over `records` and return the requested page.
    ///
    /// Stages apply in order: keyword, exact filters, range filters,
    /// sort, paginate. `total` on the returned page counts the records
    /// that survived filtering, not the page slice.
    pub fn run(&self, records: &[Record], query: &Query) -> Page<Record> {
        let mut hits: Vec<&Record> = records
            .iter()
            .filter(|record| self.matches(record, query))
            .collect();

        if let Some(sort_by) = &query.sort_by {
            sort::sort_refs(&mut hits, sort_by, query.sort_order);
        }

        let (page, page_size) = query.normalize(self.default_page_size);
        Page::paginate(hits, page, page_size).map(Record::clone)
    }

    fn matches(&self, record: &Record, query: &Query) -> bool {
        filter::matches_keyword(record, &self.keyword_fields, query.keyword.as_deref())
            && query
                .filters
                .iter()
                .all(|(field, value)| filter::matches_exact(record, field, value))
            && query
                .ranges
                .iter()
                .all(|range| filter::matches_range(record, range))
    }
}

/// Count records per distinct value of `field`.
///
/// Text values tally under the text itself, other values under their
/// JSON rendering. Records missing the field, or holding null, count
/// toward nothing.
pub fn tally(records: &[Record], field: &str) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();
    for record in records {
        let Some(value) = record.get(field) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        let key = match value.as_str() {
            Some(text) => text.to_string(),
            None => value.to_json().to_string(),
        };
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}
