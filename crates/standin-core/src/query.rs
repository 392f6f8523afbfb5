//! Query descriptor for the filter/sort/paginate pipeline.
//!
//! A [`Query`] is a declarative description of one list request: an
//! optional keyword, exact filters, inclusive range constraints, a sort
//! key and pagination. It never executes anything itself.

use crate::error::ConfigError;
use crate::value::FieldValue;
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

/// Inclusive range constraint on one field. Open bounds are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    /// Field the constraint applies to
    pub field: String,
    /// Inclusive lower bound
    pub min: Option<FieldValue>,
    /// Inclusive upper bound
    pub max: Option<FieldValue>,
}

/// Declarative description of one list query.
///
/// Pagination follows the permissive mock-server contract: a `page` of 0
/// means "first page" and a `page_size` of 0 or `None` means "use the
/// collection default" (see [`Query::normalize`]). Callers that want
/// malformed input rejected instead call [`Query::validate`] first.
/// Negative values cannot be expressed at all; the types rule them out.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Keyword matched case-insensitively across the collection's
    /// configured keyword fields; `None` or empty matches everything
    pub keyword: Option<String>,

    /// Exact equality filters, all of which must hold
    pub filters: Vec<(String, FieldValue)>,

    /// Inclusive range constraints, all of which must hold
    pub ranges: Vec<RangeFilter>,

    /// Sort key; `None` preserves the collection's default order
    pub sort_by: Option<String>,

    /// Sort direction (ignored without `sort_by`)
    pub sort_order: SortOrder,

    /// 1-based page number
    pub page: u64,

    /// Page size; `None` uses the collection default
    pub page_size: Option<u64>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            keyword: None,
            filters: Vec::new(),
            ranges: Vec::new(),
            sort_by: None,
            sort_order: SortOrder::default(),
            page: 1,
            page_size: None,
        }
    }
}

impl Query {
    /// Create an empty query (first page, default page size, no filters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keyword.
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Add an exact equality filter.
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Add an inclusive range constraint.
    pub fn range(
        mut self,
        field: impl Into<String>,
        min: impl Into<FieldValue>,
        max: impl Into<FieldValue>,
    ) -> Self {
        self.ranges.push(RangeFilter {
            field: field.into(),
            min: Some(min.into()),
            max: Some(max.into()),
        });
        self
    }

    /// Add a lower-bounded range constraint.
    pub fn range_from(mut self, field: impl Into<String>, min: impl Into<FieldValue>) -> Self {
        self.ranges.push(RangeFilter {
            field: field.into(),
            min: Some(min.into()),
            max: None,
        });
        self
    }

    /// Add an upper-bounded range constraint.
    pub fn range_to(mut self, field: impl Into<String>, max: impl Into<FieldValue>) -> Self {
        self.ranges.push(RangeFilter {
            field: field.into(),
            min: None,
            max: Some(max.into()),
        });
        self
    }

    /// Set the sort key and direction.
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = order;
        self
    }

    /// Set the page number (1-based).
    pub fn page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Resolve the effective `(page, page_size)` pair.
    ///
    /// A zero page becomes 1 and a zero or absent page size becomes
    /// `default_page_size`, mirroring how the dashboards treat falsy
    /// pagination parameters.
    pub fn normalize(&self, default_page_size: u64) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let page_size = match self.page_size {
            None | Some(0) => default_page_size,
            Some(n) => n,
        };
        (page, page_size)
    }

    /// Reject malformed queries instead of normalizing them.
    ///
    /// Strict counterpart to [`Query::normalize`] for callers that treat
    /// out-of-contract pagination or empty ranges as configuration
    /// errors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page == 0 {
            return Err(ConfigError::InvalidQuery(
                "page must be at least 1".to_string(),
            ));
        }
        if self.page_size == Some(0) {
            return Err(ConfigError::InvalidQuery(
                "page size must be at least 1".to_string(),
            ));
        }
        for range in &self.ranges {
            if let (Some(min), Some(max)) = (&range.min, &range.max) {
                if min.compare(max) == Some(Ordering::Greater) {
                    return Err(ConfigError::InvalidQuery(format!(
                        "empty range on field {}",
                        range.field
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let query = Query::new();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, None);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_normalize_treats_zero_as_unset() {
        let query = Query::new().page(0).page_size(0);
        assert_eq!(query.normalize(20), (1, 20));

        let query = Query::new().page(3).page_size(50);
        assert_eq!(query.normalize(20), (3, 50));
    }

    #[test]
    fn test_validate_rejects_zero_page() {
        let err = Query::new().page(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidQuery(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let query = Query::new().range("price", 100, 10);
        let err = query.validate().unwrap_err();
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_validate_accepts_open_ranges() {
        let query = Query::new()
            .range_from("created_at", "2024-01-01")
            .range_to("price", 500);
        assert!(query.validate().is_ok());
    }
}
