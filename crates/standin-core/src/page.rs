//! Paginated result envelope.

use serde::Serialize;

/// One page of a filtered collection.
///
/// Serializes in the shape the dashboards consume:
/// `{list, total, page, pageSize, totalPages}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The records on this page
    pub list: Vec<T>,

    /// Total records after filtering, across all pages
    pub total: u64,

    /// 1-based page number
    pub page: u64,

    /// Requested page size
    pub page_size: u64,

    /// Total number of pages (`ceil(total / page_size)`)
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Slice `items` down to the requested page.
    ///
    /// `page` and `page_size` are 1-based and must already be normalized
    /// (see `Query::normalize`); values below 1 are clamped. A page past
    /// the end yields an empty `list` with `total` and `total_pages`
    /// still describing the whole collection, so:
    ///
    /// `list.len() == min(page_size, max(0, total - (page - 1) * page_size))`
    pub fn paginate(items: Vec<T>, page: u64, page_size: u64) -> Self {
        debug_assert!(page >= 1, "page is 1-based");
        debug_assert!(page_size >= 1, "page_size must be positive");
        let page = page.max(1);
        let page_size = page_size.max(1);

        let total = items.len() as u64;
        let total_pages = total.div_ceil(page_size);
        let start = (page - 1).saturating_mul(page_size);

        let list = items
            .into_iter()
            .skip(start as usize)
            .take(page_size as usize)
            .collect();

        Self {
            list,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    /// Map the records on this page, keeping the pagination fields.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            list: self.list.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
