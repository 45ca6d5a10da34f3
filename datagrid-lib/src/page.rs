//! Pagination state and page arithmetic.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Page position within a result set.
///
/// `page` is 0-based and always lies in `[0, max(0, page_count - 1)]`:
/// every method that changes `total` or `page_size` re-clamps it. A page size
/// of 0 is coerced to 1.
///
/// # Example
///
/// ```
/// use datagrid_lib::page::Pagination;
///
/// let pagination = Pagination::new(2).with_total(5);
/// assert_eq!(pagination.page_count(), 3);
///
/// let last = pagination.with_page(7);
/// assert_eq!(last.page(), 2);
/// assert_eq!(last.range(), 4..5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPagination")]
pub struct Pagination {
    page: usize,
    page_size: usize,
    total: usize,
}

/// Stored pagination, re-validated on load.
#[derive(Deserialize)]
struct RawPagination {
    page: usize,
    page_size: usize,
    total: usize,
}

impl From<RawPagination> for Pagination {
    fn from(raw: RawPagination) -> Self {
        Pagination::new(raw.page_size)
            .with_total(raw.total)
            .with_page(raw.page)
    }
}

impl Pagination {
    /// Creates pagination on the first page of an empty result.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    /// Returns the 0-based page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the size of the result set being paged.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of pages; 0 for an empty result.
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }

    /// Returns the index of the last page; 0 for an empty result.
    pub fn last_index(&self) -> usize {
        self.page_count().saturating_sub(1)
    }

    /// Returns a copy with a new total, re-clamping the page.
    pub fn with_total(mut self, total: usize) -> Self {
        self.total = total;
        self.clamped()
    }

    /// Returns a copy with a new page size, re-clamping the page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.clamped()
    }

    /// Returns a copy positioned on `page`, clamped to the last page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self.clamped()
    }

    /// Moves to the next page, staying put on the last one.
    pub fn next_page(self) -> Self {
        let page = self.page.saturating_add(1);
        self.with_page(page)
    }

    /// Moves to the previous page, staying put on the first one.
    pub fn previous_page(self) -> Self {
        let page = self.page.saturating_sub(1);
        self.with_page(page)
    }

    /// Moves to the first page.
    pub fn first_page(self) -> Self {
        self.with_page(0)
    }

    /// Moves to the last page.
    pub fn last_page(self) -> Self {
        let page = self.last_index();
        self.with_page(page)
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.last_index()
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    /// Returns the index range of the current page within the result set.
    pub fn range(&self) -> Range<usize> {
        let start = self.page.saturating_mul(self.page_size).min(self.total);
        let end = start.saturating_add(self.page_size).min(self.total);
        start..end
    }

    /// Returns the 1-based bounds of the current page for display.
    pub fn info(&self) -> PageInfo {
        let range = self.range();
        if range.is_empty() {
            PageInfo {
                first: 0,
                last: 0,
                total: self.total,
            }
        } else {
            PageInfo {
                first: range.start + 1,
                last: range.end,
                total: self.total,
            }
        }
    }

    fn clamped(mut self) -> Self {
        self.page = self.page.min(self.last_index());
        self
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(crate::config::GridConfig::DEFAULT_PAGE_SIZE)
    }
}

/// 1-based page bounds, as in "showing 11–20 of 53". Both bounds are 0 when
/// the result set is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(Pagination::new(2).with_total(5).page_count(), 3);
        assert_eq!(Pagination::new(5).with_total(5).page_count(), 1);
        assert_eq!(Pagination::new(5).with_total(0).page_count(), 0);
    }

    #[test]
    fn test_zero_page_size_is_coerced() {
        assert_eq!(Pagination::new(0).page_size(), 1);
        assert_eq!(Pagination::new(10).with_page_size(0).page_size(), 1);
    }

    #[test]
    fn test_slices_cover_result_set() {
        let pagination = Pagination::new(2).with_total(5);
        let sizes: Vec<usize> = (0..pagination.page_count())
            .map(|page| pagination.with_page(page).range().len())
            .collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_shrinking_total_clamps_page() {
        let pagination = Pagination::new(10).with_total(95).with_page(9);
        assert_eq!(pagination.page(), 9);

        let shrunk = pagination.with_total(25);
        assert_eq!(shrunk.page(), 2);

        let empty = shrunk.with_total(0);
        assert_eq!(empty.page(), 0);
        assert_eq!(empty.range(), 0..0);
    }

    #[test]
    fn test_growing_page_size_clamps_page() {
        let pagination = Pagination::new(5).with_total(30).with_page(5);
        assert_eq!(pagination.with_page_size(25).page(), 1);
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let pagination = Pagination::new(10).with_total(25);
        assert_eq!(pagination.previous_page().page(), 0);
        assert_eq!(pagination.next_page().next_page().next_page().page(), 2);
        assert_eq!(pagination.last_page().page(), 2);
        assert_eq!(pagination.last_page().first_page().page(), 0);
        assert!(pagination.has_next());
        assert!(!pagination.has_previous());
        assert!(!pagination.last_page().has_next());
    }

    #[test]
    fn test_deserialize_coerces_zero_page_size() {
        let pagination: Pagination =
            serde_json::from_str(r#"{"page": 0, "page_size": 0, "total": 5}"#).unwrap();
        assert_eq!(pagination.page_size(), 1);
        assert_eq!(pagination.page_count(), 5);
        assert_eq!(pagination.range(), 0..1);
    }

    #[test]
    fn test_deserialize_clamps_page() {
        let pagination: Pagination =
            serde_json::from_str(r#"{"page": 40, "page_size": 10, "total": 25}"#).unwrap();
        assert_eq!(pagination.page(), 2);

        let json = serde_json::to_string(&pagination).unwrap();
        assert_eq!(serde_json::from_str::<Pagination>(&json).unwrap(), pagination);
    }

    #[test]
    fn test_info() {
        let pagination = Pagination::new(10).with_total(53).with_page(1);
        assert_eq!(pagination.info(), PageInfo { first: 11, last: 20, total: 53 });
        assert_eq!(
            pagination.with_total(0).info(),
            PageInfo { first: 0, last: 0, total: 0 }
        );
    }
}
