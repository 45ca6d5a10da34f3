use std::ops::Range;

use crate::column::RowId;
use crate::page::PageInfo;
use crate::page::Pagination;
use crate::selection::HeaderCheckbox;
use crate::selection::SelectionFlags;

/// The result of evaluating a query: the filtered and sorted rows, the
/// current page slice, and the derived pagination and selection state.
///
/// Rows are borrowed from the collection the view was evaluated over.
#[derive(Debug, Clone)]
pub struct GridView<'a, T> {
    rows: Vec<&'a T>,
    range: Range<usize>,
    pagination: Pagination,
    page_row_ids: Vec<RowId>,
    selection: SelectionFlags,
    visible_columns: Vec<String>,
}

impl<'a, T> GridView<'a, T> {
    pub(crate) fn new(
        rows: Vec<&'a T>,
        range: Range<usize>,
        pagination: Pagination,
        page_row_ids: Vec<RowId>,
        selection: SelectionFlags,
        visible_columns: Vec<String>,
    ) -> Self {
        Self {
            rows,
            range,
            pagination,
            page_row_ids,
            selection,
            visible_columns,
        }
    }

    /// Rows on the current page, in sorted order.
    pub fn visible_rows(&self) -> &[&'a T] {
        &self.rows[self.range.clone()]
    }

    /// Every row that passed the filters, in sorted order.
    pub fn filtered_rows(&self) -> &[&'a T] {
        &self.rows
    }

    /// Number of rows that passed the filters.
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn page_count(&self) -> usize {
        self.pagination.page_count()
    }

    /// Pagination clamped to this view's total.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn page_info(&self) -> PageInfo {
        self.pagination.info()
    }

    /// Ids of the rows on the current page, in display order.
    pub fn page_row_ids(&self) -> &[RowId] {
        &self.page_row_ids
    }

    pub fn selection_flags(&self) -> SelectionFlags {
        self.selection
    }

    pub fn header_checkbox(&self) -> HeaderCheckbox {
        self.selection.header
    }

    /// Ids of the effectively visible columns, in declaration order.
    pub fn visible_columns(&self) -> &[String] {
        &self.visible_columns
    }

    /// Returns `true` if no row passed the filters.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
