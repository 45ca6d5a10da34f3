use log::debug;
use serde::Deserialize;
use serde::Serialize;

use super::QueryAction;
use crate::column::Column;
use crate::column::ColumnRegistry;
use crate::column::Visibility;
use crate::filter::Filter;
use crate::filter::FilterSet;
use crate::page::Pagination;
use crate::selection::Selection;
use crate::sort::SortKeys;

/// Everything the user has asked of a grid: filters, sort, page, column
/// visibility and selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryState {
    filters: FilterSet,
    sorts: SortKeys,
    global_text: String,
    pagination: Pagination,
    visibility: Visibility,
    selection: Selection,
}

impl QueryState {
    /// Creates an empty query on the first page.
    pub fn new(page_size: usize) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sorts(&self) -> &SortKeys {
        &self.sorts
    }

    pub fn global_text(&self) -> &str {
        &self.global_text
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Returns whether a column is shown, taking session overrides into
    /// account.
    pub fn is_column_visible<T>(&self, column: &Column<T>) -> bool {
        self.visibility.is_visible(column)
    }

    /// Returns a copy whose pagination knows the current filtered total. The
    /// page is re-clamped.
    pub fn with_total(&self, total: usize) -> Self {
        let mut next = self.clone();
        next.pagination = next.pagination.with_total(total);
        next
    }

    /// Applies one action and returns the resulting state.
    ///
    /// Filter and sort actions naming an unknown column, or a column that
    /// does not allow the operation, leave the state unchanged. Any change to
    /// the filters or the global text sends the query back to the first page.
    ///
    /// Page navigation clamps against the total last recorded with
    /// [`with_total`](Self::with_total).
    pub fn reduce<T>(&self, action: QueryAction, columns: &ColumnRegistry<T>) -> Self {
        let mut next = self.clone();

        match action {
            QueryAction::SetFilter {
                column_id,
                value,
                filter_type,
            } => match columns.get(&column_id) {
                Some(column) if column.is_filterable() => {
                    let filter_type = filter_type.unwrap_or(column.default_filter_type());
                    next.filters = next
                        .filters
                        .with(Filter::new(column_id, value, filter_type));
                }
                _ => debug!("Ignoring filter on column '{}'", column_id),
            },
            QueryAction::ClearFilter { column_id } => {
                next.filters = next.filters.without(&column_id);
            }
            QueryAction::ClearFilters => next.filters = FilterSet::new(),
            QueryAction::SetGlobalText { text } => next.global_text = text,
            QueryAction::ToggleSort { column_id } => match columns.get(&column_id) {
                Some(column) if column.is_sortable() => {
                    next.sorts = next.sorts.toggle(&column_id);
                }
                _ => debug!("Ignoring sort on column '{}'", column_id),
            },
            QueryAction::SetSort {
                column_id,
                direction,
            } => match columns.get(&column_id) {
                Some(column) if column.is_sortable() => {
                    next.sorts = next.sorts.set(&column_id, direction);
                }
                _ => debug!("Ignoring sort on column '{}'", column_id),
            },
            QueryAction::ClearSorts => next.sorts = SortKeys::new(),
            QueryAction::SetPage { page } => next.pagination = next.pagination.with_page(page),
            QueryAction::NextPage => next.pagination = next.pagination.next_page(),
            QueryAction::PreviousPage => next.pagination = next.pagination.previous_page(),
            QueryAction::FirstPage => next.pagination = next.pagination.first_page(),
            QueryAction::LastPage => next.pagination = next.pagination.last_page(),
            QueryAction::SetPageSize { page_size } => {
                next.pagination = next.pagination.with_page_size(page_size);
            }
            QueryAction::SetColumnVisible { column_id, visible } => {
                if columns.contains(&column_id) {
                    next.visibility.set(column_id, visible);
                } else {
                    debug!("Ignoring visibility of unknown column '{}'", column_id);
                }
            }
            QueryAction::ResetVisibility => next.visibility.reset(),
            QueryAction::ToggleRow { id, selected } => {
                next.selection.toggle_row(&id, selected);
            }
            QueryAction::ToggleAllOnPage {
                selected,
                page_row_ids,
            } => {
                next.selection.toggle_all_on_page(selected, &page_row_ids);
            }
            QueryAction::ClearSelection => {
                next.selection.clear();
            }
        }

        // the global search only looks at visible columns
        let visibility_changed =
            next.visibility != self.visibility && !next.global_text.trim().is_empty();
        if next.filters != self.filters || next.global_text != self.global_text || visibility_changed
        {
            next.pagination = next.pagination.first_page();
        }

        next
    }
}
