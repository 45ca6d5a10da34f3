//! The evaluation pipeline and the grid facade.

mod grid;
mod view;

pub use grid::DataGrid;
pub use view::GridView;

use log::trace;

use crate::accessor::resolve_row_id;
use crate::column::ColumnRegistry;
use crate::column::RowId;
use crate::column::RowIdAccessor;
use crate::filter;
use crate::filter::GlobalSearch;
use crate::model::Row;
use crate::query::QueryState;
use crate::sort;

/// Computes the view of `rows` under `query`.
///
/// Stages run in a fixed order: global text search over the visible columns,
/// then column filters, then the stable sort. The page is clamped to the
/// filtered total before slicing, so a stale page index in `query` can never
/// produce an out-of-range slice. `rows` is never modified.
pub fn evaluate<'a, T: Row>(
    rows: &'a [T],
    columns: &ColumnRegistry<T>,
    row_id: &RowIdAccessor<T>,
    query: &QueryState,
) -> GridView<'a, T> {
    run(rows, columns, row_id, query, true)
}

pub(crate) fn run<'a, T: Row>(
    rows: &'a [T],
    columns: &ColumnRegistry<T>,
    row_id: &RowIdAccessor<T>,
    query: &QueryState,
    global_search: bool,
) -> GridView<'a, T> {
    let filtered = filter_rows(rows, columns, query, global_search);
    trace!("{} of {} rows pass the filters", filtered.len(), rows.len());

    let sorted = sort::sort(filtered, query.sorts(), columns);

    let pagination = query.pagination().with_total(sorted.len());
    let range = pagination.range();
    trace!(
        "Showing rows {}..{} on page {} of {}",
        range.start,
        range.end,
        pagination.page(),
        pagination.page_count()
    );

    let page_row_ids: Vec<RowId> = sorted[range.clone()]
        .iter()
        .map(|row| resolve_row_id(*row, row_id))
        .collect();
    let selection = query.selection().flags(&page_row_ids);
    let visible_columns = query
        .visibility()
        .visible_columns(columns)
        .iter()
        .map(|c| c.id().to_string())
        .collect();

    GridView::new(sorted, range, pagination, page_row_ids, selection, visible_columns)
}

/// Applies the global search and the column filters, keeping input order.
pub(crate) fn filter_rows<'a, T: Row>(
    rows: &'a [T],
    columns: &ColumnRegistry<T>,
    query: &QueryState,
    global_search: bool,
) -> Vec<&'a T> {
    let search = if global_search {
        GlobalSearch::new(query.global_text())
    } else {
        GlobalSearch::new("")
    };
    let visible = query.visibility().visible_columns(columns);

    rows.iter()
        .filter(|row| search.matches(*row, &visible))
        .filter(|row| filter::matches(*row, query.filters(), columns))
        .collect()
}
