//! Change notifications.

use log::info;

use crate::filter::FilterSet;
use crate::sort::SortKey;

/// Receives notifications when a [`DataGrid`](crate::engine::DataGrid)
/// dispatch changes the sort, the filters or the selection.
///
/// Every method has a no-op default, so implementors override only what they
/// care about. Notifications are fire-and-forget: they cannot veto or alter
/// the new state.
pub trait GridObserver<T>: Send + Sync {
    /// Called with the new sort keys, in priority order.
    fn on_sort(&self, _sorts: &[SortKey]) {}

    /// Called with the new column filters and global search text after
    /// either of them changed.
    fn on_filter(&self, _filters: &FilterSet, _global_text: &str) {}

    /// Called with the selected rows, in collection order.
    fn on_row_select(&self, _rows: &[&T]) {}
}

/// An observer that logs every notification at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<T> GridObserver<T> for LogObserver {
    fn on_sort(&self, sorts: &[SortKey]) {
        let keys: Vec<String> = sorts
            .iter()
            .map(|k| format!("{}:{:?}", k.column_id, k.direction))
            .collect();
        info!("Sort changed: [{}]", keys.join(", "));
    }

    fn on_filter(&self, filters: &FilterSet, global_text: &str) {
        info!(
            "Filters changed: {} active, search '{}'",
            filters.len(),
            global_text
        );
    }

    fn on_row_select(&self, rows: &[&T]) {
        info!("Selection changed: {} rows", rows.len());
    }
}
