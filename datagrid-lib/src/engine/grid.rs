use std::collections::HashSet;
use std::fmt;

use log::debug;

use super::GridView;
use super::filter_rows;
use super::run;
use crate::accessor::resolve_row_id;
use crate::column::ColumnRegistry;
use crate::column::RowIdAccessor;
use crate::config::GridConfig;
use crate::model::Row;
use crate::observer::GridObserver;
use crate::query::Concern;
use crate::query::QueryAction;
use crate::query::QueryState;

/// A row collection bound to its columns, identity and configuration.
///
/// `DataGrid` owns no query state. Callers hold the current
/// [`QueryState`] and pass it back in: [`dispatch`](Self::dispatch) returns
/// the next state, [`evaluate`](Self::evaluate) returns the view.
pub struct DataGrid<T> {
    rows: Vec<T>,
    columns: ColumnRegistry<T>,
    row_id: RowIdAccessor<T>,
    config: GridConfig,
    observer: Option<Box<dyn GridObserver<T>>>,
}

impl<T: Row> DataGrid<T> {
    /// Creates a grid with the default configuration.
    ///
    /// Row ids must be unique within `rows`; debug builds assert this.
    pub fn new(rows: Vec<T>, columns: ColumnRegistry<T>, row_id: RowIdAccessor<T>) -> Self {
        if cfg!(debug_assertions) {
            let mut seen = HashSet::with_capacity(rows.len());
            for row in &rows {
                let id = resolve_row_id(row, &row_id);
                debug_assert!(seen.insert(id.clone()), "Duplicate row id '{}'", id);
            }
        }
        debug!("Created grid with {} rows and {} columns", rows.len(), columns.len());
        Self {
            rows,
            columns,
            row_id,
            config: GridConfig::default(),
            observer: None,
        }
    }

    pub fn with_config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: impl GridObserver<T> + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &ColumnRegistry<T> {
        &self.columns
    }

    pub fn row_id(&self) -> &RowIdAccessor<T> {
        &self.row_id
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Returns a fresh query on the first page, sized by the config and
    /// aware of the unfiltered total.
    pub fn initial_state(&self) -> QueryState {
        QueryState::new(self.config.default_page_size).with_total(self.rows.len())
    }

    /// Computes the view of this grid's rows under `query`.
    pub fn evaluate(&self, query: &QueryState) -> GridView<'_, T> {
        run(
            &self.rows,
            &self.columns,
            &self.row_id,
            query,
            self.config.global_search,
        )
    }

    /// Applies `action` to `query` and returns the next state.
    ///
    /// The returned state carries the filtered total, so its page is already
    /// clamped. When the sort, the filters or the selection changed, the
    /// observer is notified after the new state is computed.
    pub fn dispatch(&self, query: &QueryState, action: QueryAction) -> QueryState {
        let concern = action.concern();
        let next = query.reduce(action, &self.columns);
        let total = filter_rows(&self.rows, &self.columns, &next, self.config.global_search).len();
        let next = next.with_total(total);

        if let Some(observer) = &self.observer {
            match concern {
                Concern::Sort if next.sorts() != query.sorts() => {
                    observer.on_sort(next.sorts().keys());
                }
                Concern::Filter
                    if next.filters() != query.filters()
                        || next.global_text() != query.global_text() =>
                {
                    observer.on_filter(next.filters(), next.global_text());
                }
                Concern::Selection if next.selection() != query.selection() => {
                    observer.on_row_select(&self.selected_rows(&next));
                }
                _ => {}
            }
        }

        next
    }

    /// Resolves the selection in `query` to rows, in collection order.
    /// Selected rows hidden by the filters are included.
    pub fn selected_rows(&self, query: &QueryState) -> Vec<&T> {
        query.selection().selected_rows(&self.rows, &self.row_id)
    }
}

impl<T> fmt::Debug for DataGrid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid")
            .field("rows", &self.rows.len())
            .field("columns", &self.columns)
            .field("row_id", &self.row_id)
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::column::Column;
    use crate::filter::FilterSet;
    use crate::model::Record;
    use crate::selection::HeaderCheckbox;
    use crate::sort::SortKey;

    #[derive(Default, Clone)]
    struct Recorder {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl GridObserver<Record> for Recorder {
        fn on_sort(&self, sorts: &[SortKey]) {
            self.events.lock().unwrap().push(format!("sort:{}", sorts.len()));
        }

        fn on_filter(&self, filters: &FilterSet, global_text: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("filter:{}:{}", filters.len(), global_text));
        }

        fn on_row_select(&self, rows: &[&Record]) {
            self.events.lock().unwrap().push(format!("select:{}", rows.len()));
        }
    }

    fn grid(count: i64) -> DataGrid<Record> {
        let rows = (1..=count)
            .map(|i| {
                Record::new()
                    .set("id", i)
                    .set("name", format!("row {}", i))
                    .set("even", i % 2 == 0)
            })
            .collect();
        let columns = ColumnRegistry::new([
            Column::new("name").path("name"),
            Column::new("even").path("even"),
        ])
        .unwrap();
        DataGrid::new(rows, columns, RowIdAccessor::path("id").unwrap())
    }

    #[test]
    fn test_initial_state_uses_config() {
        let grid = grid(30).with_config(GridConfig::default().with_default_page_size(25));
        let state = grid.initial_state();
        assert_eq!(state.pagination().page_size(), 25);
        assert_eq!(state.pagination().total(), 30);
        assert_eq!(grid.evaluate(&state).page_count(), 2);
    }

    #[test]
    fn test_dispatch_refreshes_total() {
        let grid = grid(30);
        let state = grid.dispatch(&grid.initial_state(), QueryAction::LastPage);
        assert_eq!(state.pagination().page(), 2);

        let state = grid.dispatch(&state, QueryAction::set_filter("even", true));
        assert_eq!(state.pagination().total(), 15);
        assert_eq!(state.pagination().page(), 0);

        let state = grid.dispatch(&state, QueryAction::LastPage);
        assert_eq!(state.pagination().page(), 1);
    }

    #[test]
    fn test_global_search_can_be_disabled() {
        let grid = grid(5).with_config(GridConfig::default().with_global_search(false));
        let state = grid.dispatch(&grid.initial_state(), QueryAction::set_global_text("row 3"));
        assert_eq!(grid.evaluate(&state).total(), 5);
    }

    #[test]
    fn test_observer_notified_on_change_only() {
        let recorder = Recorder::default();
        let grid = grid(12).with_observer(recorder.clone());
        let state = grid.initial_state();

        let state = grid.dispatch(&state, QueryAction::toggle_sort("name"));
        let state = grid.dispatch(&state, QueryAction::toggle_sort("ghost"));
        let state = grid.dispatch(&state, QueryAction::set_filter("name", "row 1"));
        let state = grid.dispatch(&state, QueryAction::NextPage);
        let state = grid.dispatch(&state, QueryAction::toggle_row("2", true));
        let page_ids = grid.evaluate(&state).page_row_ids().to_vec();
        let state = grid.dispatch(&state, QueryAction::toggle_all_on_page(true, page_ids));
        grid.dispatch(&state, QueryAction::ClearSelection);

        assert_eq!(
            recorder.events(),
            vec!["sort:1", "filter:1:", "select:1", "select:5", "select:0"]
        );
    }

    #[test]
    fn test_global_text_change_reaches_observer() {
        let recorder = Recorder::default();
        let grid = grid(5).with_observer(recorder.clone());

        let state = grid.dispatch(&grid.initial_state(), QueryAction::set_global_text("row 2"));
        let state = grid.dispatch(&state, QueryAction::set_global_text("row 2"));
        grid.dispatch(&state, QueryAction::set_global_text(""));

        assert_eq!(recorder.events(), vec!["filter:0:row 2", "filter:0:"]);
    }

    #[test]
    fn test_header_checkbox_follows_page() {
        let grid = grid(12);
        let state = grid.initial_state();
        let ids = grid.evaluate(&state).page_row_ids().to_vec();

        let state = grid.dispatch(&state, QueryAction::toggle_all_on_page(true, ids));
        assert_eq!(grid.evaluate(&state).header_checkbox(), HeaderCheckbox::Checked);

        let state = grid.dispatch(&state, QueryAction::toggle_row("1", false));
        assert_eq!(grid.evaluate(&state).header_checkbox(), HeaderCheckbox::Indeterminate);

        let state = grid.dispatch(&state, QueryAction::NextPage);
        assert_eq!(grid.evaluate(&state).header_checkbox(), HeaderCheckbox::Unchecked);
        assert_eq!(grid.selected_rows(&state).len(), 9);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Duplicate row id")]
    fn test_duplicate_ids_panic_in_debug() {
        let rows = vec![Record::new().set("id", 1), Record::new().set("id", 1)];
        let columns = ColumnRegistry::new([Column::new("id").path("id")]).unwrap();
        DataGrid::new(rows, columns, RowIdAccessor::path("id").unwrap());
    }
}
