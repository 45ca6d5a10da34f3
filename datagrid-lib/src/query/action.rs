//! Query actions
//!
//! Everything a user can do to a grid's query becomes a `QueryAction`:
//! typing in a filter box is `SetFilter`, clicking a header is `ToggleSort`,
//! ticking the header checkbox is `ToggleAllOnPage`.

use serde::Deserialize;
use serde::Serialize;

use crate::column::RowId;
use crate::filter::FilterType;
use crate::model::Value;
use crate::sort::Direction;

/// A discrete transition of a [`QueryState`](super::QueryState).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueryAction {
    /// Set or replace the filter on a column. A blank value clears it. When
    /// `filter_type` is `None`, the column's default filter type applies.
    SetFilter {
        column_id: String,
        value: Value,
        filter_type: Option<FilterType>,
    },
    /// Remove the filter on one column.
    ClearFilter { column_id: String },
    /// Remove all column filters.
    ClearFilters,
    /// Set the global text search.
    SetGlobalText { text: String },
    /// Advance a column through unsorted → asc → desc → unsorted.
    ToggleSort { column_id: String },
    /// Sort a column in a given direction, keeping its priority if present.
    SetSort {
        column_id: String,
        direction: Direction,
    },
    /// Remove all sort keys.
    ClearSorts,
    /// Jump to a 0-based page.
    SetPage { page: usize },
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,
    /// Change the page size.
    SetPageSize { page_size: usize },
    /// Show or hide a column for this session.
    SetColumnVisible { column_id: String, visible: bool },
    /// Drop all visibility overrides.
    ResetVisibility,
    /// Select or deselect one row.
    ToggleRow { id: RowId, selected: bool },
    /// Select or deselect every row on the current page.
    ToggleAllOnPage {
        selected: bool,
        page_row_ids: Vec<RowId>,
    },
    /// Deselect everything.
    ClearSelection,
}

/// The part of the query an action touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Concern {
    Filter,
    Sort,
    Page,
    Visibility,
    Selection,
}

impl QueryAction {
    /// Creates a `SetFilter` using the column's default filter type.
    pub fn set_filter(column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::SetFilter {
            column_id: column_id.into(),
            value: value.into(),
            filter_type: None,
        }
    }

    /// Creates a `SetFilter` with an explicit filter type.
    pub fn set_typed_filter(
        column_id: impl Into<String>,
        value: impl Into<Value>,
        filter_type: FilterType,
    ) -> Self {
        Self::SetFilter {
            column_id: column_id.into(),
            value: value.into(),
            filter_type: Some(filter_type),
        }
    }

    /// Creates a `ClearFilter`.
    pub fn clear_filter(column_id: impl Into<String>) -> Self {
        Self::ClearFilter {
            column_id: column_id.into(),
        }
    }

    /// Creates a `SetGlobalText`.
    pub fn set_global_text(text: impl Into<String>) -> Self {
        Self::SetGlobalText { text: text.into() }
    }

    /// Creates a `ToggleSort`.
    pub fn toggle_sort(column_id: impl Into<String>) -> Self {
        Self::ToggleSort {
            column_id: column_id.into(),
        }
    }

    /// Creates a `SetSort`.
    pub fn set_sort(column_id: impl Into<String>, direction: Direction) -> Self {
        Self::SetSort {
            column_id: column_id.into(),
            direction,
        }
    }

    /// Creates a `SetColumnVisible`.
    pub fn set_column_visible(column_id: impl Into<String>, visible: bool) -> Self {
        Self::SetColumnVisible {
            column_id: column_id.into(),
            visible,
        }
    }

    /// Creates a `ToggleRow`.
    pub fn toggle_row(id: impl Into<RowId>, selected: bool) -> Self {
        Self::ToggleRow {
            id: id.into(),
            selected,
        }
    }

    /// Creates a `ToggleAllOnPage`.
    pub fn toggle_all_on_page(selected: bool, page_row_ids: impl IntoIterator<Item = RowId>) -> Self {
        Self::ToggleAllOnPage {
            selected,
            page_row_ids: page_row_ids.into_iter().collect(),
        }
    }

    /// Returns the part of the query this action touches.
    pub fn concern(&self) -> Concern {
        match self {
            Self::SetFilter { .. }
            | Self::ClearFilter { .. }
            | Self::ClearFilters
            | Self::SetGlobalText { .. } => Concern::Filter,
            Self::ToggleSort { .. } | Self::SetSort { .. } | Self::ClearSorts => Concern::Sort,
            Self::SetPage { .. }
            | Self::NextPage
            | Self::PreviousPage
            | Self::FirstPage
            | Self::LastPage
            | Self::SetPageSize { .. } => Concern::Page,
            Self::SetColumnVisible { .. } | Self::ResetVisibility => Concern::Visibility,
            Self::ToggleRow { .. } | Self::ToggleAllOnPage { .. } | Self::ClearSelection => {
                Concern::Selection
            }
        }
    }
}
