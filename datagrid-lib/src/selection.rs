//! Row selection tracking.
//!
//! Selection is keyed by row id, so it survives filtering, sorting and paging:
//! a row filtered out of view stays selected. "Select all" only ever touches
//! the rows on the current page.

use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::accessor::resolve_row_id;
use crate::column::RowId;
use crate::column::RowIdAccessor;
use crate::model::Row;

/// State of the header checkbox, relative to the current page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderCheckbox {
    /// Nothing on the page is selected.
    #[default]
    Unchecked,
    /// Every row on the page is selected.
    Checked,
    /// Some, but not all, rows on the page are selected.
    Indeterminate,
}

/// Selection flags derived for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionFlags {
    pub all_selected_on_page: bool,
    pub indeterminate: bool,
    pub header: HeaderCheckbox,
}

/// ID-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    selected: HashSet<RowId>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects or deselects one id. Returns `true` if the selection changed.
    pub fn toggle_row(&mut self, id: &str, selected: bool) -> bool {
        if selected {
            self.selected.insert(id.to_string())
        } else {
            self.selected.remove(id)
        }
    }

    /// Selects or deselects exactly the ids on the current page. Ids from
    /// other pages are untouched. Returns the number of ids that changed.
    pub fn toggle_all_on_page(&mut self, selected: bool, page_ids: &[RowId]) -> usize {
        page_ids
            .iter()
            .filter(|id| self.toggle_row(id, selected))
            .count()
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        let mut removed: Vec<_> = self.selected.drain().collect();
        removed.sort();
        removed
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected_ids(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Derives the header checkbox flags for the given page.
    pub fn flags(&self, page_ids: &[RowId]) -> SelectionFlags {
        let on_page = page_ids.iter().filter(|id| self.is_selected(id)).count();
        let all_selected_on_page = !page_ids.is_empty() && on_page == page_ids.len();
        let indeterminate = on_page > 0 && !all_selected_on_page;
        let header = if all_selected_on_page {
            HeaderCheckbox::Checked
        } else if indeterminate {
            HeaderCheckbox::Indeterminate
        } else {
            HeaderCheckbox::Unchecked
        };
        SelectionFlags {
            all_selected_on_page,
            indeterminate,
            header,
        }
    }

    /// Resolves the selected ids back to rows, in collection order.
    pub fn selected_rows<'a, T: Row>(&self, rows: &'a [T], row_id: &RowIdAccessor<T>) -> Vec<&'a T> {
        if self.selected.is_empty() {
            return Vec::new();
        }
        rows.iter()
            .filter(|row| self.is_selected(&resolve_row_id(*row, row_id)))
            .collect()
    }
}

impl FromIterator<RowId> for Selection {
    fn from_iter<I: IntoIterator<Item = RowId>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    fn ids(values: &[&str]) -> Vec<RowId> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_row() {
        let mut selection = Selection::new();
        assert!(selection.toggle_row("1", true));
        assert!(!selection.toggle_row("1", true));
        assert!(selection.is_selected("1"));
        assert!(selection.toggle_row("1", false));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_on_page_leaves_other_pages() {
        let mut selection = Selection::new();
        selection.toggle_row("1", true);

        assert_eq!(selection.toggle_all_on_page(true, &ids(&["3", "4"])), 2);
        assert_eq!(selection.selected_ids(), ids(&["1", "3", "4"]));

        assert_eq!(selection.toggle_all_on_page(false, &ids(&["3", "4"])), 2);
        assert_eq!(selection.selected_ids(), ids(&["1"]));
    }

    #[test]
    fn test_flags_follow_current_page() {
        let mut selection = Selection::new();
        let page = ids(&["1", "2"]);

        assert_eq!(selection.flags(&page).header, HeaderCheckbox::Unchecked);

        selection.toggle_all_on_page(true, &page);
        let flags = selection.flags(&page);
        assert!(flags.all_selected_on_page);
        assert!(!flags.indeterminate);
        assert_eq!(flags.header, HeaderCheckbox::Checked);

        selection.toggle_row("2", false);
        let flags = selection.flags(&page);
        assert!(!flags.all_selected_on_page);
        assert!(flags.indeterminate);
        assert_eq!(flags.header, HeaderCheckbox::Indeterminate);

        // selection elsewhere does not make another page indeterminate
        assert_eq!(selection.flags(&ids(&["5", "6"])).header, HeaderCheckbox::Unchecked);
    }

    #[test]
    fn test_empty_page_is_never_checked() {
        let selection: Selection = ids(&["1"]).into_iter().collect();
        let flags = selection.flags(&[]);
        assert!(!flags.all_selected_on_page);
        assert_eq!(flags.header, HeaderCheckbox::Unchecked);
    }

    #[test]
    fn test_selected_rows_in_collection_order() {
        let rows = vec![
            Record::new().set("id", 1),
            Record::new().set("id", 2),
            Record::new().set("id", 3),
        ];
        let accessor = RowIdAccessor::path("id").unwrap();
        let selection: Selection = ids(&["3", "1"]).into_iter().collect();

        let selected = selection.selected_rows(&rows, &accessor);
        assert_eq!(selected, vec![&rows[0], &rows[2]]);
    }
}
