//! Column filters and the global text predicate.

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::accessor::resolve;
use crate::column::Column;
use crate::column::ColumnRegistry;
use crate::model::Row;
use crate::model::Value;
use crate::model::ValueKind;

/// How a column filter matches a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Case-insensitive substring of the cell's text form.
    #[default]
    Text,
    /// Exact equality.
    Select,
    /// Numeric equality after coercing both sides.
    Number,
    /// Boolean equality after coercing both sides.
    Boolean,
    /// Same calendar day in local time.
    Date,
}

/// A filter on one column.
///
/// # Example
///
/// ```
/// use datagrid_lib::filter::{Filter, FilterType};
/// use datagrid_lib::model::Value;
///
/// let filter = Filter::select("status", "active");
/// assert!(filter.matches_value(&Value::from("active")));
/// assert!(!filter.matches_value(&Value::from("Active")));
///
/// // a missing cell never matches
/// assert!(!Filter::text("name", "").matches_value(&Value::Null));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column_id: String,
    pub value: Value,
    pub filter_type: FilterType,
}

impl Filter {
    /// Creates a filter of the given type.
    pub fn new(column_id: impl Into<String>, value: impl Into<Value>, filter_type: FilterType) -> Self {
        Self {
            column_id: column_id.into(),
            value: value.into(),
            filter_type,
        }
    }

    /// Creates a text filter.
    pub fn text(column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column_id, value, FilterType::Text)
    }

    /// Creates a select filter.
    pub fn select(column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column_id, value, FilterType::Select)
    }

    /// Creates a number filter.
    pub fn number(column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column_id, value, FilterType::Number)
    }

    /// Creates a boolean filter.
    pub fn boolean(column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column_id, value, FilterType::Boolean)
    }

    /// Creates a date filter.
    pub fn date(column_id: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column_id, value, FilterType::Date)
    }

    /// Returns `true` if the filter value is blank. Blank filters are pruned
    /// rather than stored.
    pub fn is_empty(&self) -> bool {
        self.value.is_blank()
    }

    /// Tests one cell against this filter. A missing cell never matches, and
    /// neither does a cell or filter value that cannot be coerced.
    pub fn matches_value(&self, cell: &Value) -> bool {
        if cell.is_null() {
            return false;
        }
        match self.filter_type {
            FilterType::Text => cell
                .to_string()
                .to_lowercase()
                .contains(&self.value.to_string().to_lowercase()),
            FilterType::Select => select_equals(cell, &self.value),
            FilterType::Number => match (cell.as_f64(), self.value.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            FilterType::Boolean => match (cell.as_bool(), self.value.as_bool()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            FilterType::Date => match (cell.as_local_date(), self.value.as_local_date()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

/// Numbers are equal across `Int`/`Float`/`Decimal`; a string against a
/// non-string compares text forms; anything else is structural equality.
fn select_equals(cell: &Value, wanted: &Value) -> bool {
    match (cell.kind(), wanted.kind()) {
        (ValueKind::Number, ValueKind::Number) => cell.as_f64() == wanted.as_f64(),
        (ValueKind::String, _) | (_, ValueKind::String) => cell.to_string() == wanted.to_string(),
        _ => cell == wanted,
    }
}

/// The active column filters, at most one per column, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    /// Creates an empty filter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a set with the filter inserted, replacing any filter on the
    /// same column. A blank filter removes the column's filter instead.
    pub fn with(mut self, filter: Filter) -> Self {
        if filter.is_empty() {
            debug!("Pruning blank filter on column '{}'", filter.column_id);
            return self.without(&filter.column_id);
        }
        match self.filters.iter_mut().find(|f| f.column_id == filter.column_id) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
        self
    }

    /// Returns a set without the filter on the given column.
    pub fn without(mut self, column_id: &str) -> Self {
        self.filters.retain(|f| f.column_id != column_id);
        self
    }

    /// Returns the filter on a column, if any.
    pub fn get(&self, column_id: &str) -> Option<&Filter> {
        self.filters.iter().find(|f| f.column_id == column_id)
    }

    /// Iterates over the active filters.
    pub fn iter(&self) -> impl Iterator<Item = &Filter> {
        self.filters.iter()
    }

    /// Returns the number of active filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns `true` if no filter is active.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl FromIterator<Filter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        iter.into_iter().fold(FilterSet::new(), FilterSet::with)
    }
}

/// Returns `true` if the row passes every active filter.
///
/// A filter naming an unknown or display-only column matches nothing. Hidden
/// columns are still filtered.
pub fn matches<T: Row>(row: &T, filters: &FilterSet, columns: &ColumnRegistry<T>) -> bool {
    filters.iter().all(|filter| match columns.get(&filter.column_id) {
        Some(column) if !column.is_display_only() => filter.matches_value(&resolve(row, column)),
        _ => false,
    })
}

/// A prepared global search: the lowercased needle, or nothing for a blank
/// query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalSearch {
    needle: Option<String>,
}

impl GlobalSearch {
    /// Prepares a query. Whitespace-only queries disable the predicate.
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        Self {
            needle: (!trimmed.is_empty()).then(|| query.to_lowercase()),
        }
    }

    /// Returns `true` if there is a query to apply.
    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    /// Returns `true` if any of the given columns contains the query,
    /// case-insensitively. Display-only columns are skipped.
    pub fn matches<T: Row>(&self, row: &T, visible: &[&Column<T>]) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        visible
            .iter()
            .filter(|column| !column.is_display_only())
            .any(|column| {
                let cell = resolve(row, column);
                !cell.is_null() && cell.to_string().to_lowercase().contains(needle.as_str())
            })
    }
}
