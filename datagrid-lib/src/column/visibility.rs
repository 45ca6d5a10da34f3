//! Per-session column visibility

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use super::Column;
use super::ColumnRegistry;

/// Visibility overrides layered over each column's default.
///
/// A column with no override keeps the visibility it was declared with.
/// Overrides are keyed by column id and may name columns that no longer
/// exist; those entries are simply never consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Visibility {
    overrides: BTreeMap<String, bool>,
}

impl Visibility {
    /// Creates an empty set of overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with one override set.
    pub fn with(mut self, id: impl Into<String>, visible: bool) -> Self {
        self.set(id, visible);
        self
    }

    /// Sets one override in place.
    pub fn set(&mut self, id: impl Into<String>, visible: bool) {
        self.overrides.insert(id.into(), visible);
    }

    /// Drops all overrides.
    pub fn reset(&mut self) {
        self.overrides.clear();
    }

    /// Returns the override for a column id, if any.
    pub fn get(&self, id: &str) -> Option<bool> {
        self.overrides.get(id).copied()
    }

    /// Returns the effective visibility of a column.
    pub fn is_visible<T>(&self, column: &Column<T>) -> bool {
        self.get(column.id()).unwrap_or(column.is_visible())
    }

    /// Returns the effectively visible columns in declaration order.
    pub fn visible_columns<'a, T>(&self, columns: &'a ColumnRegistry<T>) -> Vec<&'a Column<T>> {
        columns.iter().filter(|c| self.is_visible(c)).collect()
    }
}
