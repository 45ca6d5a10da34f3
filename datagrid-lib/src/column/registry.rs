//! Validated column registry

use std::collections::HashMap;
use std::fmt;

use log::debug;

use super::Accessor;
use super::Column;
use crate::error::ConfigError;

/// A validated set of columns, indexed by id.
///
/// Construction fails on duplicate or empty ids, on columns given both a
/// field path and a computed accessor, and on malformed field paths. Once
/// built, a registry is immutable; [`set_visible`](ColumnRegistry::set_visible)
/// returns a new registry.
///
/// # Example
///
/// ```
/// use datagrid_lib::column::{Column, ColumnRegistry};
/// use datagrid_lib::error::ConfigError;
/// use datagrid_lib::model::Record;
///
/// let result = ColumnRegistry::<Record>::new([
///     Column::new("name").path("name"),
///     Column::new("name").path("title"),
/// ]);
/// assert_eq!(result.unwrap_err(), ConfigError::duplicate_column("name"));
/// ```
pub struct ColumnRegistry<T> {
    columns: Vec<Column<T>>,
    index: HashMap<String, usize>,
}

impl<T> ColumnRegistry<T> {
    /// Validates the columns and builds the registry.
    pub fn new(columns: impl IntoIterator<Item = Column<T>>) -> Result<Self, ConfigError> {
        let columns: Vec<Column<T>> = columns.into_iter().collect();
        let mut index = HashMap::with_capacity(columns.len());

        for (position, column) in columns.iter().enumerate() {
            if column.id().trim().is_empty() {
                return Err(ConfigError::EmptyColumnId);
            }
            if column.is_conflicting() {
                return Err(ConfigError::conflicting_accessor(column.id()));
            }
            if let Some(Accessor::Path(path)) = column.accessor() {
                path.validate()?;
            }
            if index.insert(column.id().to_string(), position).is_some() {
                return Err(ConfigError::duplicate_column(column.id()));
            }
        }

        Ok(Self { columns, index })
    }

    /// Returns the column with the given id.
    pub fn get(&self, id: &str) -> Option<&Column<T>> {
        self.index.get(id).map(|&i| &self.columns[i])
    }

    /// Returns `true` if a column with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns all columns in declaration order.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Iterates over columns in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Column<T>> {
        self.columns.iter()
    }

    /// Returns the column ids in declaration order.
    pub fn ids(&self) -> Vec<&str> {
        self.columns.iter().map(Column::id).collect()
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns a registry with the default visibility of one column changed.
    ///
    /// Unknown ids are ignored. Filters and sort keys on a hidden column stay
    /// active; hiding a column never forgets the query built on it.
    pub fn set_visible(&self, id: &str, visible: bool) -> Self {
        let mut next = self.clone();
        match next.index.get(id) {
            Some(&i) => next.columns[i].set_visible(visible),
            None => debug!("Ignoring visibility change for unknown column '{}'", id),
        }
        next
    }
}

impl<T> Clone for ColumnRegistry<T> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.columns.iter()).finish()
    }
}
