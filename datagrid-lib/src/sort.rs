//! Sort keys and the stable multi-key sort.

use std::cmp::Ordering;

use log::debug;
use serde::Deserialize;
use serde::Serialize;

use crate::accessor::resolve;
use crate::column::Column;
use crate::column::ColumnRegistry;
use crate::compare::compare;
use crate::compare::unify_kinds;
use crate::model::Row;
use crate::model::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9), missing values last.
    Asc,
    /// Descending order (Z-A, 9-0), missing values first.
    Desc,
}

/// One column of a multi-column sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column_id: String,
    pub direction: Direction,
}

impl SortKey {
    /// Creates an ascending key.
    pub fn asc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending key.
    pub fn desc(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: Direction::Desc,
        }
    }
}

/// An ordered list of sort keys. The first key dominates; later keys only
/// break ties. Each column appears at most once.
///
/// # Example
///
/// ```
/// use datagrid_lib::sort::{Direction, SortKeys};
///
/// // unsorted → asc → desc → unsorted
/// let keys = SortKeys::new().toggle("age");
/// assert_eq!(keys.direction_of("age"), Some(Direction::Asc));
/// let keys = keys.toggle("age");
/// assert_eq!(keys.direction_of("age"), Some(Direction::Desc));
/// let keys = keys.toggle("age");
/// assert!(keys.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortKeys {
    keys: Vec<SortKey>,
}

impl SortKeys {
    /// Creates an empty sort.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one column through its sort cycle.
    ///
    /// An unsorted column is appended ascending; an ascending column flips to
    /// descending in place; a descending column is removed.
    pub fn toggle(mut self, column_id: &str) -> Self {
        match self.keys.iter().position(|k| k.column_id == column_id) {
            None => self.keys.push(SortKey::asc(column_id)),
            Some(i) => match self.keys[i].direction {
                Direction::Asc => self.keys[i].direction = Direction::Desc,
                Direction::Desc => {
                    self.keys.remove(i);
                }
            },
        }
        self
    }

    /// Sets a column's direction, in place if already sorted, else appended.
    pub fn set(mut self, column_id: &str, direction: Direction) -> Self {
        match self.keys.iter_mut().find(|k| k.column_id == column_id) {
            Some(key) => key.direction = direction,
            None => self.keys.push(SortKey {
                column_id: column_id.to_string(),
                direction,
            }),
        }
        self
    }

    /// Removes a column from the sort.
    pub fn without(mut self, column_id: &str) -> Self {
        self.keys.retain(|k| k.column_id != column_id);
        self
    }

    /// Returns the direction a column is sorted in, if any.
    pub fn direction_of(&self, column_id: &str) -> Option<Direction> {
        self.keys
            .iter()
            .find(|k| k.column_id == column_id)
            .map(|k| k.direction)
    }

    /// Returns the 0-based priority of a column in the sort, if any.
    pub fn priority_of(&self, column_id: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.column_id == column_id)
    }

    /// Returns the keys in priority order.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if nothing is sorted.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl FromIterator<SortKey> for SortKeys {
    fn from_iter<I: IntoIterator<Item = SortKey>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SortKeys::new(), |keys, key| keys.set(&key.column_id, key.direction))
    }
}

/// Sorts rows by the given keys.
///
/// Keys on unknown, non-sortable or display-only columns are skipped. The
/// sort is stable: rows that tie on every key keep their input order. Each
/// cell is resolved once up front rather than on every comparison. A key
/// whose cells mix value kinds sorts all of its cells by text.
pub fn sort<'a, T: Row>(
    rows: Vec<&'a T>,
    keys: &SortKeys,
    columns: &ColumnRegistry<T>,
) -> Vec<&'a T> {
    let active: Vec<(&Column<T>, Direction)> = keys
        .keys()
        .iter()
        .filter_map(|key| match columns.get(&key.column_id) {
            Some(column) if column.is_sortable() => Some((column, key.direction)),
            _ => {
                debug!("Skipping sort key on column '{}'", key.column_id);
                None
            }
        })
        .collect();

    if active.is_empty() || rows.len() < 2 {
        return rows;
    }

    let mut decorated: Vec<(Vec<Value>, &'a T)> = rows
        .into_iter()
        .map(|row| {
            let cells = active.iter().map(|(column, _)| resolve(row, column)).collect();
            (cells, row)
        })
        .collect();

    for i in 0..active.len() {
        unify_kinds(decorated.iter_mut().map(|(cells, _)| &mut cells[i]));
    }

    decorated.sort_by(|(a, _), (b, _)| {
        active
            .iter()
            .enumerate()
            .map(|(i, (_, direction))| compare(&a[i], &b[i], *direction))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });

    decorated.into_iter().map(|(_, row)| row).collect()
}
