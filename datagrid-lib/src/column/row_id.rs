//! Row identity

use std::fmt;
use std::sync::Arc;

use super::FieldPath;
use crate::error::ConfigError;

/// A stable row identifier, as produced by a [`RowIdAccessor`].
pub type RowId = String;

/// Derives the identity of a row for selection tracking.
///
/// The accessor must be total and injective over the row collection: every
/// row gets an id and no two rows share one. `DataGrid::new` checks this in
/// debug builds only.
pub enum RowIdAccessor<T> {
    /// Read the id through a dotted field path and use its text form.
    Path(FieldPath),
    /// Compute the id from the whole row.
    Compute(Arc<dyn Fn(&T) -> RowId + Send + Sync>),
}

impl<T> RowIdAccessor<T> {
    /// Creates a path-based accessor, validating the path.
    pub fn path(path: &str) -> Result<Self, ConfigError> {
        Ok(Self::Path(FieldPath::parse(path)?))
    }

    /// Creates a computed accessor.
    pub fn compute<F>(f: F) -> Self
    where
        F: Fn(&T) -> RowId + Send + Sync + 'static,
    {
        Self::Compute(Arc::new(f))
    }
}

impl<T> Clone for RowIdAccessor<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Path(path) => Self::Path(path.clone()),
            Self::Compute(f) => Self::Compute(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for RowIdAccessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Compute(_) => f.write_str("Compute(..)"),
        }
    }
}
