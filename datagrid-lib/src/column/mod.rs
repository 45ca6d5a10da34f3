//! Column descriptors and the column registry.
//!
//! - [`Column`] - How to read, filter and sort one dimension of a row
//! - [`ColumnRegistry`] - A validated, id-indexed set of columns
//! - [`Visibility`] - Per-session visibility overrides
//! - [`RowIdAccessor`] - How to derive a stable id for a row

mod path;
mod registry;
mod row_id;
mod visibility;

use std::fmt;
use std::sync::Arc;

use crate::filter::FilterType;
use crate::model::Value;

pub use path::FieldPath;
pub use registry::ColumnRegistry;
pub use row_id::RowId;
pub use row_id::RowIdAccessor;
pub use visibility::Visibility;

/// A computed accessor: a pure function from a row to a cell value.
pub type AccessorFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// How a column reads its value out of a row.
pub enum Accessor<T> {
    /// Walk a dotted field path through [`Row`](crate::model::Row).
    Path(FieldPath),
    /// Call a function with the whole row.
    Compute(AccessorFn<T>),
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        match self {
            Accessor::Path(path) => Accessor::Path(path.clone()),
            Accessor::Compute(f) => Accessor::Compute(Arc::clone(f)),
        }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Accessor::Compute(_) => f.write_str("Compute(..)"),
        }
    }
}

/// Describes one projectable, sortable and filterable dimension of `T`.
///
/// A column reads its value either through a field path or through a computed
/// accessor. A column with neither is display-only: the caller renders it from
/// the whole row, and it takes no part in filtering, sorting or global search.
///
/// # Examples
///
/// ```
/// use datagrid_lib::column::Column;
/// use datagrid_lib::filter::FilterType;
/// use datagrid_lib::model::{Record, Value};
///
/// let columns: Vec<Column<Record>> = vec![
///     Column::new("name").header("Site"),
///     Column::new("city").path("location.city"),
///     Column::new("status").path("status").filter_type(FilterType::Select),
///     Column::new("crowded")
///         .compute(|row: &Record| Value::from(row.get("visitors").and_then(Value::as_f64) > Some(1000.0)))
///         .filter_type(FilterType::Boolean),
///     Column::new("actions").sortable(false).filterable(false),
/// ];
/// ```
pub struct Column<T> {
    id: String,
    header: Option<String>,
    accessor: Option<Accessor<T>>,
    conflicting: bool,
    filterable: bool,
    filter_type: FilterType,
    sortable: bool,
    visible: bool,
}

impl<T> Column<T> {
    /// Creates a display-only column with default flags.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: None,
            accessor: None,
            conflicting: false,
            filterable: true,
            filter_type: FilterType::default(),
            sortable: true,
            visible: true,
        }
    }

    /// Sets the header label shown by renderers.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Reads the column value through a dotted field path.
    pub fn path(self, path: impl Into<String>) -> Self {
        self.with_accessor(Accessor::Path(FieldPath::new(path)))
    }

    /// Reads the column value through a computed accessor.
    pub fn compute<F>(self, f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'static,
    {
        self.with_accessor(Accessor::Compute(Arc::new(f)))
    }

    fn with_accessor(mut self, accessor: Accessor<T>) -> Self {
        if self.accessor.is_some() {
            self.conflicting = true;
        }
        self.accessor = Some(accessor);
        self
    }

    /// Sets whether the column takes part in column filters.
    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    /// Sets how column filters match against this column.
    pub fn filter_type(mut self, filter_type: FilterType) -> Self {
        self.filter_type = filter_type;
        self
    }

    /// Sets whether the column can be sorted.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Sets the default visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns the column id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the header label, falling back to the id.
    pub fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.id)
    }

    /// Returns the accessor, or `None` for display-only columns.
    pub fn accessor(&self) -> Option<&Accessor<T>> {
        self.accessor.as_ref()
    }

    /// Returns `true` if the column has no accessor.
    pub fn is_display_only(&self) -> bool {
        self.accessor.is_none()
    }

    /// Returns `true` if column filters apply to this column.
    pub fn is_filterable(&self) -> bool {
        self.filterable && !self.is_display_only()
    }

    /// Returns the filter type used when a filter does not name one.
    pub fn default_filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Returns `true` if sort keys on this column take effect.
    pub fn is_sortable(&self) -> bool {
        self.sortable && !self.is_display_only()
    }

    /// Returns the default visibility of the column.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub(crate) fn is_conflicting(&self) -> bool {
        self.conflicting
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            accessor: self.accessor.clone(),
            conflicting: self.conflicting,
            filterable: self.filterable,
            filter_type: self.filter_type,
            sortable: self.sortable,
            visible: self.visible,
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("accessor", &self.accessor)
            .field("filterable", &self.filterable)
            .field("filter_type", &self.filter_type)
            .field("sortable", &self.sortable)
            .field("visible", &self.visible)
            .finish()
    }
}
