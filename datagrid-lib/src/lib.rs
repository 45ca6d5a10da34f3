//! Data grid engine
//!
//! A rendering-agnostic tabular data engine: it turns a collection of rows and
//! a registry of column descriptors into a filtered, sorted, paginated and
//! selectable view.
//!
//! ```text
//! rows + ColumnRegistry + QueryState
//!        │
//!        ▼
//!   global text → column filters → sort → total → clamp page → slice
//!        │
//!        ▼
//!     GridView (visible rows, total, page count, selection flags)
//! ```
//!
//! The engine holds no hidden state. A [`QueryState`](query::QueryState) is an
//! immutable snapshot; every [`QueryAction`](query::QueryAction) produces a new
//! one, and [`evaluate`](engine::evaluate) recomputes the view from scratch.
//!
//! # Example
//!
//! ```
//! use datagrid_lib::column::{Column, ColumnRegistry, RowIdAccessor};
//! use datagrid_lib::engine::DataGrid;
//! use datagrid_lib::filter::FilterType;
//! use datagrid_lib::model::Record;
//! use datagrid_lib::query::QueryAction;
//!
//! let rows = vec![
//!     Record::new().set("id", 1).set("name", "Red Fort").set("status", "active"),
//!     Record::new().set("id", 2).set("name", "India Gate").set("status", "inactive"),
//! ];
//! let columns = ColumnRegistry::new([
//!     Column::new("name").path("name"),
//!     Column::new("status").path("status").filter_type(FilterType::Select),
//! ])
//! .unwrap();
//!
//! let grid = DataGrid::new(rows, columns, RowIdAccessor::path("id").unwrap());
//! let state = grid.dispatch(&grid.initial_state(), QueryAction::set_global_text("red"));
//! let view = grid.evaluate(&state);
//!
//! assert_eq!(view.total(), 1);
//! ```

pub mod accessor;
pub mod column;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod model;
pub mod observer;
pub mod page;
pub mod query;
pub mod selection;
pub mod sort;

pub use config::GridConfig;
pub use engine::DataGrid;
pub use engine::GridView;
pub use engine::evaluate;
pub use query::QueryAction;
pub use query::QueryState;
