//! Data model: dynamic cell values and the rows that carry them.
//!
//! - [`Value`] - A dynamic cell value
//! - [`ValueKind`] - The closed set of kinds the comparator and filters reason about
//! - [`Row`] - Trait giving the engine field access into a row
//! - [`Record`] - A ready-made `Row` backed by a map of field values

mod kind;
mod record;
mod value;

pub use kind::ValueKind;
pub use record::Record;
pub use record::Row;
pub use value::Value;
