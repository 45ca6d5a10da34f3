//! Cell value resolution.

use crate::column::Accessor;
use crate::column::Column;
use crate::column::RowId;
use crate::column::RowIdAccessor;
use crate::model::Row;
use crate::model::Value;

/// Resolves the value of `column` in `row`.
///
/// Computed accessors are called with the row. Field paths are walked one
/// segment at a time and stop at the first missing step. Display-only columns
/// resolve to `Value::Null`. This never fails: absence is `Value::Null`.
pub fn resolve<T: Row>(row: &T, column: &Column<T>) -> Value {
    match column.accessor() {
        Some(Accessor::Compute(f)) => f(row),
        Some(Accessor::Path(path)) => row.lookup(path.segments()),
        None => Value::Null,
    }
}

/// Resolves the identity of `row`.
///
/// Path-based ids use the text form of the resolved value, so `7` and `"7"`
/// name the same row.
pub fn resolve_row_id<T: Row>(row: &T, accessor: &RowIdAccessor<T>) -> RowId {
    match accessor {
        RowIdAccessor::Compute(f) => f(row),
        RowIdAccessor::Path(path) => row.lookup(path.segments()).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Record;

    #[test]
    fn test_resolve_path() {
        let row = Record::new().set(
            "location",
            Value::from(serde_json::json!({ "city": "Jaipur" })),
        );
        let column = Column::new("city").path("location.city");
        assert_eq!(resolve(&row, &column), Value::from("Jaipur"));
    }

    #[test]
    fn test_resolve_missing_path_is_null() {
        let row = Record::new().set("location", Value::Null);
        let column = Column::new("city").path("location.city");
        assert_eq!(resolve(&row, &column), Value::Null);
    }

    #[test]
    fn test_resolve_compute() {
        let row = Record::new().set("first", "Amber").set("last", "Fort");
        let column = Column::new("full").compute(|r: &Record| {
            Value::from(format!("{} {}", r.field("first"), r.field("last")))
        });
        assert_eq!(resolve(&row, &column), Value::from("Amber Fort"));
    }

    #[test]
    fn test_resolve_display_only_is_null() {
        let row = Record::new().set("name", "x");
        let column: Column<Record> = Column::new("actions");
        assert_eq!(resolve(&row, &column), Value::Null);
    }

    #[test]
    fn test_resolve_row_id() {
        let row = Record::new().set("id", 42);
        let by_path = RowIdAccessor::path("id").unwrap();
        let computed = RowIdAccessor::compute(|r: &Record| format!("site-{}", r.field("id")));

        assert_eq!(resolve_row_id(&row, &by_path), "42");
        assert_eq!(resolve_row_id(&row, &computed), "site-42");
    }
}
