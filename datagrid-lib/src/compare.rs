//! Type-aware value comparison.

use std::cmp::Ordering;

use rust_decimal::prelude::ToPrimitive;

use crate::model::Value;
use crate::model::ValueKind;
use crate::sort::Direction;

/// Compares two values for sorting.
///
/// Missing values are greater than everything, so they sort last ascending
/// and first descending. Two strings compare case-insensitively first; two
/// numbers numerically after widening to `f64`; two dates by epoch
/// milliseconds. Any other pairing compares the text forms. `Desc` reverses
/// the ascending result.
///
/// Over values of one kind the result is a total order. A mixed-kind pair
/// compares as text, which is only consistent if every value of the column
/// does; [`unify_kinds`] makes it so before a sort.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use datagrid_lib::compare::compare;
/// use datagrid_lib::model::Value;
/// use datagrid_lib::sort::Direction;
///
/// assert_eq!(compare(&Value::from(2), &Value::from(10), Direction::Asc), Ordering::Less);
/// assert_eq!(compare(&Value::Null, &Value::from(10), Direction::Asc), Ordering::Greater);
/// assert_eq!(compare(&Value::Null, &Value::from(10), Direction::Desc), Ordering::Less);
/// ```
pub fn compare(a: &Value, b: &Value, direction: Direction) -> Ordering {
    let ascending = match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => compare_present(a, b),
    };
    match direction {
        Direction::Asc => ascending,
        Direction::Desc => ascending.reverse(),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a.kind(), b.kind()) {
        (ValueKind::Number, ValueKind::Number) => compare_numbers(a, b),
        (ValueKind::Date, ValueKind::Date) => a.epoch_millis().cmp(&b.epoch_millis()),
        _ => compare_text(&a.to_string(), &b.to_string()),
    }
}

// One widening for every pair keeps equality transitive across Int, Float
// and Decimal.
fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    widen(a).total_cmp(&widen(b))
}

fn widen(value: &Value) -> f64 {
    match value {
        Value::Int(i) => *i as f64,
        Value::Float(f) => *f,
        Value::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Rewrites one column's cells so that [`compare`] is a total order over them.
///
/// When the non-missing cells span more than one [`ValueKind`], each is
/// replaced by its text form, so the whole column compares by the string
/// rule rather than natively for some pairs and as text for others. Missing
/// cells stay missing.
pub fn unify_kinds<'a>(cells: impl IntoIterator<Item = &'a mut Value>) {
    let mut cells: Vec<&mut Value> = cells.into_iter().filter(|c| !c.is_null()).collect();
    let Some(first) = cells.first().map(|c| c.kind()) else {
        return;
    };
    if cells.iter().all(|c| c.kind() == first) {
        return;
    }
    for cell in cells.iter_mut() {
        let text = cell.to_string();
        **cell = Value::String(text);
    }
}

/// Case-insensitive comparison, falling back to the raw strings so that the
/// order stays total. On a case-only difference lowercase sorts first.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}
