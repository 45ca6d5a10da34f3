//! Row access trait and the map-backed record type

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

/// Field access into a row.
///
/// The engine never looks inside a row except through this trait, and only
/// for columns declared with a field path. Columns with a computed accessor
/// work on any row type, so a struct that only uses computed columns can
/// implement `Row` with an empty body:
///
/// ```
/// use datagrid_lib::model::Row;
///
/// struct Incident {
///     severity: u8,
/// }
///
/// impl Row for Incident {}
/// ```
pub trait Row {
    /// Returns the value of a top-level field, or `Value::Null` if absent.
    fn field(&self, _name: &str) -> Value {
        Value::Null
    }

    /// Walks a dotted path, one segment at a time.
    ///
    /// The first segment goes through [`field`](Row::field), the rest through
    /// [`Value::get`]. Any missing step yields `Value::Null`.
    fn lookup(&self, segments: &[String]) -> Value {
        let Some((first, rest)) = segments.split_first() else {
            return Value::Null;
        };
        let head = self.field(first);
        let mut current = &head;
        for segment in rest {
            match current.get(segment) {
                Some(next) if !next.is_null() => current = next,
                _ => return Value::Null,
            }
        }
        current.clone()
    }
}

/// A dynamic row holding field values by name.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Record, Row, Value};
///
/// let record = Record::new()
///     .set("name", "Red Fort")
///     .set("visitors", 1_200);
///
/// assert_eq!(record.field("name"), Value::from("Red Fort"));
/// assert_eq!(record.field("missing"), Value::Null);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value, builder style.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Sets a field value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns a reference to a field value, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the field names in sorted order.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.fields.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Row for Record {
    fn field(&self, name: &str) -> Value {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    fn lookup(&self, segments: &[String]) -> Value {
        lookup_ref(segments, |name| self.fields.get(name))
    }
}

impl Row for HashMap<String, Value> {
    fn field(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or_default()
    }

    fn lookup(&self, segments: &[String]) -> Value {
        lookup_ref(segments, |name| self.get(name))
    }
}

impl Row for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Value {
        self.get(name).cloned().unwrap_or_default()
    }

    fn lookup(&self, segments: &[String]) -> Value {
        lookup_ref(segments, |name| self.get(name))
    }
}

/// JSON rows are walked by reference; only the leaf is converted.
impl Row for serde_json::Value {
    fn field(&self, name: &str) -> Value {
        self.get(name).map(Value::from).unwrap_or_default()
    }

    fn lookup(&self, segments: &[String]) -> Value {
        let mut current = self;
        for segment in segments {
            let next = match current {
                serde_json::Value::Object(fields) => fields.get(segment),
                serde_json::Value::Array(items) => {
                    segment.parse::<usize>().ok().and_then(|i| items.get(i))
                }
                _ => None,
            };
            match next {
                Some(value) if !value.is_null() => current = value,
                _ => return Value::Null,
            }
        }
        if segments.is_empty() {
            Value::Null
        } else {
            Value::from(current)
        }
    }
}

fn lookup_ref<'a>(segments: &[String], first: impl Fn(&str) -> Option<&'a Value>) -> Value {
    let Some((head, rest)) = segments.split_first() else {
        return Value::Null;
    };
    let mut current = match first(head) {
        Some(value) => value,
        None => return Value::Null,
    };
    for segment in rest {
        match current.get(segment) {
            Some(next) if !next.is_null() => current = next,
            _ => return Value::Null,
        }
    }
    current.clone()
}
