//! Value enum for dynamic cell values

use std::collections::BTreeMap;
use std::fmt;

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::ValueKind;

/// A dynamic value read out of a row by a column accessor.
///
/// `Null` stands for a missing value: an absent field, a broken path, or a
/// display-only column. Missing values sort last in ascending order and never
/// match a filter.
///
/// # Kind Mapping
///
/// | Variant | Kind |
/// |---------|------|
/// | `String`, `Guid` | `String` |
/// | `Int`, `Float`, `Decimal` | `Number` |
/// | `Bool` | `Boolean` |
/// | `Date`, `DateTime` | `Date` |
/// | `Null`, `List`, `Map` | `Unknown` |
///
/// # Serialization
///
/// Values serialize through their JSON form. Dates, timestamps, GUIDs and
/// decimals become strings, so they come back as `String` after a round trip.
/// Filters coerce strings, so a persisted query still matches the same rows.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Value;
///
/// let name = Value::from("Red Fort");
/// let visitors = Value::from(1_200i64);
/// let open = Value::from(true);
/// let missing = Value::Null;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "serde_json::Value")]
pub enum Value {
    /// Missing value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    String(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Calendar date without time of day.
    Date(NaiveDate),
    /// Point in time.
    DateTime(DateTime<Utc>),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Nested object, addressable by field paths.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns `true` if this is a missing value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if this value carries nothing a filter could match on:
    /// null, a whitespace-only string, or an empty list.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns the kind tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::String(_) | Value::Guid(_) => ValueKind::String,
            Value::Int(_) | Value::Float(_) | Value::Decimal(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Date(_) | Value::DateTime(_) => ValueKind::Date,
            Value::Null | Value::List(_) | Value::Map(_) => ValueKind::Unknown,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Guid(_) => "guid",
            Value::Date(_) => "date",
            Value::DateTime(_) => "datetime",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Looks up one path segment: a key of a `Map`, or an index into a `List`.
    pub fn get(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Map(fields) => fields.get(segment),
            Value::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Coerces this value to a number.
    ///
    /// Strings are parsed after trimming; booleans become 1 or 0. Anything
    /// else, including blank strings, yields `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Decimal(d) => d.to_f64(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else {
                    s.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    /// Coerces this value to a boolean.
    ///
    /// Numbers are `true` when non-zero. Strings accept `true/false`,
    /// `yes/no`, `on/off` and `1/0`, case-insensitively.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(i) => Some(*i != 0),
            Value::Float(f) if !f.is_nan() => Some(*f != 0.0),
            Value::Decimal(d) => Some(!d.is_zero()),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Some(true),
                "false" | "no" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Coerces this value to a calendar date in the local time zone.
    ///
    /// Timestamps are converted to local time before the time of day is
    /// dropped. Strings are parsed as RFC 3339, `YYYY-MM-DD`, or
    /// `YYYY-MM-DD HH:MM:SS`. Numbers are read as epoch milliseconds.
    pub fn as_local_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.with_timezone(&Local).date_naive()),
            Value::String(s) => parse_date_text(s),
            Value::Int(ms) => local_date_from_millis(*ms),
            Value::Float(ms) if ms.is_finite() => local_date_from_millis(*ms as i64),
            _ => None,
        }
    }

    /// Returns epoch milliseconds for date-kind values.
    ///
    /// A `Date` counts as midnight UTC.
    pub fn epoch_millis(&self) -> Option<i64> {
        match self {
            Value::Date(d) => d
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc().timestamp_millis()),
            Value::DateTime(dt) => Some(dt.timestamp_millis()),
            _ => None,
        }
    }
}

fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|dt| dt.date())
}

fn local_date_from_millis(ms: i64) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

/// The text form used by text filters, global search and mixed-kind sorting.
///
/// Null renders as an empty string, lists as comma-joined items, and maps as
/// JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::String(s) => f.write_str(s),
            Value::Guid(id) => write!(f, "{}", id),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Map(_) => write!(f, "{}", serde_json::Value::from(self.clone())),
        }
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Float(v as f64),
        }
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::from(v as u64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Guid(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(v: &serde_json::Value) -> Self {
        Value::from(v.clone())
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::from(i),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Decimal(d) => d
                .to_f64()
                .and_then(serde_json::Number::from_f64)
                .map(serde_json::Value::Number)
                .unwrap_or_else(|| serde_json::Value::String(d.to_string())),
            Value::String(s) => serde_json::Value::String(s),
            Value::Guid(id) => serde_json::Value::String(id.to_string()),
            Value::Date(d) => serde_json::Value::String(d.format("%Y-%m-%d").to_string()),
            Value::DateTime(dt) => serde_json::Value::String(dt.to_rfc3339()),
            Value::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(fields) => serde_json::Value::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(Value::from("a").kind(), ValueKind::String);
        assert_eq!(Value::from(Uuid::nil()).kind(), ValueKind::String);
        assert_eq!(Value::from(3).kind(), ValueKind::Number);
        assert_eq!(Value::from(2.5).kind(), ValueKind::Number);
        assert_eq!(Value::from(Decimal::new(125, 2)).kind(), ValueKind::Number);
        assert_eq!(Value::from(true).kind(), ValueKind::Boolean);
        assert_eq!(
            Value::from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).kind(),
            ValueKind::Date
        );
        assert_eq!(Value::Null.kind(), ValueKind::Unknown);
        assert_eq!(Value::List(vec![]).kind(), ValueKind::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::from(30.0).to_string(), "30");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::from(Decimal::new(1999, 2)).to_string(), "19.99");
        assert_eq!(
            Value::from(vec![Value::from("a"), Value::from(1)]).to_string(),
            "a,1"
        );
        assert_eq!(
            Value::from(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).to_string(),
            "2024-03-01"
        );
    }

    #[test]
    fn test_is_blank() {
        assert!(Value::Null.is_blank());
        assert!(Value::from("   ").is_blank());
        assert!(Value::List(vec![]).is_blank());
        assert!(!Value::from(0).is_blank());
        assert!(!Value::from(false).is_blank());
    }

    #[test]
    fn test_as_f64_coercion() {
        assert_eq!(Value::from(" 42 ").as_f64(), Some(42.0));
        assert_eq!(Value::from("4.5").as_f64(), Some(4.5));
        assert_eq!(Value::from("forty").as_f64(), None);
        assert_eq!(Value::from("").as_f64(), None);
        assert_eq!(Value::from(true).as_f64(), Some(1.0));
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn test_as_bool_coercion() {
        assert_eq!(Value::from("TRUE").as_bool(), Some(true));
        assert_eq!(Value::from("no").as_bool(), Some(false));
        assert_eq!(Value::from("0").as_bool(), Some(false));
        assert_eq!(Value::from(2).as_bool(), Some(true));
        assert_eq!(Value::from("maybe").as_bool(), None);
        assert_eq!(Value::Null.as_bool(), None);
    }

    #[test]
    fn test_as_local_date_parses_strings() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(Value::from("2024-01-15").as_local_date(), Some(expected));
        assert_eq!(
            Value::from("2024-01-15 08:30:00").as_local_date(),
            Some(expected)
        );
        assert_eq!(Value::from("not a date").as_local_date(), None);
    }

    #[test]
    fn test_epoch_millis() {
        let date = Value::from(NaiveDate::from_ymd_opt(1970, 1, 2).unwrap());
        assert_eq!(date.epoch_millis(), Some(86_400_000));
        assert_eq!(Value::from("1970-01-02").epoch_millis(), None);
    }

    #[test]
    fn test_get_segment() {
        let value = Value::from(serde_json::json!({
            "location": { "city": "Delhi" },
            "tags": ["fort", "heritage"]
        }));
        let city = value.get("location").and_then(|v| v.get("city"));
        assert_eq!(city, Some(&Value::from("Delhi")));
        assert_eq!(
            value.get("tags").and_then(|v| v.get("1")),
            Some(&Value::from("heritage"))
        );
        assert_eq!(value.get("missing"), None);
    }

    #[test]
    fn test_json_conversion() {
        let value = Value::from(serde_json::json!({ "age": 30, "score": 2.5, "name": null }));
        assert_eq!(value.get("age"), Some(&Value::Int(30)));
        assert_eq!(value.get("score"), Some(&Value::Float(2.5)));
        assert_eq!(value.get("name"), Some(&Value::Null));

        let json: serde_json::Value = Value::from(Uuid::nil()).into();
        assert_eq!(json, serde_json::json!("00000000-0000-0000-0000-000000000000"));
    }
}
