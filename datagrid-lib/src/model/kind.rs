//! Value kind tags

/// The kind of a [`Value`](super::Value), as seen by the comparator and filters.
///
/// This is a deliberately small, closed set. Values of different kinds are
/// compared by their text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Strings and GUIDs.
    String,
    /// Integers, floats and decimals.
    Number,
    /// Booleans.
    Boolean,
    /// Calendar dates and timestamps.
    Date,
    /// Null, lists and maps.
    Unknown,
}
