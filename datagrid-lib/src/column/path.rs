//! Dotted field paths

use std::fmt;

use crate::error::ConfigError;

/// A dotted path into a row, such as `location.city`.
///
/// Paths are split eagerly. A path with empty segments is kept as-is by
/// [`FieldPath::new`] and rejected by [`FieldPath::validate`], which the
/// column registry runs at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Creates a path without validating it.
    pub fn new(path: impl Into<String>) -> Self {
        let raw = path.into();
        let segments = raw.split('.').map(|s| s.trim().to_string()).collect();
        Self { raw, segments }
    }

    /// Parses and validates a path.
    pub fn parse(path: &str) -> Result<Self, ConfigError> {
        let path = Self::new(path);
        path.validate()?;
        Ok(path)
    }

    /// Checks that the path is non-empty and has no empty segments.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raw.trim().is_empty() {
            return Err(ConfigError::invalid_path(&self.raw, "path is empty"));
        }
        if self.segments.iter().any(String::is_empty) {
            return Err(ConfigError::invalid_path(&self.raw, "empty segment"));
        }
        Ok(())
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the path as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_segments() {
        let path = FieldPath::parse("location.geo.lat").unwrap();
        assert_eq!(path.segments(), ["location", "geo", "lat"]);
        assert_eq!(path.to_string(), "location.geo.lat");
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(matches!(
            FieldPath::parse("a..b"),
            Err(ConfigError::InvalidPath { reason: "empty segment", .. })
        ));
        assert!(matches!(
            FieldPath::parse(".a"),
            Err(ConfigError::InvalidPath { .. })
        ));
        assert!(matches!(
            FieldPath::parse("  "),
            Err(ConfigError::InvalidPath { reason: "path is empty", .. })
        ));
    }
}
