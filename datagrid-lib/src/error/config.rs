//! Configuration errors raised while building a column registry

/// Error raised when a column registry or row-id accessor is misconfigured.
///
/// These are construction-time failures. Once a registry exists, evaluating
/// it never fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Two columns share the same id.
    #[error("Duplicate column id '{id}'")]
    DuplicateColumn { id: String },

    /// A column was declared with an empty id.
    #[error("Column id must not be empty")]
    EmptyColumnId,

    /// A column was given both a field path and an accessor function.
    #[error("Column '{id}' has both a field path and an accessor function")]
    ConflictingAccessor { id: String },

    /// A field path could not be parsed.
    #[error("Invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

impl ConfigError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(id: impl Into<String>) -> Self {
        Self::DuplicateColumn { id: id.into() }
    }

    /// Creates a new conflicting accessor error.
    pub fn conflicting_accessor(id: impl Into<String>) -> Self {
        Self::ConflictingAccessor { id: id.into() }
    }

    /// Creates a new invalid path error.
    pub fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason,
        }
    }
}
