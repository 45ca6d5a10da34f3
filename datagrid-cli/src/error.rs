//! CliError for loading inputs and writing output

use std::io;
use std::path::Path;
use std::path::PathBuf;

use datagrid_lib::error::ConfigError;

/// Error type for the command line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The rows file is not valid JSON.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A columns or config file is not valid TOML.
    #[error("Invalid TOML in {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The rows file holds something other than an array of objects.
    #[error("{} must hold a JSON array of objects", path.display())]
    NotAnArray { path: PathBuf },

    /// Two rows resolved to the same id.
    #[error("Duplicate row id '{id}'; pick a unique field with --row-id")]
    DuplicateRowId { id: String },

    /// The column definitions are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn toml(path: &Path, source: toml::de::Error) -> Self {
        Self::Toml {
            path: path.to_path_buf(),
            source,
        }
    }
}
