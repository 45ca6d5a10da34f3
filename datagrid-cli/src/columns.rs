//! Column definitions for JSON rows.
//!
//! Columns come from a TOML file of `[[column]]` tables:
//!
//! ```toml
//! [[column]]
//! id = "city"
//! path = "address.city"
//! header = "City"
//! filter_type = "select"
//!
//! [[column]]
//! id = "notes"
//! sortable = false
//! visible = false
//! ```
//!
//! `path` defaults to the column id. Without a file, one text column is
//! inferred per key of the first row.

use std::fs;
use std::path::Path;

use datagrid_lib::column::Column;
use datagrid_lib::filter::FilterType;
use log::debug;
use serde::Deserialize;

use crate::error::CliError;

type JsonRow = serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ColumnsFile {
    #[serde(default, rename = "column")]
    columns: Vec<ColumnSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnSpec {
    pub id: String,
    pub path: Option<String>,
    pub header: Option<String>,
    #[serde(default = "enabled")]
    pub filterable: bool,
    #[serde(default)]
    pub filter_type: FilterType,
    #[serde(default = "enabled")]
    pub sortable: bool,
    #[serde(default = "enabled")]
    pub visible: bool,
}

fn enabled() -> bool {
    true
}

impl ColumnSpec {
    fn into_column(self) -> Column<JsonRow> {
        let path = self.path.unwrap_or_else(|| self.id.clone());
        let mut column = Column::new(self.id)
            .path(path)
            .filterable(self.filterable)
            .filter_type(self.filter_type)
            .sortable(self.sortable)
            .visible(self.visible);
        if let Some(header) = self.header {
            column = column.header(header);
        }
        column
    }
}

/// Parses column definitions from TOML text.
pub fn parse(text: &str) -> Result<Vec<Column<JsonRow>>, toml::de::Error> {
    let file: ColumnsFile = toml::from_str(text)?;
    Ok(file.columns.into_iter().map(ColumnSpec::into_column).collect())
}

/// Loads column definitions from a TOML file.
pub fn load(path: &Path) -> Result<Vec<Column<JsonRow>>, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::read(path, e))?;
    let columns = parse(&text).map_err(|e| CliError::toml(path, e))?;
    debug!("Loaded {} columns from {}", columns.len(), path.display());
    Ok(columns)
}

/// Infers one column per key of the first row. The filter type follows the
/// JSON type of the first row's value.
pub fn infer(rows: &[JsonRow]) -> Vec<Column<JsonRow>> {
    let Some(first) = rows.first().and_then(JsonRow::as_object) else {
        return Vec::new();
    };
    let columns: Vec<_> = first
        .iter()
        .map(|(key, value)| {
            let filter_type = match value {
                JsonRow::Bool(_) => FilterType::Boolean,
                JsonRow::Number(_) => FilterType::Number,
                _ => FilterType::Text,
            };
            Column::new(key.as_str()).path(key.as_str()).filter_type(filter_type)
        })
        .collect();
    debug!("Inferred {} columns from the first row", columns.len());
    columns
}
