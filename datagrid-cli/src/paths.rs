//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "datagrid";
const APPLICATION: &str = "datagrid";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory for logs.
///
/// - Linux: `$XDG_CACHE_HOME/datagrid` or `~/.cache/datagrid`
/// - macOS: `~/Library/Caches/dev.datagrid.datagrid`
/// - Windows: `C:\Users\<User>\AppData\Local\datagrid\datagrid\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/datagrid` or `~/.config/datagrid`
/// - macOS: `~/Library/Application Support/dev.datagrid.datagrid`
/// - Windows: `C:\Users\<User>\AppData\Roaming\datagrid\datagrid\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the grid config used when `--config` is not given.
pub fn default_config() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("grid.toml"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}
