//! Grid configuration

use serde::Deserialize;
use serde::Serialize;

/// Defaults applied when a grid starts a new query session.
///
/// # Example
///
/// ```
/// use datagrid_lib::GridConfig;
///
/// let config = GridConfig::default()
///     .with_default_page_size(25)
///     .with_global_search(false);
/// assert_eq!(config.default_page_size, 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Page size of a fresh query state.
    ///
    /// Default: 10
    pub default_page_size: usize,

    /// Page sizes a renderer may offer. Advisory: other sizes are accepted.
    ///
    /// Default: 5, 10, 25, 50, 100
    pub page_size_options: Vec<usize>,

    /// Whether the global text search applies.
    ///
    /// Default: true
    pub global_search: bool,
}

impl GridConfig {
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default page size. A size of 0 is coerced to 1.
    pub fn with_default_page_size(mut self, page_size: usize) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    /// Sets the page sizes offered to renderers.
    pub fn with_page_size_options(mut self, options: impl IntoIterator<Item = usize>) -> Self {
        self.page_size_options = options.into_iter().filter(|&n| n > 0).collect();
        self
    }

    /// Enables or disables the global text search.
    pub fn with_global_search(mut self, enabled: bool) -> Self {
        self.global_search = enabled;
        self
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_page_size: Self::DEFAULT_PAGE_SIZE,
            page_size_options: vec![5, 10, 25, 50, 100],
            global_search: true,
        }
    }
}
