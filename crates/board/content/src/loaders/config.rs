//! Viewport configuration loader.

use std::path::Path;

use board_core::ViewportConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for viewport configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a viewport configuration from a TOML file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<ViewportConfig> {
        let content = read_file(path)?;
        Self::from_str(&content)
    }

    /// Parse a viewport configuration from TOML text.
    pub fn from_str(content: &str) -> LoadResult<ViewportConfig> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse viewport config TOML: {}", e))
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> LoadResult<ViewportConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(ViewportConfig::default()),
        }
    }
}
