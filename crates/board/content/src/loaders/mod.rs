//! Content loaders for reading board data from files.
//!
//! Every loader returns `anyhow` results with the failing path or format in
//! the message, so hosts can surface them as-is.

pub mod config;
pub mod encounter;
pub mod factory;
pub mod maneuver;

pub use config::ConfigLoader;
pub use encounter::EncounterLoader;
pub use factory::ContentFactory;
pub use maneuver::ManeuverLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
