//! Content loaders for reading battle data from files.
//!
//! Rosters are RON, battle configuration is TOML. Both deserialize straight
//! into battle-core configuration types.

pub mod config;
pub mod roster;

pub use config::ConfigLoader;
pub use roster::RosterLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses RON text, naming `what` in the error.
pub(crate) fn parse_ron<T>(content: &str, what: &str) -> LoadResult<T>
where
    T: serde::de::DeserializeOwned,
{
    ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse {} RON: {}", what, e))
}
