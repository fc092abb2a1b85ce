//! Content loaders for reading game data from files.
//!
//! Each loader has a `load(path)` entry point and a `from_str` variant used by
//! tests and embedded data.

pub mod archetypes;
pub mod config;
pub mod factory;
pub mod map;

pub use archetypes::ArchetypeLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::MapLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
