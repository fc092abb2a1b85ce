//! Data-driven content definitions and loaders.
//!
//! - Archetype stat blocks (RON) collected into an [`ArchetypeCatalog`]
//! - Map layouts (RON, drawn as character rows)
//! - Game configuration (TOML)
//!
//! Content is consumed through the core's oracle traits and never appears in
//! game state.

pub mod catalog;
pub mod layout;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ArchetypeCatalog;
pub use layout::{LayoutError, MapLayout};

#[cfg(feature = "loaders")]
pub use loaders::{ArchetypeLoader, ConfigLoader, ContentFactory, LoadResult, MapLoader};
