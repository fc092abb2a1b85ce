//! Content factory for loading everything a session needs from one directory.

use std::path::{Path, PathBuf};

use delve_core::GameConfig;

use crate::catalog::ArchetypeCatalog;
use crate::layout::MapLayout;
use crate::loaders::{ArchetypeLoader, ConfigLoader, LoadResult, MapLoader};

/// Loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── archetypes.ron
/// ├── maps/
/// │   └── crypt.ron
/// └── scenarios/
///     └── crypt.ron
/// ```
#[derive(Clone, Debug)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    pub fn load_archetypes(&self) -> LoadResult<ArchetypeCatalog> {
        ArchetypeLoader::load(&self.data_dir.join("archetypes.ron"))
    }

    /// Loads `maps/{name}.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<MapLayout> {
        MapLoader::load(&self.data_dir.join("maps").join(format!("{name}.ron")))
    }

    /// Path of `scenarios/{name}.ron`. Scenario parsing lives with the
    /// runtime, which owns entity placement.
    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenarios").join(format!("{name}.ron"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::{Archetype, ArchetypeOracle};

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.scenario_path("crypt"),
            Path::new("/tmp/data/scenarios/crypt.ron")
        );
    }

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().expect("config");
        assert_eq!(config.regeneration_period, 5);

        let catalog = factory.load_archetypes().expect("archetypes");
        for (id, archetype) in [
            ("orc", Archetype::Brute),
            ("necromancer", Archetype::Necromancer),
            ("pyromancer", Archetype::Pyromancer),
            ("shade", Archetype::Shade),
        ] {
            assert_eq!(catalog.template(id).map(|t| t.archetype), Some(archetype));
        }

        let layout = factory.load_map("crypt").expect("map");
        assert!(!layout.portals.is_empty());
    }

    #[test]
    fn missing_directory_fails_cleanly() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path());
        assert!(factory.load_config().is_err());
        assert!(factory.load_archetypes().is_err());
        assert!(factory.load_map("nowhere").is_err());
    }
}
