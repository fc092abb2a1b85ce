//! Game configuration loader.

use std::path::Path;

use anyhow::Context;
use delve_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`GameConfig`] from TOML. Missing keys keep their defaults.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("in {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<GameConfig> {
        toml::from_str(content).context("failed to parse config TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::from_str("regeneration_period = 3\n").expect("parse");
        assert_eq!(config.regeneration_period, 3);
        assert_eq!(config.default_crit_threshold, GameConfig::DEFAULT_CRIT_THRESHOLD);
        assert_eq!(config.sight_range, GameConfig::DEFAULT_SIGHT_RANGE);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "sight_range = 4").expect("write");
        let config = ConfigLoader::load(file.path()).expect("load");
        assert_eq!(config.sight_range, 4);
    }

    #[test]
    fn bad_toml_names_the_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "sight_range = \"far\"").expect("write");
        let err = ConfigLoader::load(file.path()).expect_err("type mismatch");
        assert!(format!("{err:#}").contains(&file.path().display().to_string()));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(ConfigLoader::load(&dir.path().join("absent.toml")).is_err());
    }
}
