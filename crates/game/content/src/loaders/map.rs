//! Map layout loader.
//!
//! RON format: `(rows: ["#####", "#a.A#", ...])`, see [`MapLayout`] for the
//! tile legend.

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::layout::MapLayout;
use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct MapFile {
    rows: Vec<String>,
}

/// Loader for terrain layouts.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapLayout> {
        let content = read_file(path)?;
        Self::from_str(&content).with_context(|| format!("in {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> LoadResult<MapLayout> {
        let file: MapFile = ron::from_str(content).context("failed to parse map RON")?;
        Ok(MapLayout::parse(file.rows.as_slice())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::Position;

    #[test]
    fn parses_rows() {
        let layout = MapLoader::from_str(r#"(rows: ["a..", "..A"])"#).expect("parse");
        assert_eq!(
            layout.portals,
            vec![(Position::new(0, 0), Position::new(2, 1))]
        );
    }

    #[test]
    fn layout_errors_surface() {
        let err = MapLoader::from_str(r#"(rows: ["...", "."])"#).expect_err("ragged");
        assert!(err.to_string().contains("row 1"));
    }
}
