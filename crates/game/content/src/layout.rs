//! Static map layouts.
//!
//! Layouts are drawn as character rows:
//!
//! ```text
//! #  wall
//! .  floor
//! a  portal entry (any lowercase letter)
//! A  exit of the portal with the matching lowercase letter
//! ```
//!
//! Every other character is floor. An exit letter without a matching entry is
//! plain floor.

use std::collections::BTreeMap;

use delve_core::{MapDimensions, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,

    #[error("row {row} is {found} tiles wide, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("portal '{0}' has no exit")]
    MissingExit(char),

    #[error("portal '{0}' appears more than once")]
    DuplicatePortal(char),
}

/// Terrain only: walls, portals, and dimensions. Entities come from scenarios.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapLayout {
    pub dimensions: MapDimensions,
    pub walls: Vec<Position>,
    /// Entry tile to exit tile.
    pub portals: Vec<(Position, Position)>,
}

impl MapLayout {
    /// An open room with no walls or portals.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            dimensions: MapDimensions::new(width, height),
            walls: Vec::new(),
            portals: Vec::new(),
        }
    }

    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, LayoutError> {
        let width = rows.first().ok_or(LayoutError::Empty)?.as_ref().chars().count();
        if width == 0 {
            return Err(LayoutError::Empty);
        }

        let mut walls = Vec::new();
        let mut entries: BTreeMap<char, Position> = BTreeMap::new();
        let mut exits: BTreeMap<char, Position> = BTreeMap::new();

        for (y, row) in rows.iter().enumerate() {
            let found = row.as_ref().chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for (x, tile) in row.as_ref().chars().enumerate() {
                let position = Position::new(x as i32, y as i32);
                match tile {
                    '#' => walls.push(position),
                    c if c.is_ascii_lowercase() => {
                        if entries.insert(c, position).is_some() {
                            return Err(LayoutError::DuplicatePortal(c));
                        }
                    }
                    c if c.is_ascii_uppercase() => {
                        let key = c.to_ascii_lowercase();
                        if exits.insert(key, position).is_some() {
                            return Err(LayoutError::DuplicatePortal(key));
                        }
                    }
                    _ => {}
                }
            }
        }

        let portals = entries
            .into_iter()
            .map(|(key, entry)| {
                exits
                    .get(&key)
                    .map(|exit| (entry, *exit))
                    .ok_or(LayoutError::MissingExit(key))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, rows.len() as u32),
            walls,
            portals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_walls_and_portals() {
        let layout = MapLayout::parse(&["#####", "#a.A#", "#####"]).expect("valid layout");
        assert_eq!(layout.dimensions, MapDimensions::new(5, 3));
        assert_eq!(layout.walls.len(), 12);
        assert_eq!(
            layout.portals,
            vec![(Position::new(1, 1), Position::new(3, 1))]
        );
    }

    #[test]
    fn rejects_bad_layouts() {
        assert_eq!(MapLayout::parse::<&str>(&[]), Err(LayoutError::Empty));
        assert_eq!(
            MapLayout::parse(&["###", "##"]),
            Err(LayoutError::Ragged {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            MapLayout::parse(&["a.."]),
            Err(LayoutError::MissingExit('a'))
        );
        assert_eq!(
            MapLayout::parse(&["a.a", "A.."]),
            Err(LayoutError::DuplicatePortal('a'))
        );
    }
}
