//! Static dungeon layout served through [`delve_core::MapOracle`].
use std::collections::{BTreeMap, BTreeSet};

use delve_content::MapLayout;
use delve_core::{Direction, MapDimensions, MapOracle, Position};

/// MapOracle implementation with static map data.
///
/// Holds immutable terrain. Entities live in `GameState`, so the only dynamic
/// input to routing is the `occupied` callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    dimensions: MapDimensions,
    walls: BTreeSet<Position>,
    portals: BTreeMap<Position, Position>,
}

impl GridMap {
    pub fn new(dimensions: MapDimensions) -> Self {
        Self {
            dimensions,
            walls: BTreeSet::new(),
            portals: BTreeMap::new(),
        }
    }

    /// An open room with no walls or portals.
    pub fn open(width: u32, height: u32) -> Self {
        Self::new(MapDimensions::new(width, height))
    }

    pub fn from_layout(layout: &MapLayout) -> Self {
        Self {
            dimensions: layout.dimensions,
            walls: layout.walls.iter().copied().collect(),
            portals: layout.portals.iter().copied().collect(),
        }
    }

    pub fn with_wall(mut self, position: Position) -> Self {
        self.walls.insert(position);
        self
    }

    pub fn with_portal(mut self, entry: Position, exit: Position) -> Self {
        self.portals.insert(entry, exit);
        self
    }

    /// Where a step onto `tile` actually lands. Portals deliver to their exit
    /// when it is open; otherwise the mover stays on the entry tile.
    fn landing(&self, tile: Position, occupied: &dyn Fn(Position) -> bool) -> Position {
        match self.portals.get(&tile) {
            Some(&exit) if !self.is_blocked(exit) && !occupied(exit) => exit,
            _ => tile,
        }
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn is_blocked(&self, position: Position) -> bool {
        !self.dimensions.contains(position) || self.walls.contains(&position)
    }

    fn is_portal(&self, position: Position) -> bool {
        self.portals.contains_key(&position)
    }

    fn portal_exit(&self, position: Position) -> Option<Position> {
        self.portals.get(&position).copied()
    }

    /// Greedy step: the neighbor whose landing tile is closest to `to` by
    /// Chebyshev then Manhattan distance, ties broken row-major. Only strict
    /// improvements over standing still count as progress.
    fn next_step_toward(
        &self,
        from: Position,
        to: Position,
        allow_portals: bool,
        occupied: &dyn Fn(Position) -> bool,
    ) -> Option<Position> {
        let score = |pos: Position| (pos.chebyshev(to), pos.manhattan(to));
        let current = score(from);

        Direction::ALL
            .iter()
            .map(|&dir| from.step(dir))
            .filter(|&tile| self.can_enter(tile, allow_portals))
            .filter(|&tile| tile == to || !occupied(tile))
            .map(|tile| (score(self.landing(tile, occupied)), tile))
            .filter(|&(rank, _)| rank < current)
            .min_by_key(|&(rank, tile)| (rank, tile.row_major()))
            .map(|(_, tile)| tile)
    }
}
