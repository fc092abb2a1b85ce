use crate::state::{Direction, Position};

/// Static map geometry plus the pathfinding answers the core consumes.
///
/// The core never computes routes. It asks "can I step here" and "what is
/// the next step toward X" and the implementation decides how.
pub trait MapOracle: Send + Sync {
    fn dimensions(&self) -> MapDimensions;

    /// Walls and out-of-bounds tiles.
    fn is_blocked(&self, position: Position) -> bool;

    /// Whether `position` is a portal entry tile.
    fn is_portal(&self, position: Position) -> bool;

    /// Where stepping onto the portal at `position` leads.
    fn portal_exit(&self, position: Position) -> Option<Position>;

    /// Next tile on a route from `from` toward `to`.
    ///
    /// `occupied` reports tiles held by living entities; the goal tile itself
    /// may be occupied. When `allow_portals` is false the route never touches
    /// a portal tile. `None` means no step makes progress.
    fn next_step_toward(
        &self,
        from: Position,
        to: Position,
        allow_portals: bool,
        occupied: &dyn Fn(Position) -> bool,
    ) -> Option<Position>;

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    /// Terrain-only check for entering `position`.
    fn can_enter(&self, position: Position, allow_portals: bool) -> bool {
        !self.is_blocked(position) && (allow_portals || !self.is_portal(position))
    }

    /// Enterable, unoccupied neighbors of `from` in [`Direction::ALL`] order.
    fn open_neighbors(
        &self,
        from: Position,
        allow_portals: bool,
        occupied: &dyn Fn(Position) -> bool,
    ) -> Vec<(Direction, Position)> {
        Direction::ALL
            .iter()
            .map(|&dir| (dir, from.step(dir)))
            .filter(|&(_, pos)| self.can_enter(pos, allow_portals) && !occupied(pos))
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }
}
