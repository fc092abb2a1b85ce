use crate::state::{Direction, Position};

/// Whether an attacker at `attacker` stands behind a defender at `defender`
/// that faces `facing`.
///
/// Behind means the attacker's offset from the defender points against the
/// facing: their dot product is strictly negative. A defender without a
/// facing has no back, and neither does one sharing the attacker's tile.
pub fn is_behind(attacker: Position, defender: Position, facing: Option<Direction>) -> bool {
    let Some(facing) = facing else {
        return false;
    };
    let (fx, fy) = facing.delta();
    let dx = attacker.x - defender.x;
    let dy = attacker.y - defender.y;
    dx * fx + dy * fy < 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directly_behind() {
        // Defender at origin faces east; attacker to the west.
        let defender = Position::ORIGIN;
        assert!(is_behind(Position::new(-1, 0), defender, Some(Direction::East)));
        assert!(is_behind(Position::new(-1, 1), defender, Some(Direction::East)));
        assert!(!is_behind(Position::new(1, 0), defender, Some(Direction::East)));
    }

    #[test]
    fn flank_is_not_behind() {
        let defender = Position::ORIGIN;
        assert!(!is_behind(Position::new(0, 1), defender, Some(Direction::East)));
    }

    #[test]
    fn diagonal_facing() {
        let defender = Position::new(5, 5);
        let facing = Some(Direction::NorthEast);
        assert!(is_behind(Position::new(4, 6), defender, facing));
        assert!(!is_behind(Position::new(4, 4), defender, facing));
    }

    #[test]
    fn no_facing_no_backstab() {
        assert!(!is_behind(Position::new(-1, 0), Position::ORIGIN, None));
    }
}
