/// Phases of one turn, in the fixed order they run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnPhase {
    /// External input produces one resolved player action.
    #[default]
    Player,
    /// Every living monster decides and acts once.
    Enemy,
    /// Hazards apply and age, status durations tick.
    Environment,
}

impl TurnPhase {
    pub const fn next(self) -> Self {
        match self {
            TurnPhase::Player => TurnPhase::Enemy,
            TurnPhase::Enemy => TurnPhase::Environment,
            TurnPhase::Environment => TurnPhase::Player,
        }
    }
}

/// Current phase and turn counter.
///
/// The single source of truth for "whose turn is it". Components read it;
/// only the turn manager advances it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnContext {
    pub phase: TurnPhase,
    pub turn_number: u64,
}

impl TurnContext {
    pub const fn new() -> Self {
        Self {
            phase: TurnPhase::Player,
            turn_number: 0,
        }
    }

    /// Moves to the next phase. The turn number increments exactly on the
    /// ENVIRONMENT to PLAYER edge.
    pub fn advance(&mut self) -> TurnPhase {
        let next = self.phase.next();
        if self.phase == TurnPhase::Environment {
            self.turn_number += 1;
        }
        self.phase = next;
        next
    }
}
