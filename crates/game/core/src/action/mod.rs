//! Actions an entity can take on its turn, and what they did.
//!
//! Actions are plain data. The AI and player input produce them, and the
//! runtime's executor applies them to the state and reports an
//! [`ActionOutcome`]. Both sides serialize so a session's action log can be
//! replayed and compared byte for byte.

use crate::combat::{AttackOutcome, DeathEvent};
use crate::state::{EntityId, HazardKind, Position};

/// One decision for one turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    #[default]
    Wait,
    /// Step to an adjacent tile.
    Move { to: Position },
    /// Attack with the actor's current attack profile.
    Attack {
        target: EntityId,
        /// Set by an ambush from behind; forces a critical.
        surprise: bool,
    },
    /// Consume a corpse to raise a thrall on its tile.
    RaiseDead { corpse: EntityId },
    /// Cover an area in a ground hazard.
    CastHazard { kind: HazardKind, center: Position },
}

impl Action {
    pub const fn attack(target: EntityId) -> Self {
        Action::Attack {
            target,
            surprise: false,
        }
    }

    /// Whether this action is a cooldown-gated special ability.
    pub const fn is_special(&self) -> bool {
        matches!(self, Action::RaiseDead { .. } | Action::CastHazard { .. })
    }

    /// Short label for logs.
    pub const fn label(&self) -> &'static str {
        match self {
            Action::Wait => "wait",
            Action::Move { .. } => "move",
            Action::Attack { .. } => "attack",
            Action::RaiseDead { .. } => "raise_dead",
            Action::CastHazard { .. } => "cast_hazard",
        }
    }
}

/// What an executed action actually did.
///
/// Illegal requests resolve to `Blocked`, `RaiseFailed`, or `Invalid` and
/// leave the state untouched; they are not errors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionOutcome {
    Waited,
    Moved {
        from: Position,
        to: Position,
        via_portal: bool,
    },
    /// Destination was a wall, occupied, out of reach, or a forbidden portal.
    Blocked,
    Attacked(AttackOutcome),
    Raised {
        corpse: EntityId,
        thrall: EntityId,
    },
    /// The corpse was no longer eligible when the raise resolved.
    RaiseFailed { corpse: EntityId },
    HazardCast {
        kind: HazardKind,
        center: Position,
        tiles: usize,
    },
    /// Target missing, dead, or out of range.
    Invalid,
}

impl ActionOutcome {
    /// Whether a special ability went off and should start its cooldown.
    pub const fn special_succeeded(&self) -> bool {
        matches!(
            self,
            ActionOutcome::Raised { .. } | ActionOutcome::HazardCast { .. }
        )
    }

    pub const fn used_portal(&self) -> bool {
        matches!(
            self,
            ActionOutcome::Moved {
                via_portal: true,
                ..
            }
        )
    }

    /// Attack outcome, if this was an attack.
    pub const fn attack(&self) -> Option<&AttackOutcome> {
        match self {
            ActionOutcome::Attacked(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Deaths the action caused. Only attacks kill directly.
    pub fn deaths(&self) -> &[DeathEvent] {
        self.attack().map_or(&[], |outcome| outcome.deaths.as_slice())
    }
}
