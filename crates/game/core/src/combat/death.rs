use crate::state::{EntityId, HazardKind, StatusEffectKind};

/// What killed an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathCause {
    Attack { attacker: EntityId },
    Hazard { kind: HazardKind },
    Status { kind: StatusEffectKind },
    /// Damage reflected by the defender's thorns.
    Reflect { source: EntityId },
}

impl DeathCause {
    /// Death line for the message layer. `killer` is the attacker's or
    /// reflector's name when the cause has one.
    pub fn describe(&self, victim: &str, killer: Option<&str>) -> String {
        let killer = killer.unwrap_or("something");
        match self {
            DeathCause::Attack { .. } => format!("{victim} is slain by {killer}."),
            DeathCause::Hazard { kind } => format!("{victim} perishes in {}.", kind.noun()),
            DeathCause::Status { kind } => match kind {
                StatusEffectKind::Poison => format!("{victim} succumbs to poison."),
                other => format!("{victim} dies of {other}."),
            },
            DeathCause::Reflect { .. } => {
                format!("{victim} is torn apart by {killer}'s thorns.")
            }
        }
    }

    /// Entity credited with the kill, if any.
    pub const fn killer(&self) -> Option<EntityId> {
        match self {
            DeathCause::Attack { attacker } => Some(*attacker),
            DeathCause::Reflect { source } => Some(*source),
            DeathCause::Hazard { .. } | DeathCause::Status { .. } => None,
        }
    }

    pub const fn is_hazard(&self) -> bool {
        matches!(self, DeathCause::Hazard { .. })
    }
}

/// Signal that an entity's hp reached zero. The death pipeline consumes it;
/// nothing in the core removes the entity itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeathEvent {
    pub entity: EntityId,
    pub cause: DeathCause,
}

impl DeathEvent {
    pub const fn new(entity: EntityId, cause: DeathCause) -> Self {
        Self { entity, cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_deaths_name_the_hazard() {
        let cause = DeathCause::Hazard {
            kind: HazardKind::Fire,
        };
        assert_eq!(cause.describe("Orc", None), "Orc perishes in flames.");
        assert!(cause.is_hazard());
        assert_eq!(cause.killer(), None);
    }

    #[test]
    fn attack_deaths_credit_the_attacker() {
        let cause = DeathCause::Attack {
            attacker: EntityId(3),
        };
        assert_eq!(cause.killer(), Some(EntityId(3)));
        assert_eq!(
            cause.describe("Hero", Some("the shade")),
            "Hero is slain by the shade."
        );
    }
}
