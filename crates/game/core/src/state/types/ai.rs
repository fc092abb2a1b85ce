//! Per-monster AI bookkeeping.

use strum::{Display, EnumString};

use super::{EntityId, HazardKind};

/// Closed set of monster archetypes. Each variant owns a static priority list
/// of behaviors in the runtime.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Archetype {
    /// Plain melee monster.
    Brute,
    /// Raises corpses into thralls and keeps its distance.
    Necromancer,
    /// Conjures fire on the player from range.
    Pyromancer,
    /// Walks through portals and strikes from behind.
    Shade,
    /// A raised corpse fighting for its raiser.
    Thrall,
}

impl Archetype {
    /// Whether movement for this archetype may route through portal tiles.
    ///
    /// Fixed per archetype. Instances never override it.
    pub const fn portal_usable(self) -> bool {
        matches!(self, Archetype::Shade)
    }
}

/// Parameters of a ground-hazard spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardSpell {
    pub kind: HazardKind,
    pub base_damage: i32,
    pub duration: u32,
    /// Chebyshev radius of the burst around its center.
    pub radius: u32,
}

/// Ability tuning supplied by the archetype template.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AbilityParams {
    /// Turns the special ability stays unavailable after a successful use.
    pub cooldown: u32,
    /// Chebyshev range of the special ability.
    pub range: u32,
    /// Distance to the player this monster tries not to close.
    pub danger_radius: u32,
    pub hazard: Option<HazardSpell>,
}

/// Mutable AI memory owned by one monster.
///
/// Only the monster's own decision invocation writes to this.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AiState {
    pub archetype: Archetype,
    /// Archetype template this monster was built from.
    pub template_id: String,
    pub abilities: AbilityParams,
    pub sight_range: u32,
    /// Turns until the special ability is available again.
    pub ability_cooldown: u32,
    /// Corpse the monster was last moving toward.
    pub corpse_target: Option<EntityId>,
    /// Whether the previous action carried this monster through a portal.
    pub used_portal: bool,
}

impl AiState {
    pub fn new(
        archetype: Archetype,
        template_id: impl Into<String>,
        abilities: AbilityParams,
        sight_range: u32,
    ) -> Self {
        Self {
            archetype,
            template_id: template_id.into(),
            abilities,
            sight_range,
            ability_cooldown: 0,
            corpse_target: None,
            used_portal: false,
        }
    }

    pub const fn portal_usable(&self) -> bool {
        self.archetype.portal_usable()
    }

    pub const fn ability_ready(&self) -> bool {
        self.ability_cooldown == 0
    }

    /// Counts the cooldown down by one turn.
    pub fn tick_cooldown(&mut self) {
        self.ability_cooldown = self.ability_cooldown.saturating_sub(1);
    }

    /// Puts the special ability on its configured cooldown.
    pub fn start_cooldown(&mut self) {
        self.ability_cooldown = self.abilities.cooldown;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_shades_use_portals() {
        assert!(Archetype::Shade.portal_usable());
        for archetype in [
            Archetype::Brute,
            Archetype::Necromancer,
            Archetype::Pyromancer,
            Archetype::Thrall,
        ] {
            assert!(!archetype.portal_usable(), "{archetype}");
        }
    }

    #[test]
    fn cooldown_counts_down_to_zero() {
        let params = AbilityParams {
            cooldown: 2,
            ..AbilityParams::default()
        };
        let mut ai = AiState::new(Archetype::Necromancer, "necromancer", params, 6);
        assert!(ai.ability_ready());
        ai.start_cooldown();
        assert!(!ai.ability_ready());
        ai.tick_cooldown();
        ai.tick_cooldown();
        ai.tick_cooldown();
        assert_eq!(ai.ability_cooldown, 0);
    }

    #[test]
    fn archetype_parses_lowercase() {
        assert_eq!("shade".parse::<Archetype>(), Ok(Archetype::Shade));
        assert_eq!(Archetype::Pyromancer.to_string(), "pyromancer");
    }
}
