//! To-hit math: armor class and the d20 check.

use crate::config::GameConfig;
use crate::state::{StatusEffectKind, StatusEffects};
use crate::stats::{CombatStats, Equipment};

/// Armor class of a defender.
///
/// ```text
/// AC = 10 + min(dex, armor cap) + armor bonus + ring protection
///         + shield magnitude - rage penalty + natural defense
/// ```
pub fn armor_class(
    stats: &CombatStats,
    equipment: Option<&Equipment>,
    status: Option<&StatusEffects>,
) -> i32 {
    let dexterity = stats.modifiers.dexterity;
    let (dex, armor, rings) = match equipment {
        Some(eq) => {
            let capped = eq
                .armor_kind()
                .dex_cap()
                .map_or(dexterity, |cap| dexterity.min(cap));
            (capped, eq.armor_bonus(), eq.ring_protection())
        }
        None => (dexterity, 0, 0),
    };

    let (shield, rage_penalty) = match status {
        Some(effects) => (
            effects.magnitude(StatusEffectKind::Shield),
            if effects.has(StatusEffectKind::Rage) {
                GameConfig::RAGE_AC_PENALTY
            } else {
                0
            },
        ),
        None => (0, 0),
    };

    GameConfig::BASE_ARMOR_CLASS + dex + armor + rings + shield - rage_penalty + stats.defense
}

/// Classification of a d20 attack roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitRoll {
    /// Natural 1: misses regardless of bonuses.
    Fumble,
    Miss,
    Hit,
    /// Natural roll at or above the crit threshold, or a surprise attack.
    Critical,
}

impl HitRoll {
    pub const fn landed(self) -> bool {
        matches!(self, HitRoll::Hit | HitRoll::Critical)
    }

    pub const fn is_critical(self) -> bool {
        matches!(self, HitRoll::Critical)
    }
}

/// Classifies one attack roll.
///
/// A natural 1 always fumbles, even on a surprise attack. Otherwise a natural
/// roll at or above `crit_threshold`, or any surprise attack, is critical.
/// Remaining rolls hit when `natural + to_hit >= armor_class`.
pub fn check_hit(
    natural: u8,
    to_hit: i32,
    armor_class: i32,
    crit_threshold: u8,
    surprise: bool,
) -> HitRoll {
    if natural <= 1 {
        return HitRoll::Fumble;
    }
    if surprise || natural >= crit_threshold {
        return HitRoll::Critical;
    }
    if natural as i32 + to_hit >= armor_class {
        HitRoll::Hit
    } else {
        HitRoll::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusEffect;
    use crate::stats::{AbilityModifiers, Armor, ArmorKind, RingKind};

    #[test]
    fn natural_twenty_always_crits() {
        assert_eq!(check_hit(20, 0, 10, 20, false), HitRoll::Critical);
        assert_eq!(check_hit(20, -15, 40, 20, false), HitRoll::Critical);
    }

    #[test]
    fn natural_one_always_misses() {
        assert_eq!(check_hit(1, 50, 10, 20, false), HitRoll::Fumble);
        assert_eq!(check_hit(1, 50, 10, 20, true), HitRoll::Fumble);
    }

    #[test]
    fn keen_threshold_widens_crits() {
        assert_eq!(check_hit(19, 0, 30, 19, false), HitRoll::Critical);
        assert_eq!(check_hit(19, 0, 30, 20, false), HitRoll::Miss);
    }

    #[test]
    fn meets_it_beats_it() {
        assert_eq!(check_hit(10, 0, 10, 20, false), HitRoll::Hit);
        assert_eq!(check_hit(9, 0, 10, 20, false), HitRoll::Miss);
    }

    #[test]
    fn surprise_is_critical() {
        assert_eq!(check_hit(2, 0, 30, 20, true), HitRoll::Critical);
    }

    #[test]
    fn heavy_armor_ignores_dexterity() {
        let stats =
            CombatStats::new(10, 0, 0).with_modifiers(AbilityModifiers::new(0, 4, 0));
        assert_eq!(armor_class(&stats, None, None), 14);

        let medium = Equipment::new().with_armor(Armor::new("scale", ArmorKind::Medium, 4));
        assert_eq!(armor_class(&stats, Some(&medium), None), 16);

        let heavy = Equipment::new().with_armor(Armor::new("plate", ArmorKind::Heavy, 8));
        assert_eq!(armor_class(&stats, Some(&heavy), None), 18);
    }

    #[test]
    fn rings_and_statuses_adjust_ac() {
        let stats = CombatStats::new(10, 0, 1);
        let eq = Equipment::new().with_ring(RingKind::Protection(2));
        let mut effects = StatusEffects::empty();
        effects.insert(StatusEffect::new(StatusEffectKind::Shield, 3, 3));
        assert_eq!(armor_class(&stats, Some(&eq), Some(&effects)), 16);

        effects.insert(StatusEffect::new(StatusEffectKind::Rage, 3, 2));
        assert_eq!(armor_class(&stats, Some(&eq), Some(&effects)), 14);
    }
}
