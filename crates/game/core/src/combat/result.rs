//! Attack profiles and the pure roll that turns one into hit and damage.

use crate::dice::{DiceExpr, d20};
use crate::env::RollStream;
use crate::state::{EntityId, StatusEffectKind, StatusEffects};
use crate::stats::{CombatStats, DamageType, Weapon};

use super::death::DeathEvent;
use super::hit::{HitRoll, check_hit};

/// How an entity attacks: a wielded weapon or its natural attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackProfile {
    pub name: String,
    pub damage: DiceExpr,
    pub damage_type: DamageType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub to_hit_bonus: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_bonus: i32,
    /// Overrides the attacker's crit threshold (keen weapons).
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_threshold: Option<u8>,
    /// Finesse and ranged attacks use dexterity instead of strength.
    #[cfg_attr(feature = "serde", serde(default))]
    pub uses_dexterity: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranged: bool,
    /// Chebyshev reach in tiles.
    #[cfg_attr(feature = "serde", serde(default = "default_reach"))]
    pub reach: u32,
}

#[cfg(feature = "serde")]
fn default_reach() -> u32 {
    1
}

impl AttackProfile {
    /// A melee natural attack with reach 1.
    pub fn natural(name: impl Into<String>, damage: DiceExpr, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            damage,
            damage_type,
            to_hit_bonus: 0,
            damage_bonus: 0,
            crit_threshold: None,
            uses_dexterity: false,
            ranged: false,
            reach: 1,
        }
    }

    pub fn from_weapon(weapon: &Weapon) -> Self {
        Self {
            name: weapon.name.clone(),
            damage: weapon.damage,
            damage_type: weapon.damage_type,
            to_hit_bonus: weapon.to_hit_bonus,
            damage_bonus: weapon.damage_bonus,
            crit_threshold: weapon.crit_threshold,
            uses_dexterity: weapon.finesse || weapon.ranged,
            ranged: weapon.ranged,
            reach: weapon.reach.max(1),
        }
    }

    pub fn with_to_hit(mut self, bonus: i32) -> Self {
        self.to_hit_bonus = bonus;
        self
    }

    pub const fn is_melee(&self) -> bool {
        !self.ranged
    }

    /// Strength or dexterity, whichever this attack keys off.
    pub fn ability_modifier(&self, stats: &CombatStats) -> i32 {
        if self.uses_dexterity {
            stats.modifiers.dexterity
        } else {
            stats.modifiers.strength
        }
    }

    /// Crit threshold for `stats` wielding this attack.
    pub fn crit_threshold_for(&self, stats: &CombatStats) -> u8 {
        self.crit_threshold.unwrap_or(stats.crit_threshold)
    }
}

/// The d20 half of an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackRoll {
    pub natural: u8,
    pub to_hit: i32,
    pub armor_class: i32,
    pub result: HitRoll,
}

/// Everything one attack did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackOutcome {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub roll: AttackRoll,
    pub surprise: bool,
    /// Damage rolled before resistance. Zero on a miss.
    pub raw_damage: i32,
    /// Hit points removed from the defender.
    pub damage: i32,
    /// Poison applied by a venom ring.
    pub venom_applied: bool,
    /// Damage reflected back by a thorns ring.
    pub reflected: i32,
    pub deaths: Vec<DeathEvent>,
}

impl AttackOutcome {
    pub fn landed(&self) -> bool {
        self.roll.result.landed()
    }

    pub fn killed(&self, id: EntityId) -> bool {
        self.deaths.iter().any(|death| death.entity == id)
    }
}

/// Pure outcome of the dice for one attack, before anything is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackResult {
    pub roll: AttackRoll,
    pub raw_damage: i32,
}

/// Rolls to-hit and, on a hit, damage.
///
/// Damage is the profile's dice (rolled twice on a critical) plus the ability
/// modifier, the profile bonus, the attacker's power, and any rage, floored
/// at 0. Resistance is not applied here.
pub fn roll_attack(
    attacker: &CombatStats,
    attacker_status: Option<&StatusEffects>,
    profile: &AttackProfile,
    armor_class: i32,
    surprise: bool,
    stream: &mut RollStream<'_>,
) -> AttackResult {
    let ability = profile.ability_modifier(attacker);
    let natural = d20(stream);
    let to_hit = ability + profile.to_hit_bonus;
    let result = check_hit(
        natural,
        to_hit,
        armor_class,
        profile.crit_threshold_for(attacker),
        surprise,
    );

    let raw_damage = if result.landed() {
        let dice = if result.is_critical() {
            profile.damage.roll_critical(stream)
        } else {
            profile.damage.roll(stream)
        };
        let rage = attacker_status.map_or(0, |s| s.magnitude(StatusEffectKind::Rage));
        (dice + ability + profile.damage_bonus + attacker.power + rage).max(0)
    } else {
        0
    };

    AttackResult {
        roll: AttackRoll {
            natural,
            to_hit,
            armor_class,
            result,
        },
        raw_damage,
    }
}
