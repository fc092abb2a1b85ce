//! Combat statistics owned by every entity that can fight or be hurt.
//!
//! `CombatStats` is mutated only by the combat resolver, the status effect
//! manager and the hazard manager, always through [`CombatStats::take_damage`]
//! and [`CombatStats::heal`], which keep `0 <= hp <= max_hp`.

use std::collections::BTreeMap;

use strum::{Display, EnumString};

use crate::config::GameConfig;

/// Damage type for resistances and messaging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
    Fire,
    Poison,
    /// Untyped damage; only a resistance entry for `None` mitigates it.
    None,
}

/// Percent mitigation per damage type, each entry clamped to 0..=100.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resistances(BTreeMap<DamageType, u8>);

impl Resistances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    pub fn with(mut self, damage_type: DamageType, percent: u8) -> Self {
        self.set(damage_type, percent);
        self
    }

    pub fn set(&mut self, damage_type: DamageType, percent: u8) {
        self.0.insert(damage_type, percent.min(100));
    }

    /// Mitigation percentage for `damage_type` (0 when absent).
    pub fn get(&self, damage_type: DamageType) -> u8 {
        self.0.get(&damage_type).copied().unwrap_or(0).min(100)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DamageType, u8)> + '_ {
        self.0.iter().map(|(kind, pct)| (*kind, *pct))
    }
}

/// Ability score modifiers, already converted from raw scores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityModifiers {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
}

impl AbilityModifiers {
    pub const fn new(strength: i32, dexterity: i32, constitution: i32) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
        }
    }
}

/// Hit points, offense, defense, and mitigation for one entity.
///
/// Omitted fields deserialize from [`CombatStats::default`], so stat blocks
/// only list what differs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatStats {
    pub hp: i32,
    pub max_hp: i32,
    /// Flat bonus added to every damage roll this entity makes.
    pub power: i32,
    /// Natural armor added to armor class.
    pub defense: i32,
    pub modifiers: AbilityModifiers,
    /// Minimum natural d20 that counts as a critical hit.
    pub crit_threshold: u8,
    /// Damage type of the entity's natural attack.
    pub damage_type: DamageType,
    pub resistances: Resistances,
}

impl CombatStats {
    /// Creates stats at full health with default crit threshold and no
    /// resistances.
    pub fn new(max_hp: i32, power: i32, defense: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            hp: max_hp,
            max_hp,
            power,
            defense,
            modifiers: AbilityModifiers::default(),
            crit_threshold: GameConfig::DEFAULT_CRIT_THRESHOLD,
            damage_type: DamageType::None,
            resistances: Resistances::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: AbilityModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = damage_type;
        self
    }

    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }

    pub fn with_crit_threshold(mut self, threshold: u8) -> Self {
        self.crit_threshold = threshold.clamp(1, 20);
        self
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Removes hit points, clamping at zero. Returns the amount removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let before = self.hp;
        self.hp = (self.hp - amount).max(0);
        before - self.hp
    }

    /// Restores hit points, clamping at `max_hp`. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        (self.hp - before).max(0)
    }

    /// Resets hit points to maximum.
    pub fn restore(&mut self) {
        self.hp = self.max_hp;
    }
}

impl Default for CombatStats {
    fn default() -> Self {
        Self::new(10, 0, 0)
    }
}
