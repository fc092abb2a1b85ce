//! Worn and wielded items relevant to combat: weapons, armor, and rings.
//!
//! Inventory management is out of scope; an entity's `Equipment` is whatever
//! the external inventory layer last equipped.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::GameConfig;
use crate::dice::DiceExpr;

use super::DamageType;

bitflags! {
    /// Status effects an entity cannot receive.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Immunities: u8 {
        const CONFUSION = 0b0001;
        const SLOW = 0b0010;
        const PARALYSIS = 0b0100;
        const POISON = 0b1000;
    }
}

/// A wielded weapon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub name: String,
    pub damage: DiceExpr,
    #[cfg_attr(feature = "serde", serde(default))]
    pub to_hit_bonus: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_bonus: i32,
    pub damage_type: DamageType,
    /// Keen weapons crit below 20. `None` uses the wielder's threshold.
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_threshold: Option<u8>,
    /// Finesse weapons use dexterity instead of strength.
    #[cfg_attr(feature = "serde", serde(default))]
    pub finesse: bool,
    /// Ranged weapons always use dexterity.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ranged: bool,
    /// Attack reach in tiles (Chebyshev).
    #[cfg_attr(feature = "serde", serde(default = "default_reach"))]
    pub reach: u32,
}

#[cfg(feature = "serde")]
fn default_reach() -> u32 {
    1
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage: DiceExpr, damage_type: DamageType) -> Self {
        Self {
            name: name.into(),
            damage,
            to_hit_bonus: 0,
            damage_bonus: 0,
            damage_type,
            crit_threshold: None,
            finesse: false,
            ranged: false,
            reach: 1,
        }
    }

    pub fn with_bonuses(mut self, to_hit: i32, damage: i32) -> Self {
        self.to_hit_bonus = to_hit;
        self.damage_bonus = damage;
        self
    }

    pub fn keen(mut self, threshold: u8) -> Self {
        self.crit_threshold = Some(threshold.clamp(1, 20));
        self
    }

    pub fn finesse(mut self) -> Self {
        self.finesse = true;
        self
    }
}

/// Armor category; determines how much dexterity counts toward armor class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmorKind {
    Unarmored,
    Light,
    Medium,
    Heavy,
}

impl ArmorKind {
    /// Maximum dexterity modifier applied to armor class (`None` = uncapped).
    pub const fn dex_cap(self) -> Option<i32> {
        match self {
            ArmorKind::Unarmored | ArmorKind::Light => None,
            ArmorKind::Medium => Some(2),
            ArmorKind::Heavy => Some(0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub name: String,
    pub kind: ArmorKind,
    pub bonus: i32,
}

impl Armor {
    pub fn new(name: impl Into<String>, kind: ArmorKind, bonus: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            bonus,
        }
    }
}

/// Ring enchantments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RingKind {
    /// Heals on every regeneration period.
    Regeneration,
    /// Flat armor class bonus.
    Protection(i32),
    /// Immunity to slow and paralysis.
    FreeAction,
    /// Immunity to confusion.
    ClearThought,
    /// Reflects this much damage to a melee attacker that draws blood.
    Thorns(i32),
    /// Poisons the target on a successful hit.
    Venom(i32),
}

impl RingKind {
    pub fn immunities(self) -> Immunities {
        match self {
            RingKind::FreeAction => Immunities::SLOW | Immunities::PARALYSIS,
            RingKind::ClearThought => Immunities::CONFUSION,
            _ => Immunities::empty(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RingKind::Regeneration => "ring of regeneration",
            RingKind::Protection(_) => "ring of protection",
            RingKind::FreeAction => "ring of free action",
            RingKind::ClearThought => "ring of clear thought",
            RingKind::Thorns(_) => "ring of thorns",
            RingKind::Venom(_) => "ring of venom",
        }
    }
}

type RingSlots = ArrayVec<RingKind, { GameConfig::MAX_RINGS }>;

/// Everything an entity currently wears or wields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Equipment {
    pub weapon: Option<Weapon>,
    pub armor: Option<Armor>,
    rings: RingSlots,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Puts on a ring. Returns false when both ring slots are taken.
    pub fn equip_ring(&mut self, ring: RingKind) -> bool {
        self.rings.try_push(ring).is_ok()
    }

    pub fn with_ring(mut self, ring: RingKind) -> Self {
        self.equip_ring(ring);
        self
    }

    pub fn remove_ring(&mut self, ring: RingKind) -> bool {
        match self.rings.iter().position(|r| *r == ring) {
            Some(idx) => {
                self.rings.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn rings(&self) -> impl Iterator<Item = RingKind> + '_ {
        self.rings.iter().copied()
    }

    pub fn immunities(&self) -> Immunities {
        self.rings()
            .fold(Immunities::empty(), |acc, ring| acc | ring.immunities())
    }

    pub fn armor_kind(&self) -> ArmorKind {
        self.armor
            .as_ref()
            .map_or(ArmorKind::Unarmored, |armor| armor.kind)
    }

    pub fn armor_bonus(&self) -> i32 {
        self.armor.as_ref().map_or(0, |armor| armor.bonus)
    }

    pub fn ring_protection(&self) -> i32 {
        self.rings()
            .map(|ring| match ring {
                RingKind::Protection(n) => n,
                _ => 0,
            })
            .sum()
    }

    pub fn has_regeneration(&self) -> bool {
        self.rings().any(|ring| ring == RingKind::Regeneration)
    }

    pub fn thorns(&self) -> i32 {
        self.rings()
            .map(|ring| match ring {
                RingKind::Thorns(n) => n.max(0),
                _ => 0,
            })
            .sum()
    }

    pub fn venom(&self) -> i32 {
        self.rings()
            .map(|ring| match ring {
                RingKind::Venom(n) => n.max(0),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_two_rings_fit() {
        let mut eq = Equipment::new();
        assert!(eq.equip_ring(RingKind::Regeneration));
        assert!(eq.equip_ring(RingKind::FreeAction));
        assert!(!eq.equip_ring(RingKind::ClearThought));
        assert_eq!(eq.rings().count(), 2);
    }

    #[test]
    fn immunities_union_across_rings() {
        let eq = Equipment::new()
            .with_ring(RingKind::FreeAction)
            .with_ring(RingKind::ClearThought);
        let immune = eq.immunities();
        assert!(immune.contains(Immunities::SLOW | Immunities::PARALYSIS | Immunities::CONFUSION));
        assert!(!immune.contains(Immunities::POISON));
    }

    #[test]
    fn dex_caps_follow_armor_weight() {
        assert_eq!(ArmorKind::Light.dex_cap(), None);
        assert_eq!(ArmorKind::Medium.dex_cap(), Some(2));
        assert_eq!(ArmorKind::Heavy.dex_cap(), Some(0));
    }
}
