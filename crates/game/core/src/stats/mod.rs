//! Combat statistics and equipment.
//!
//! - [`combat`]: hit points, ability modifiers, damage types, resistances
//! - [`equipment`]: weapons, armor, rings, and the immunities rings grant

pub mod combat;
pub mod equipment;

pub use combat::{AbilityModifiers, CombatStats, DamageType, Resistances};
pub use equipment::{Armor, ArmorKind, Equipment, Immunities, RingKind, Weapon};
