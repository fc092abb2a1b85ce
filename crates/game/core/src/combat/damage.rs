//! Damage application shared by attacks, hazards, and periodic effects.

use crate::stats::{CombatStats, DamageType};

/// Reduces `raw` by a mitigation percentage, rounding down.
///
/// Never negative, so damage can never heal.
pub fn apply_resistance(raw: i32, percent: u8) -> i32 {
    if raw <= 0 {
        return 0;
    }
    let percent = percent.min(100) as i64;
    (raw as i64 * (100 - percent) / 100) as i32
}

/// What one application of damage did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageReport {
    /// Damage before resistance.
    pub raw: i32,
    /// Damage after resistance.
    pub mitigated: i32,
    /// Hit points actually removed (capped by remaining hp).
    pub dealt: i32,
    pub hp_after: i32,
    /// The target dropped to 0 hp with this application.
    pub killed: bool,
}

/// Applies `raw` damage of `damage_type` through the target's resistances.
pub fn apply_damage(stats: &mut CombatStats, raw: i32, damage_type: DamageType) -> DamageReport {
    let raw = raw.max(0);
    let was_alive = !stats.is_dead();
    let mitigated = apply_resistance(raw, stats.resistances.get(damage_type));
    let dealt = stats.take_damage(mitigated);
    DamageReport {
        raw,
        mitigated,
        dealt,
        hp_after: stats.hp,
        killed: was_alive && stats.is_dead(),
    }
}

/// Restores up to `amount` hit points, returning what was restored.
pub fn heal(stats: &mut CombatStats, amount: i32) -> i32 {
    if stats.is_dead() {
        return 0;
    }
    stats.heal(amount)
}
