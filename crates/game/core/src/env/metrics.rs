use crate::state::Archetype;

/// Who made an attack, as far as balance statistics care.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackerKind {
    Player,
    Monster,
}

/// Counter sink consumed by balance tooling.
///
/// Every method defaults to a no-op so collectors only implement what they
/// aggregate.
pub trait MetricsSink: Send + Sync {
    /// Called once per resolved attack with the damage before resistance.
    fn record_attack(&self, _attacker: AttackerKind, _landed: bool, _raw_damage: i32) {}

    fn record_special(&self, _archetype: Archetype, _succeeded: bool) {}

    fn record_reanimation(&self) {}

    fn record_death(&self, _player: bool) {}

    fn record_hazard_death(&self) {}
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullMetrics;

impl MetricsSink for NullMetrics {}
