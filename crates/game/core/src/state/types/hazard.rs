//! Ground hazards: positioned, decaying area effects.
//!
//! The registry holds at most one hazard per tile. Creating a hazard on a
//! tile that already has one replaces it.

use std::collections::BTreeMap;

use strum::{Display, EnumString};

use crate::config::GameConfig;
use crate::stats::DamageType;

use super::{EntityId, Position};

/// Kinds of ground hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum HazardKind {
    Fire,
    Poison,
}

impl HazardKind {
    pub const fn damage_type(self) -> DamageType {
        match self {
            HazardKind::Fire => DamageType::Fire,
            HazardKind::Poison => DamageType::Poison,
        }
    }

    /// Past-tense verb for damage messages ("burned", "poisoned").
    pub const fn verb(self) -> &'static str {
        match self {
            HazardKind::Fire => "burned",
            HazardKind::Poison => "poisoned",
        }
    }

    /// Noun used when describing a death caused by this hazard.
    pub const fn noun(self) -> &'static str {
        match self {
            HazardKind::Fire => "flames",
            HazardKind::Poison => "a cloud of poison",
        }
    }
}

/// Percent of base damage a hazard deals after `elapsed` turns of a
/// `duration`-turn life.
///
/// A three-step staircase over equal thirds of the duration (100%, 66%, 33%),
/// and 0 once the duration has run out.
pub fn decay_percent(elapsed: u32, duration: u32) -> u32 {
    if duration == 0 || elapsed >= duration {
        return 0;
    }
    let steps = GameConfig::HAZARD_DECAY_STEPS;
    let stage = (elapsed as u64 * steps.len() as u64 / duration as u64) as usize;
    steps[stage.min(steps.len() - 1)]
}

/// A single hazard occupying one tile.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundHazard {
    pub kind: HazardKind,
    pub position: Position,
    pub base_damage: i32,
    /// Configured total lifetime in turns.
    pub duration: u32,
    pub remaining_duration: u32,
    /// Entity that created the hazard, if any.
    pub source: Option<EntityId>,
}

impl GroundHazard {
    pub fn new(kind: HazardKind, position: Position, base_damage: i32, duration: u32) -> Self {
        Self {
            kind,
            position,
            base_damage: base_damage.max(0),
            duration,
            remaining_duration: duration,
            source: None,
        }
    }

    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Turns this hazard has already been processed.
    pub fn elapsed(&self) -> u32 {
        self.duration.saturating_sub(self.remaining_duration)
    }

    /// Damage this hazard deals on its next processing.
    pub fn current_damage(&self) -> i32 {
        let percent = decay_percent(self.elapsed(), self.duration) as i64;
        (self.base_damage as i64 * percent / 100) as i32
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_duration == 0
    }
}

/// Map-scoped hazard registry, keyed by tile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardRegistry {
    hazards: BTreeMap<Position, GroundHazard>,
}

impl HazardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a hazard, returning the one it replaced. Hazards with zero
    /// duration are never stored.
    pub fn insert(&mut self, hazard: GroundHazard) -> Option<GroundHazard> {
        if hazard.is_expired() {
            return None;
        }
        self.hazards.insert(hazard.position, hazard)
    }

    pub fn get(&self, position: Position) -> Option<&GroundHazard> {
        self.hazards.get(&position)
    }

    pub fn remove(&mut self, position: Position) -> Option<GroundHazard> {
        self.hazards.remove(&position)
    }

    /// Hazards in tile order.
    pub fn iter(&self) -> impl Iterator<Item = &GroundHazard> {
        self.hazards.values()
    }

    /// Ages every hazard by one turn and drops the ones that expire.
    /// Returns the expired hazards in tile order.
    pub fn age(&mut self) -> Vec<GroundHazard> {
        for hazard in self.hazards.values_mut() {
            hazard.remaining_duration = hazard.remaining_duration.saturating_sub(1);
        }
        let expired: Vec<Position> = self
            .hazards
            .values()
            .filter(|h| h.is_expired())
            .map(|h| h.position)
            .collect();
        expired
            .into_iter()
            .filter_map(|pos| self.hazards.remove(&pos))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.hazards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hazards.is_empty()
    }
}
