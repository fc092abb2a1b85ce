//! Status effect set for actors.
//!
//! Effects are keyed by kind: an entity carries at most one instance of each
//! kind. Adding a kind that is already present refreshes its duration instead
//! of stacking. Durations count whole turns and are decremented once per turn
//! by the status effect manager.

use arrayvec::ArrayVec;
use strum::{Display, EnumString};

use crate::config::GameConfig;
use crate::stats::Immunities;

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum StatusEffectKind {
    /// Moves in a random direction instead of acting.
    Confusion,
    /// Acts only on even turns.
    Slow,
    /// Adds magnitude to armor class.
    Shield,
    /// Adds magnitude to damage, lowers armor class.
    Rage,
    /// Cannot be seen by hostile monsters. Attacking breaks it.
    Invisibility,
    /// Loses magnitude hit points at the start of each turn.
    Poison,
    /// Restores magnitude hit points at the start of each turn.
    Regeneration,
    /// Cannot act at all.
    Paralysis,
}

impl StatusEffectKind {
    /// Immunity flag that blocks this effect, if any.
    pub fn blocked_by(self) -> Immunities {
        match self {
            StatusEffectKind::Confusion => Immunities::CONFUSION,
            StatusEffectKind::Slow => Immunities::SLOW,
            StatusEffectKind::Paralysis => Immunities::PARALYSIS,
            StatusEffectKind::Poison => Immunities::POISON,
            _ => Immunities::empty(),
        }
    }

    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            StatusEffectKind::Confusion
                | StatusEffectKind::Slow
                | StatusEffectKind::Poison
                | StatusEffectKind::Paralysis
        )
    }
}

/// A single timed effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Whole turns left. The effect is removed when this reaches 0.
    pub remaining_duration: u32,
    pub magnitude: i32,
}

impl StatusEffect {
    pub const fn new(kind: StatusEffectKind, duration: u32, magnitude: i32) -> Self {
        Self {
            kind,
            remaining_duration: duration,
            magnitude,
        }
    }
}

/// How an insertion into a [`StatusEffects`] set resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectInsert {
    Added,
    Refreshed,
    /// Zero duration: nothing was stored.
    Ignored,
}

/// Active status effects on an actor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Magnitude of `kind`, or 0 when inactive.
    pub fn magnitude(&self, kind: StatusEffectKind) -> i32 {
        self.get(kind).map_or(0, |e| e.magnitude)
    }

    /// Inserts an effect. A duplicate kind keeps the longer duration and the
    /// larger magnitude, so a refresh never shortens an effect.
    ///
    /// Capacity equals the number of kinds, so a new kind always fits.
    pub fn insert(&mut self, effect: StatusEffect) -> EffectInsert {
        if effect.remaining_duration == 0 {
            return EffectInsert::Ignored;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.remaining_duration =
                existing.remaining_duration.max(effect.remaining_duration);
            existing.magnitude = existing.magnitude.max(effect.magnitude);
            return EffectInsert::Refreshed;
        }

        match self.effects.try_push(effect) {
            Ok(()) => EffectInsert::Added,
            Err(_) => EffectInsert::Ignored,
        }
    }

    /// Removes an effect immediately.
    pub fn remove(&mut self, kind: StatusEffectKind) -> Option<StatusEffect> {
        let idx = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(idx))
    }

    /// Decrements every duration by one and removes the effects that reach
    /// zero, returning their kinds in insertion order.
    pub fn tick(&mut self) -> Vec<StatusEffectKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining_duration = effect.remaining_duration.saturating_sub(1);
            if effect.remaining_duration == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining_duration > 0);
        expired
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
