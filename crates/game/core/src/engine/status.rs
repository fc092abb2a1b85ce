//! Timed status effects and equipment passives, processed per entity.

use crate::combat::{DeathCause, DeathEvent, apply_damage, heal};
use crate::config::GameConfig;
use crate::env::{MessageLog, MessageTone};
use crate::state::{EffectInsert, Entity, StatusEffect, StatusEffectKind, StatusEffects};
use crate::stats::DamageType;

/// What statuses allow an entity to do this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Restriction {
    Free,
    /// Cannot act at all.
    Paralyzed,
    /// Slowed and the turn number is odd.
    Slowed,
    /// Acts, but stumbles in a random direction.
    Confused,
}

impl Restriction {
    pub const fn must_wait(self) -> bool {
        matches!(self, Restriction::Paralyzed | Restriction::Slowed)
    }
}

/// Restriction in force for `entity` on `turn_number`. Paralysis wins over
/// slow, which wins over confusion.
pub fn restriction(entity: &Entity, turn_number: u64) -> Restriction {
    let Some(status) = entity.status.as_ref() else {
        return Restriction::Free;
    };
    if status.has(StatusEffectKind::Paralysis) {
        Restriction::Paralyzed
    } else if status.has(StatusEffectKind::Slow) && turn_number % 2 == 1 {
        Restriction::Slowed
    } else if status.has(StatusEffectKind::Confusion) {
        Restriction::Confused
    } else {
        Restriction::Free
    }
}

fn applied_text(name: &str, kind: StatusEffectKind) -> String {
    match kind {
        StatusEffectKind::Confusion => format!("{name} looks confused."),
        StatusEffectKind::Slow => format!("{name} slows down."),
        StatusEffectKind::Shield => format!("{name} is surrounded by a shimmering shield."),
        StatusEffectKind::Rage => format!("{name} flies into a rage!"),
        StatusEffectKind::Invisibility => format!("{name} fades from sight."),
        StatusEffectKind::Poison => format!("{name} is poisoned!"),
        StatusEffectKind::Regeneration => format!("{name} begins to regenerate."),
        StatusEffectKind::Paralysis => format!("{name} is paralyzed!"),
    }
}

fn expired_text(name: &str, kind: StatusEffectKind) -> String {
    match kind {
        StatusEffectKind::Confusion => format!("{name} is no longer confused."),
        StatusEffectKind::Slow => format!("{name} speeds back up."),
        StatusEffectKind::Shield => format!("{name}'s shield fades."),
        StatusEffectKind::Rage => format!("{name} calms down."),
        StatusEffectKind::Invisibility => format!("{name} reappears."),
        StatusEffectKind::Poison => format!("{name} is no longer poisoned."),
        StatusEffectKind::Regeneration => format!("{name} stops regenerating."),
        StatusEffectKind::Paralysis => format!("{name} can move again."),
    }
}

/// Applies, ticks, and expires status effects.
#[derive(Clone, Copy, Debug)]
pub struct StatusEffectManager<'a> {
    config: &'a GameConfig,
}

impl<'a> StatusEffectManager<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Adds an effect to `entity`.
    ///
    /// An effect the entity is immune to is a silent no-op. A duplicate kind
    /// refreshes the existing effect.
    pub fn add_effect(
        &self,
        entity: &mut Entity,
        effect: StatusEffect,
        turn: u64,
        log: &mut MessageLog,
    ) -> EffectInsert {
        let blocked_by = effect.kind.blocked_by();
        if !blocked_by.is_empty() && entity.immunities().intersects(blocked_by) {
            return EffectInsert::Ignored;
        }

        let inserted = entity
            .status
            .get_or_insert_with(StatusEffects::empty)
            .insert(effect);
        if inserted == EffectInsert::Added {
            let tone = if effect.kind.is_debuff() {
                MessageTone::Bad
            } else {
                MessageTone::Good
            };
            log.push(turn, tone, applied_text(&entity.name, effect.kind));
        }
        inserted
    }

    /// Turn-start processing.
    ///
    /// Equipment passives run first (ring regeneration on every
    /// `regeneration_period`-th turn, never on turn 0), then per-tick effects
    /// (regeneration heals, poison damages). Returns a death when poison
    /// kills the entity.
    pub fn process_turn_start(
        &self,
        entity: &mut Entity,
        turn_number: u64,
        log: &mut MessageLog,
    ) -> Option<DeathEvent> {
        if !entity.is_alive() {
            return None;
        }
        let Some(stats) = entity.stats.as_mut() else {
            return None;
        };

        let period = self.config.regeneration_period;
        let ring_pulse = period > 0 && turn_number > 0 && turn_number % period == 0;
        let has_ring = entity
            .equipment
            .as_ref()
            .is_some_and(|eq| eq.has_regeneration());
        if ring_pulse && has_ring {
            let healed = heal(stats, self.config.regeneration_amount);
            if healed > 0 {
                log.push(
                    turn_number,
                    MessageTone::Good,
                    format!("{}'s ring glows softly. (+{healed} HP)", entity.name),
                );
            }
        }

        let Some(status) = entity.status.as_ref() else {
            return None;
        };
        let regeneration = status
            .get(StatusEffectKind::Regeneration)
            .map(|effect| effect.magnitude);
        let poison = status
            .get(StatusEffectKind::Poison)
            .map(|effect| effect.magnitude);

        if let Some(amount) = regeneration {
            let healed = heal(stats, amount);
            if healed > 0 {
                log.push(
                    turn_number,
                    MessageTone::Good,
                    format!("{} regenerates. (+{healed} HP)", entity.name),
                );
            }
        }

        if let Some(amount) = poison {
            let report = apply_damage(stats, amount, DamageType::Poison);
            if report.dealt > 0 {
                log.push(
                    turn_number,
                    MessageTone::Bad,
                    format!("{} takes {} poison damage.", entity.name, report.dealt),
                );
            }
            if report.killed {
                return Some(DeathEvent::new(
                    entity.id,
                    DeathCause::Status {
                        kind: StatusEffectKind::Poison,
                    },
                ));
            }
        }

        None
    }

    /// Turn-end processing: every duration drops by one and finished effects
    /// are removed. Returns the kinds that expired.
    pub fn process_turn_end(
        &self,
        entity: &mut Entity,
        turn_number: u64,
        log: &mut MessageLog,
    ) -> Vec<StatusEffectKind> {
        let Some(status) = entity.status.as_mut() else {
            return Vec::new();
        };
        let expired = status.tick();
        for kind in &expired {
            log.push(
                turn_number,
                MessageTone::Neutral,
                expired_text(&entity.name, *kind),
            );
        }
        expired
    }
}
