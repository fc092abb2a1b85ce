//! One attack, start to finish.

use crate::config::GameConfig;
use crate::env::{AttackerKind, GameEnv, MessageLog, MessageTone, RollPurpose, RollStream};
use crate::engine::StatusEffectManager;
use crate::state::{EffectInsert, EntityId, GameState, StateError, StatusEffect, StatusEffectKind};
use crate::stats::DamageType;

use super::damage::apply_damage;
use super::death::{DeathCause, DeathEvent};
use super::hit::{HitRoll, armor_class};
use super::result::{AttackOutcome, AttackProfile, roll_attack};

/// Orchestrates a single attack: roll, crit or fumble, metrics, resistance,
/// ring procs, and death signaling.
///
/// Range, line of sight, and dead targets are the caller's responsibility;
/// the resolver assumes a legal attack.
#[derive(Clone, Copy, Debug)]
pub struct CombatResolver<'a> {
    env: GameEnv<'a>,
}

impl<'a> CombatResolver<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    pub fn resolve_attack(
        &self,
        state: &mut GameState,
        log: &mut MessageLog,
        attacker_id: EntityId,
        defender_id: EntityId,
        profile: &AttackProfile,
        surprise: bool,
    ) -> Result<AttackOutcome, StateError> {
        let turn = state.turn.turn_number;

        let attacker = state.entities.require(attacker_id)?;
        let attacker_stats = attacker
            .stats
            .clone()
            .ok_or(StateError::MissingCombatStats(attacker_id))?;
        let attacker_status = attacker.status.clone();
        let attacker_kind = if attacker.is_monster() {
            AttackerKind::Monster
        } else {
            AttackerKind::Player
        };
        let attacker_name = attacker.name.clone();
        let venom = attacker
            .equipment
            .as_ref()
            .map_or(0, |equipment| equipment.venom());
        let invisible = attacker.has_status(StatusEffectKind::Invisibility);

        let defender = state.entities.require(defender_id)?;
        let defender_stats = defender
            .stats
            .as_ref()
            .ok_or(StateError::MissingCombatStats(defender_id))?;
        let armor = armor_class(
            defender_stats,
            defender.equipment.as_ref(),
            defender.status.as_ref(),
        );
        let defender_name = defender.name.clone();
        let thorns = defender
            .equipment
            .as_ref()
            .map_or(0, |equipment| equipment.thorns());

        // Striking from invisibility is a surprise and ends the invisibility.
        let surprise = surprise || invisible;
        if invisible {
            if let Some(status) = state
                .entities
                .get_mut(attacker_id)
                .and_then(|entity| entity.status.as_mut())
            {
                status.remove(StatusEffectKind::Invisibility);
            }
            log.push(
                turn,
                MessageTone::Neutral,
                format!("{attacker_name} appears out of nowhere!"),
            );
        }

        let mut stream = RollStream::for_action(
            self.env.rng,
            state.game_seed,
            turn,
            attacker_id,
            RollPurpose::Attack,
        );
        let rolled = roll_attack(
            &attacker_stats,
            attacker_status.as_ref(),
            profile,
            armor,
            surprise,
            &mut stream,
        );
        let landed = rolled.roll.result.landed();

        // Metrics see the raw roll, before any mitigation.
        self.env
            .metrics
            .record_attack(attacker_kind, landed, rolled.raw_damage);

        let mut outcome = AttackOutcome {
            attacker: attacker_id,
            defender: defender_id,
            roll: rolled.roll,
            surprise,
            raw_damage: rolled.raw_damage,
            damage: 0,
            venom_applied: false,
            reflected: 0,
            deaths: Vec::new(),
        };

        if !landed {
            let text = match rolled.roll.result {
                HitRoll::Fumble => {
                    format!("{attacker_name} fumbles the attack on {defender_name}.")
                }
                _ => format!("{attacker_name} misses {defender_name}."),
            };
            log.push(turn, MessageTone::Neutral, text);
            return Ok(outcome);
        }

        let defender = state.entities.require_mut(defender_id)?;
        let Some(stats) = defender.stats.as_mut() else {
            return Err(StateError::MissingCombatStats(defender_id));
        };
        let report = apply_damage(stats, rolled.raw_damage, profile.damage_type);
        outcome.damage = report.dealt;

        let verb = if rolled.roll.result.is_critical() {
            if surprise { "ambushes" } else { "critically hits" }
        } else {
            "hits"
        };
        let tone = if defender_id.is_player() {
            MessageTone::Bad
        } else {
            MessageTone::Good
        };
        log.push(
            turn,
            tone,
            format!(
                "{attacker_name} {verb} {defender_name} with {} for {} damage.",
                profile.name, report.dealt
            ),
        );

        if report.killed {
            outcome.deaths.push(DeathEvent::new(
                defender_id,
                DeathCause::Attack {
                    attacker: attacker_id,
                },
            ));
        } else if venom > 0 {
            let manager = StatusEffectManager::new(self.env.config);
            let poison = StatusEffect::new(
                StatusEffectKind::Poison,
                GameConfig::VENOM_DURATION,
                venom,
            );
            outcome.venom_applied =
                manager.add_effect(defender, poison, turn, log) != EffectInsert::Ignored;
        }

        if thorns > 0 && report.dealt > 0 && profile.is_melee() {
            outcome.reflected = self.reflect(
                state,
                log,
                attacker_id,
                defender_id,
                thorns,
                turn,
                &mut outcome.deaths,
            )?;
        }

        Ok(outcome)
    }

    #[allow(clippy::too_many_arguments)]
    fn reflect(
        &self,
        state: &mut GameState,
        log: &mut MessageLog,
        attacker_id: EntityId,
        defender_id: EntityId,
        amount: i32,
        turn: u64,
        deaths: &mut Vec<DeathEvent>,
    ) -> Result<i32, StateError> {
        let attacker = state.entities.require_mut(attacker_id)?;
        let Some(stats) = attacker.stats.as_mut() else {
            return Ok(0);
        };
        if stats.is_dead() {
            return Ok(0);
        }
        let report = apply_damage(stats, amount, DamageType::None);
        log.push(
            turn,
            MessageTone::Neutral,
            format!("Thorns lash {} for {} damage.", attacker.name, report.dealt),
        );
        if report.killed {
            deaths.push(DeathEvent::new(
                attacker_id,
                DeathCause::Reflect {
                    source: defender_id,
                },
            ));
        }
        Ok(report.dealt)
    }
}
