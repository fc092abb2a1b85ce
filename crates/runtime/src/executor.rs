//! Applies one [`Action`] to the game state.
//!
//! The executor validates the request against the current state and then
//! delegates to the core systems: movement and portals here, attacks to
//! [`CombatResolver`], hazards to [`GroundHazardManager`]. Illegal requests
//! come back as `Blocked`, `RaiseFailed`, or `Invalid` without touching the
//! state. Deaths are reported in the outcome; the death pipeline handles
//! them.

use delve_core::{
    Action, ActionOutcome, CombatResolver, Direction, EntityId, GameEnv, GameState,
    GroundHazardManager, HazardKind, MessageLog, MessageTone, Position, is_behind,
};

use crate::api::{Result, RuntimeError};

#[derive(Clone, Copy, Debug)]
pub struct ActionExecutor<'a> {
    env: GameEnv<'a>,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    /// Executes `action` for `actor`.
    ///
    /// Errors only when the actor is missing or dead, or when a core
    /// invariant breaks underneath (missing combat stats, entity limit).
    pub fn execute(
        &self,
        state: &mut GameState,
        log: &mut MessageLog,
        actor: EntityId,
        action: Action,
    ) -> Result<ActionOutcome> {
        if !state.entities.get(actor).is_some_and(|e| e.is_alive()) {
            return Err(RuntimeError::ActorNotFound(actor));
        }

        let outcome = match action {
            Action::Wait => ActionOutcome::Waited,
            Action::Move { to } => self.step(state, actor, to),
            Action::Attack { target, surprise } => {
                self.attack(state, log, actor, target, surprise)?
            }
            Action::RaiseDead { corpse } => self.raise(state, log, actor, corpse)?,
            Action::CastHazard { kind, center } => self.cast(state, log, actor, kind, center),
        };

        if action.is_special() {
            if let Some(ai) = state.entities.get(actor).and_then(|e| e.ai.as_ref()) {
                self.env
                    .metrics
                    .record_special(ai.archetype, outcome.special_succeeded());
            }
        }
        Ok(outcome)
    }

    fn step(&self, state: &mut GameState, actor: EntityId, to: Position) -> ActionOutcome {
        let Some(entity) = state.entities.get(actor) else {
            return ActionOutcome::Invalid;
        };
        let from = entity.position;
        let allow_portals = entity.ai.as_ref().is_none_or(|ai| ai.portal_usable());

        let Some(direction) = Direction::between(from, to) else {
            return ActionOutcome::Blocked;
        };
        if from.chebyshev(to) != 1
            || !self.env.map.can_enter(to, allow_portals)
            || state.entities.is_occupied(to)
        {
            return ActionOutcome::Blocked;
        }

        let mut landing = to;
        let mut via_portal = false;
        if self.env.map.is_portal(to) {
            if let Some(exit) = self.env.map.portal_exit(to) {
                if !self.env.map.is_blocked(exit) && !state.entities.is_occupied(exit) {
                    landing = exit;
                    via_portal = true;
                }
            }
        }

        let Some(entity) = state.entities.get_mut(actor) else {
            return ActionOutcome::Invalid;
        };
        entity.position = landing;
        entity.facing = Some(direction);
        ActionOutcome::Moved {
            from,
            to: landing,
            via_portal,
        }
    }

    fn attack(
        &self,
        state: &mut GameState,
        log: &mut MessageLog,
        actor: EntityId,
        target: EntityId,
        surprise: bool,
    ) -> Result<ActionOutcome> {
        if actor == target {
            return Ok(ActionOutcome::Invalid);
        }
        let Some(attacker) = state.entities.get(actor) else {
            return Ok(ActionOutcome::Invalid);
        };
        let Some(profile) = attacker.attack_profile() else {
            return Ok(ActionOutcome::Invalid);
        };
        let Some(defender) = state.entities.get(target) else {
            return Ok(ActionOutcome::Invalid);
        };
        if !defender.is_alive() || attacker.position.chebyshev(defender.position) > profile.reach {
            return Ok(ActionOutcome::Invalid);
        }
        // A declared surprise holds only right after a portal hop, from behind.
        let surprise = surprise
            && attacker.ai.as_ref().is_some_and(|ai| ai.used_portal)
            && is_behind(attacker.position, defender.position, defender.facing);

        let outcome = CombatResolver::new(self.env)
            .resolve_attack(state, log, actor, target, &profile, surprise)?;
        Ok(ActionOutcome::Attacked(outcome))
    }

    fn raise(
        &self,
        state: &mut GameState,
        log: &mut MessageLog,
        actor: EntityId,
        corpse_id: EntityId,
    ) -> Result<ActionOutcome> {
        let turn = state.turn_number();
        let raiser = state.entities.require(actor)?;
        let Some(ai) = raiser.ai.as_ref() else {
            return Ok(ActionOutcome::Invalid);
        };
        let Some(body) = state.entities.get(corpse_id) else {
            return Ok(ActionOutcome::Invalid);
        };
        if body.corpse.is_none() || raiser.position.chebyshev(body.position) > ai.abilities.range {
            return Ok(ActionOutcome::Invalid);
        }

        let raiser_name = raiser.name.clone();
        let faction = raiser.faction;
        let spot = body.position;
        let eligible = body
            .raisable_corpse()
            .filter(|_| !state.entities.is_occupied(spot))
            .and_then(|corpse| {
                let template = self.env.archetypes.template(&corpse.original_monster_id)?;
                Some((corpse.original_monster_id.clone(), template))
            });
        let Some((template_id, template)) = eligible else {
            log.push(
                turn,
                MessageTone::Neutral,
                format!("The corpse of {} cannot be raised.", body.name),
            );
            return Ok(ActionOutcome::RaiseFailed { corpse: corpse_id });
        };

        let body_name = body.name.clone();
        let mut thrall = template.instantiate_thrall(&template_id, spot, faction, self.env.config);
        thrall.raised_by = Some(actor);
        let thrall_id = state.entities.spawn(thrall)?;

        let corpse = state
            .entities
            .get_mut(corpse_id)
            .and_then(|e| e.corpse.as_mut())
            .ok_or(RuntimeError::ActorNotFound(corpse_id))?;
        corpse.consume(actor)?;

        self.env.metrics.record_reanimation();
        log.push(
            turn,
            MessageTone::Bad,
            format!("{raiser_name} raises the corpse of {body_name}!"),
        );
        Ok(ActionOutcome::Raised {
            corpse: corpse_id,
            thrall: thrall_id,
        })
    }

    fn cast(
        &self,
        state: &mut GameState,
        log: &mut MessageLog,
        actor: EntityId,
        kind: HazardKind,
        center: Position,
    ) -> ActionOutcome {
        let Some(caster) = state.entities.get(actor) else {
            return ActionOutcome::Invalid;
        };
        let Some(spell) = caster
            .ai
            .as_ref()
            .filter(|ai| caster.position.chebyshev(center) <= ai.abilities.range)
            .and_then(|ai| ai.abilities.hazard)
            .filter(|spell| spell.kind == kind)
        else {
            return ActionOutcome::Invalid;
        };
        let caster_name = caster.name.clone();

        let tiles = GroundHazardManager::new().create_burst(
            &mut state.hazards,
            self.env.map,
            kind,
            center,
            spell.radius,
            spell.base_damage,
            spell.duration,
            Some(actor),
        );
        log.push(
            state.turn_number(),
            MessageTone::Bad,
            format!("{caster_name} conjures {}!", kind.noun()),
        );
        ActionOutcome::HazardCast {
            kind,
            center,
            tiles,
        }
    }
}
