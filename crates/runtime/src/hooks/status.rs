//! Status effect ticks on both sides of the turn boundary.

use delve_core::{PhaseListener, StatusEffectManager, TurnPhase};

use crate::handlers::DeathHandler;
use crate::runtime::SessionWorld;

/// Counts every status duration down at ENVIRONMENT start, after hazards.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusEndListener;

impl PhaseListener<SessionWorld> for StatusEndListener {
    fn name(&self) -> &'static str {
        "status_end"
    }

    fn on_phase_start(&self, phase: TurnPhase, world: &mut SessionWorld) {
        if phase != TurnPhase::Environment {
            return;
        }
        let (env, state, log) = world.parts();
        let manager = StatusEffectManager::new(env.config);
        let turn = state.turn_number();
        for id in state.entities.living_ids() {
            if let Some(entity) = state.entities.get_mut(id) {
                manager.process_turn_end(entity, turn, log);
            }
        }
    }
}

/// Regeneration, poison, and ring passives at PLAYER start. The turn counter
/// has already moved on, so periodic effects see the new turn number.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusStartListener;

impl PhaseListener<SessionWorld> for StatusStartListener {
    fn name(&self) -> &'static str {
        "status_start"
    }

    fn on_phase_start(&self, phase: TurnPhase, world: &mut SessionWorld) {
        if phase != TurnPhase::Player {
            return;
        }
        let (env, state, log) = world.parts();
        let manager = StatusEffectManager::new(env.config);
        let turn = state.turn_number();
        let deaths: Vec<_> = state
            .entities
            .living_ids()
            .into_iter()
            .filter_map(|id| {
                let entity = state.entities.get_mut(id)?;
                manager.process_turn_start(entity, turn, log)
            })
            .collect();
        DeathHandler::new(env).process(state, log, &deaths);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use delve_content::ArchetypeCatalog;
    use delve_core::{
        Action, CombatStats, Entity, Faction, GameState, Position, StatusEffect, StatusEffectKind,
        StatusEffects,
    };

    use crate::oracle::GridMap;
    use crate::runtime::{Session, SessionOutcome};

    fn poisoned_hero(hp: i32, dose: i32, turns: u32) -> Entity {
        let mut status = StatusEffects::empty();
        status.insert(StatusEffect::new(StatusEffectKind::Poison, turns, dose));
        Entity::new("Hero", Position::new(1, 1), Faction::Player)
            .with_stats(CombatStats::new(hp, 0, 0))
            .with_status(status)
    }

    fn session(hero: Entity) -> Session {
        let mut state = GameState::new(5);
        state.entities.set_player(hero);
        // Keeps the session from counting as won.
        state
            .entities
            .spawn(
                Entity::new("statue", Position::new(6, 6), Faction::Monsters)
                    .with_stats(CombatStats::new(50, 0, 0)),
            )
            .expect("spawn");
        Session::builder()
            .state(state)
            .map(Arc::new(GridMap::open(8, 8)))
            .archetypes(Arc::new(ArchetypeCatalog::new()))
            .build()
            .expect("session")
    }

    #[test]
    fn poison_ticks_at_turn_start_and_expires() {
        let mut session = session(poisoned_hero(10, 2, 2));

        session.step(Action::Wait).expect("turn 0");
        // Duration 2 -> 1 at ENVIRONMENT, then the turn 1 tick.
        assert_eq!(
            session
                .state()
                .entities
                .player()
                .and_then(|p| p.stats.as_ref())
                .map(|s| s.hp),
            Some(8)
        );

        session.step(Action::Wait).expect("turn 1");
        let hero = session.state().entities.player().expect("player");
        assert!(!hero.has_status(StatusEffectKind::Poison));
        assert_eq!(hero.stats.as_ref().map(|s| s.hp), Some(8));
    }

    #[test]
    fn lethal_poison_ends_the_session() {
        let mut session = session(poisoned_hero(2, 5, 3));
        let report = session.step(Action::Wait).expect("step");
        assert_eq!(report.outcome, SessionOutcome::Defeat);
        assert!(session.state().player_dead());
        assert!(
            report
                .messages
                .iter()
                .any(|m| m.tone == delve_core::MessageTone::Death)
        );
    }
}
