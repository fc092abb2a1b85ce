//! Handler for entity death.

use delve_core::{
    Archetype, CorpseComponent, DeathEvent, EntityId, GameEnv, GameState, MessageLog, MessageTone,
};

/// Original id recorded on the player's corpse.
pub const PLAYER_CORPSE_ID: &str = "player";

/// Turns death signals into dead entities with corpses.
///
/// The core only reports that hit points reached zero. This handler clears
/// the alive flag, which drops the entity from turn scheduling, attaches a
/// corpse, announces the death, and records metrics. Events for entities
/// already marked dead are skipped, so a corpse is attached exactly once.
#[derive(Debug, Clone, Copy)]
pub struct DeathHandler<'a> {
    env: GameEnv<'a>,
}

impl<'a> DeathHandler<'a> {
    pub fn new(env: GameEnv<'a>) -> Self {
        Self { env }
    }

    /// Processes `deaths` in order. Returns the ids that actually died.
    pub fn process(
        &self,
        state: &mut GameState,
        log: &mut MessageLog,
        deaths: &[DeathEvent],
    ) -> Vec<EntityId> {
        let turn = state.turn_number();
        let mut dead = Vec::new();

        for event in deaths {
            let killer = event
                .cause
                .killer()
                .and_then(|id| state.entities.get(id))
                .map(|e| e.name.clone());
            let Some(entity) = state.entities.get_mut(event.entity) else {
                continue;
            };
            if !entity.alive {
                continue;
            }
            entity.alive = false;

            let is_player = entity.id.is_player();
            if entity.corpse.is_none() {
                entity.corpse = Some(self.corpse_for(entity, turn));
            }
            log.push(
                turn,
                MessageTone::Death,
                event.cause.describe(&entity.name, killer.as_deref()),
            );

            self.env.metrics.record_death(is_player);
            if event.cause.is_hazard() {
                self.env.metrics.record_hazard_death();
            }
            tracing::info!(
                target: "runtime::death",
                entity = %event.entity,
                name = %entity.name,
                cause = ?event.cause,
                turn,
                "entity died"
            );
            dead.push(event.entity);
        }
        dead
    }

    /// Thralls and the player leave corpses that can never be raised.
    fn corpse_for(&self, entity: &delve_core::Entity, turn: u64) -> CorpseComponent {
        match entity.ai.as_ref() {
            Some(ai) if ai.archetype != Archetype::Thrall => {
                let max_raises = self
                    .env
                    .archetypes
                    .template(&ai.template_id)
                    .map_or(delve_core::GameConfig::DEFAULT_MAX_RAISES, |t| t.max_raises);
                CorpseComponent::with_max_raises(ai.template_id.clone(), turn, max_raises)
            }
            Some(ai) => CorpseComponent::with_max_raises(ai.template_id.clone(), turn, 0),
            None => CorpseComponent::with_max_raises(PLAYER_CORPSE_ID, turn, 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridMap;
    use crate::workers::SessionMetrics;
    use delve_content::ArchetypeCatalog;
    use delve_core::{
        AbilityParams, AiState, ArchetypeTemplate, AttackProfile, CombatStats, DamageType,
        DeathCause, DiceExpr, Entity, Faction, GameConfig, HazardKind, PcgRng, Position,
    };

    fn catalog() -> ArchetypeCatalog {
        let orc = ArchetypeTemplate::new(
            "orc",
            Archetype::Brute,
            CombatStats::new(8, 0, 0),
            AttackProfile::natural("axe", DiceExpr::new(1, 6, 0), DamageType::Slashing),
        )
        .with_max_raises(2);
        ArchetypeCatalog::new().with("orc", orc)
    }

    fn orc(archetype: Archetype) -> Entity {
        let mut entity = Entity::new("orc", Position::new(2, 2), Faction::Monsters)
            .with_stats(CombatStats::new(8, 0, 0))
            .with_ai(AiState::new(archetype, "orc", AbilityParams::default(), 8));
        if let Some(stats) = entity.stats.as_mut() {
            stats.hp = 0;
        }
        entity
    }

    fn run(state: &mut GameState, deaths: &[DeathEvent]) -> (Vec<EntityId>, MessageLog, SessionMetrics) {
        let config = GameConfig::default();
        let map = GridMap::open(5, 5);
        let catalog = catalog();
        let metrics = SessionMetrics::new();
        let mut log = MessageLog::new();
        let env = GameEnv::new(&config, &map, &catalog, &PcgRng, &metrics);
        let dead = DeathHandler::new(env).process(state, &mut log, deaths);
        (dead, log, metrics)
    }

    #[test]
    fn monster_corpse_uses_template_raise_limit() {
        let mut state = GameState::new(3);
        state.entities.set_player(Entity::new("Hero", Position::ORIGIN, Faction::Player));
        let id = state.entities.spawn(orc(Archetype::Brute)).expect("spawn");
        let event = DeathEvent::new(
            id,
            DeathCause::Attack {
                attacker: EntityId::PLAYER,
            },
        );

        let (dead, log, metrics) = run(&mut state, &[event, event]);
        assert_eq!(dead, vec![id]);
        let corpse = state.entities.get(id).and_then(|e| e.corpse.clone()).expect("corpse");
        assert_eq!(corpse.original_monster_id, "orc");
        assert_eq!(corpse.max_raises, 2);
        assert_eq!(log.len(), 1);
        assert_eq!(log.last().map(|m| m.text.as_str()), Some("orc is slain by Hero."));
        assert_eq!(metrics.snapshot().monster_deaths, 1);
    }

    #[test]
    fn thrall_and_player_corpses_stay_down() {
        let mut state = GameState::new(3);
        let mut hero = Entity::new("Hero", Position::ORIGIN, Faction::Player)
            .with_stats(CombatStats::new(5, 0, 0));
        if let Some(stats) = hero.stats.as_mut() {
            stats.hp = 0;
        }
        state.entities.set_player(hero);
        let thrall = state.entities.spawn(orc(Archetype::Thrall)).expect("spawn");
        let fire = DeathCause::Hazard {
            kind: HazardKind::Fire,
        };

        let (dead, _, metrics) = run(
            &mut state,
            &[
                DeathEvent::new(thrall, fire),
                DeathEvent::new(EntityId::PLAYER, fire),
            ],
        );
        assert_eq!(dead.len(), 2);
        for id in dead {
            let entity = state.entities.get(id).expect("entity");
            assert!(entity.raisable_corpse().is_none());
        }
        let player_corpse = state
            .entities
            .player()
            .and_then(|p| p.corpse.as_ref())
            .map(|c| c.original_monster_id.clone());
        assert_eq!(player_corpse.as_deref(), Some(PLAYER_CORPSE_ID));
        assert!(state.player_dead());

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.hazard_deaths, 2);
        assert_eq!(snapshot.player_deaths, 1);
    }
}
