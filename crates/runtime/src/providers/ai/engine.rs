//! Per-monster decision making.
//!
//! [`AiDecisionEngine::decide`] runs one monster's turn in three steps:
//! tick the ability cooldown on a working copy of its AI state, honor any
//! status restriction, and otherwise tick the archetype's priority tree.
//! [`AiDecisionEngine::settle`] folds the executed outcome back into that
//! working copy.

use behavior_tree::Behavior;
use delve_core::{
    Action, ActionOutcome, AiState, EntityId, GameEnv, GameState, MapOracle, Position,
    Restriction, RollPurpose, RollStream, restriction,
};

use super::{AiContext, BehaviorKind, presets};

/// One monster's decision for this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiDecision {
    pub actor: EntityId,
    pub action: Action,
    /// Behavior that produced the action; `None` when a status forced it.
    pub behavior: Option<BehaviorKind>,
    pub restriction: Restriction,
    /// Working AI state to store back after the action resolves.
    pub ai: AiState,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AiDecisionEngine;

impl AiDecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Decides `actor`'s action. `None` when the actor is missing, dead, or
    /// not AI controlled.
    pub fn decide(&self, state: &GameState, env: GameEnv<'_>, actor: EntityId) -> Option<AiDecision> {
        let entity = state.entities.get(actor).filter(|e| e.is_alive())?;
        let mut ai = entity.ai.clone()?;
        ai.tick_cooldown();

        let restriction = restriction(entity, state.turn_number());
        if let Some(action) = forced_action(state, env, actor, restriction) {
            return Some(AiDecision {
                actor,
                action,
                behavior: None,
                restriction,
                ai,
            });
        }

        let archetype = ai.archetype;
        let mut ctx = AiContext::new(actor, state, env, ai)?;
        let tree = presets::tree(archetype);
        tree.tick(&mut ctx);
        let (decision, ai) = ctx.into_parts();
        let (action, behavior) = match decision {
            Some((action, behavior)) => (action, Some(behavior)),
            None => (Action::Wait, None),
        };

        tracing::debug!(
            target: "runtime::ai",
            %actor,
            %archetype,
            action = action.label(),
            ?behavior,
            "monster decided"
        );
        Some(AiDecision {
            actor,
            action,
            behavior,
            restriction,
            ai,
        })
    }

    /// AI state after `decision` executed with `outcome`.
    ///
    /// A special that went off starts its cooldown; a failed raise does not.
    /// The portal flag records only whether this action was a portal hop.
    pub fn settle(&self, decision: AiDecision, outcome: &ActionOutcome) -> AiState {
        let mut ai = decision.ai;
        if outcome.special_succeeded() {
            ai.start_cooldown();
        }
        if matches!(
            outcome,
            ActionOutcome::Raised { .. } | ActionOutcome::RaiseFailed { .. }
        ) {
            ai.corpse_target = None;
        }
        ai.used_portal = outcome.used_portal();
        ai
    }
}

/// Action imposed by a status restriction, for monsters and the player alike.
///
/// Paralysis and an odd turn under Slow force a wait. Confusion stumbles to a
/// random open neighbor drawn from the actor's confusion roll stream, or
/// waits when boxed in. `None` means the actor chooses freely.
pub fn forced_action(
    state: &GameState,
    env: GameEnv<'_>,
    actor: EntityId,
    restriction: Restriction,
) -> Option<Action> {
    match restriction {
        Restriction::Free => None,
        Restriction::Paralyzed | Restriction::Slowed => Some(Action::Wait),
        Restriction::Confused => {
            let entity = state.entities.get(actor)?;
            let allow_portals = entity.ai.as_ref().is_none_or(|ai| ai.portal_usable());
            let occupied =
                |pos: Position| pos != entity.position && state.entities.is_occupied(pos);
            let options = env
                .map
                .open_neighbors(entity.position, allow_portals, &occupied);
            let mut stream = RollStream::for_action(
                env.rng,
                state.game_seed,
                state.turn_number(),
                actor,
                RollPurpose::Confusion,
            );
            let action = stream
                .pick(options.len())
                .and_then(|idx| options.get(idx))
                .map_or(Action::Wait, |&(_, to)| Action::Move { to });
            Some(action)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridMap;
    use delve_content::ArchetypeCatalog;
    use delve_core::{
        AbilityParams, Archetype, AttackProfile, CombatStats, CorpseComponent, DamageType,
        DiceExpr, Direction, Entity, Faction, GameConfig, HazardKind, HazardSpell, NullMetrics,
        PcgRng, Position, StatusEffect, StatusEffectKind, StatusEffects,
    };

    struct World {
        config: GameConfig,
        map: GridMap,
        catalog: ArchetypeCatalog,
        state: GameState,
    }

    impl World {
        fn new(width: u32, height: u32, player_at: Position) -> Self {
            let mut state = GameState::new(11);
            state.entities.set_player(
                Entity::new("Hero", player_at, Faction::Player)
                    .with_stats(CombatStats::new(30, 0, 0))
                    .with_attack(claws()),
            );
            Self {
                config: GameConfig::default(),
                map: GridMap::open(width, height),
                catalog: ArchetypeCatalog::new(),
                state,
            }
        }

        fn env(&self) -> GameEnv<'_> {
            GameEnv::new(&self.config, &self.map, &self.catalog, &PcgRng, &NullMetrics)
        }

        fn spawn(&mut self, entity: Entity) -> EntityId {
            self.state.entities.spawn(entity).expect("spawn")
        }

        fn decide(&self, actor: EntityId) -> AiDecision {
            AiDecisionEngine::new()
                .decide(&self.state, self.env(), actor)
                .expect("decision")
        }

        fn player_mut(&mut self) -> &mut Entity {
            self.state
                .entities
                .get_mut(EntityId::PLAYER)
                .expect("player")
        }
    }

    fn claws() -> AttackProfile {
        AttackProfile::natural("claws", DiceExpr::new(1, 4, 0), DamageType::Slashing)
    }

    fn monster(archetype: Archetype, at: Position, abilities: AbilityParams) -> Entity {
        Entity::new(archetype.to_string(), at, Faction::Monsters)
            .with_stats(CombatStats::new(10, 0, 0))
            .with_attack(claws())
            .with_ai(AiState::new(archetype, archetype.to_string(), abilities, 8))
    }

    fn necro_params() -> AbilityParams {
        AbilityParams {
            cooldown: 5,
            range: 3,
            danger_radius: 2,
            hazard: None,
        }
    }

    fn pyro_params() -> AbilityParams {
        AbilityParams {
            cooldown: 4,
            range: 5,
            danger_radius: 2,
            hazard: Some(HazardSpell {
                kind: HazardKind::Fire,
                base_damage: 6,
                duration: 3,
                radius: 1,
            }),
        }
    }

    fn corpse(at: Position) -> Entity {
        let mut body = monster(Archetype::Brute, at, AbilityParams::default());
        body.alive = false;
        body.corpse = Some(CorpseComponent::new("orc", 0));
        body
    }

    fn with_status(entity: Entity, kind: StatusEffectKind) -> Entity {
        let mut status = StatusEffects::empty();
        status.insert(StatusEffect::new(kind, 3, 0));
        entity.with_status(status)
    }

    #[test]
    fn necromancer_raises_corpse_in_range() {
        let mut world = World::new(10, 10, Position::new(9, 9));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(0, 0), necro_params()));
        let body = world.spawn(corpse(Position::new(2, 0)));

        let decision = world.decide(necro);
        assert_eq!(decision.action, Action::RaiseDead { corpse: body });
        assert_eq!(decision.behavior, Some(BehaviorKind::RaiseDead));
        assert_eq!(decision.ai.corpse_target, Some(body));
    }

    #[test]
    fn necromancer_walks_to_distant_corpse() {
        let mut world = World::new(10, 10, Position::new(9, 9));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(0, 0), necro_params()));
        world.spawn(corpse(Position::new(6, 0)));

        let decision = world.decide(necro);
        assert_eq!(decision.action, Action::Move { to: Position::new(1, 0) });
        assert_eq!(decision.behavior, Some(BehaviorKind::SeekCorpse));
    }

    #[test]
    fn equidistant_corpses_break_ties_by_row() {
        let mut world = World::new(10, 10, Position::new(9, 9));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(3, 3), necro_params()));
        // The older corpse sits lower on the map.
        let lower = world.spawn(corpse(Position::new(3, 5)));
        let upper = world.spawn(corpse(Position::new(5, 1)));
        assert!(lower < upper);

        let decision = world.decide(necro);
        assert_eq!(decision.action, Action::RaiseDead { corpse: upper });
    }

    #[test]
    fn seeking_breaks_ties_by_row() {
        let mut world = World::new(10, 10, Position::new(0, 0));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(5, 5), necro_params()));
        world.spawn(corpse(Position::new(1, 9)));
        let upper = world.spawn(corpse(Position::new(9, 1)));

        let decision = world.decide(necro);
        assert_eq!(decision.behavior, Some(BehaviorKind::SeekCorpse));
        assert_eq!(decision.ai.corpse_target, Some(upper));
        let Action::Move { to } = decision.action else {
            panic!("expected a step, got {:?}", decision.action);
        };
        assert_eq!(to.chebyshev(Position::new(9, 1)), 3);
    }

    #[test]
    fn necromancer_steps_off_a_corpse_underfoot_then_raises_it() {
        let mut world = World::new(10, 10, Position::new(9, 9));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(4, 4), necro_params()));
        let body = world.spawn(corpse(Position::new(4, 4)));

        let decision = world.decide(necro);
        assert_eq!(decision.behavior, Some(BehaviorKind::SeekCorpse));
        let Action::Move { to } = decision.action else {
            panic!("expected a step, got {:?}", decision.action);
        };
        assert_eq!(to.chebyshev(Position::new(4, 4)), 1);

        if let Some(entity) = world.state.entities.get_mut(necro) {
            entity.position = to;
        }
        let decision = world.decide(necro);
        assert_eq!(decision.action, Action::RaiseDead { corpse: body });
    }

    #[test]
    fn seeking_sidesteps_the_danger_radius() {
        let mut world = World::new(10, 10, Position::new(5, 2));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(2, 2), necro_params()));
        world.spawn(corpse(Position::new(6, 6)));

        // The diagonal (3, 3) is two tiles from the player; (2, 3) is three.
        let decision = world.decide(necro);
        assert_eq!(decision.action, Action::Move { to: Position::new(2, 3) });
        assert_eq!(decision.behavior, Some(BehaviorKind::SeekCorpse));
    }

    #[test]
    fn seeking_waits_when_every_step_is_unsafe() {
        let mut world = World::new(10, 10, Position::new(4, 3));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(2, 2), necro_params()));
        world.spawn(corpse(Position::new(6, 6)));

        let decision = world.decide(necro);
        assert_eq!(decision.action, Action::Wait);
        assert_eq!(decision.behavior, Some(BehaviorKind::SeekCorpse));
    }

    #[test]
    fn necromancer_retreats_without_corpses() {
        let mut world = World::new(10, 10, Position::new(4, 3));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(3, 3), necro_params()));

        let decision = world.decide(necro);
        assert_eq!(decision.action, Action::Move { to: Position::new(2, 2) });
        assert_eq!(decision.behavior, Some(BehaviorKind::Retreat));
    }

    #[test]
    fn cornered_caster_fights_back() {
        let mut world = World::new(2, 1, Position::new(1, 0));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(0, 0), necro_params()));

        let decision = world.decide(necro);
        assert_eq!(decision.action, Action::attack(EntityId::PLAYER));
        assert_eq!(decision.behavior, Some(BehaviorKind::Fallback));
    }

    #[test]
    fn pyromancer_casts_when_ready_and_chases_otherwise() {
        let mut world = World::new(10, 10, Position::new(5, 5));
        let pyro = world.spawn(monster(Archetype::Pyromancer, Position::new(1, 5), pyro_params()));

        let ready = world.decide(pyro);
        assert_eq!(
            ready.action,
            Action::CastHazard {
                kind: HazardKind::Fire,
                center: Position::new(5, 5),
            }
        );

        if let Some(ai) = world.state.entities.get_mut(pyro).and_then(|e| e.ai.as_mut()) {
            ai.ability_cooldown = 2;
        }
        let cooling = world.decide(pyro);
        assert_eq!(cooling.ai.ability_cooldown, 1);
        assert_eq!(cooling.action, Action::Move { to: Position::new(2, 5) });
        assert_eq!(cooling.behavior, Some(BehaviorKind::Fallback));
    }

    #[test]
    fn invisible_player_cannot_be_targeted() {
        let mut world = World::new(10, 10, Position::new(5, 5));
        let hidden = with_status(world.player_mut().clone(), StatusEffectKind::Invisibility);
        world.state.entities.set_player(hidden);
        let pyro = world.spawn(monster(Archetype::Pyromancer, Position::new(1, 5), pyro_params()));
        let brute = world.spawn(monster(Archetype::Brute, Position::new(4, 5), AbilityParams::default()));

        assert_eq!(world.decide(pyro).action, Action::Wait);
        assert_eq!(world.decide(brute).action, Action::Wait);
    }

    #[test]
    fn shade_ambushes_only_after_a_portal_hop() {
        let mut world = World::new(10, 10, Position::new(4, 3));
        world.player_mut().facing = Some(Direction::East);
        let shade = world.spawn(monster(Archetype::Shade, Position::new(3, 3), AbilityParams::default()));

        let plain = world.decide(shade);
        assert_eq!(plain.action, Action::attack(EntityId::PLAYER));

        if let Some(ai) = world.state.entities.get_mut(shade).and_then(|e| e.ai.as_mut()) {
            ai.used_portal = true;
        }
        let ambush = world.decide(shade);
        assert_eq!(
            ambush.action,
            Action::Attack {
                target: EntityId::PLAYER,
                surprise: true,
            }
        );
        assert_eq!(ambush.behavior, Some(BehaviorKind::Ambush));

        // Facing the shade means no back to stab.
        world.player_mut().facing = Some(Direction::West);
        assert_eq!(world.decide(shade).behavior, Some(BehaviorKind::Fallback));
    }

    #[test]
    fn restrictions_override_the_tree() {
        let mut world = World::new(10, 10, Position::new(5, 5));
        let stuck = world.spawn(with_status(
            monster(Archetype::Brute, Position::new(4, 5), AbilityParams::default()),
            StatusEffectKind::Paralysis,
        ));
        let slow = world.spawn(with_status(
            monster(Archetype::Brute, Position::new(6, 5), AbilityParams::default()),
            StatusEffectKind::Slow,
        ));

        let paralyzed = world.decide(stuck);
        assert_eq!(paralyzed.action, Action::Wait);
        assert_eq!(paralyzed.behavior, None);
        assert_eq!(paralyzed.restriction, Restriction::Paralyzed);

        // Slowed entities act on even turns only.
        assert_eq!(world.decide(slow).action, Action::attack(EntityId::PLAYER));
        world.state.turn.turn_number = 1;
        assert_eq!(world.decide(slow).action, Action::Wait);
    }

    #[test]
    fn confusion_stumbles_deterministically() {
        let mut world = World::new(10, 10, Position::new(9, 9));
        let dazed = world.spawn(with_status(
            monster(Archetype::Brute, Position::new(4, 4), AbilityParams::default()),
            StatusEffectKind::Confusion,
        ));

        let first = world.decide(dazed);
        let second = world.decide(dazed);
        assert_eq!(first, second);
        assert_eq!(first.restriction, Restriction::Confused);
        let Action::Move { to } = first.action else {
            panic!("expected a stumble, got {:?}", first.action);
        };
        assert_eq!(to.chebyshev(Position::new(4, 4)), 1);
    }

    #[test]
    fn settle_starts_cooldown_only_on_success() {
        let mut world = World::new(10, 10, Position::new(9, 9));
        let necro = world.spawn(monster(Archetype::Necromancer, Position::new(0, 0), necro_params()));
        let body = world.spawn(corpse(Position::new(1, 0)));
        let engine = AiDecisionEngine::new();

        let decision = world.decide(necro);
        let failed = engine.settle(decision.clone(), &ActionOutcome::RaiseFailed { corpse: body });
        assert!(failed.ability_ready());
        assert_eq!(failed.corpse_target, None);

        let raised = engine.settle(
            decision.clone(),
            &ActionOutcome::Raised {
                corpse: body,
                thrall: EntityId(9),
            },
        );
        assert_eq!(raised.ability_cooldown, 5);

        let hopped = engine.settle(
            decision,
            &ActionOutcome::Moved {
                from: Position::new(0, 0),
                to: Position::new(7, 7),
                via_portal: true,
            },
        );
        assert!(hopped.used_portal);
    }
}
