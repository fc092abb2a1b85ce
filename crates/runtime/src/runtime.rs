//! Session orchestrator.
//!
//! A [`Session`] owns one game: the state, its message log, the record of
//! every resolved action, and the oracles it runs against. The player's
//! action is applied directly; the ENEMY and ENVIRONMENT phases are driven by
//! the core [`TurnManager`] through the phase listeners in [`crate::hooks`].
//! Control returns to the caller at the start of every PLAYER phase.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use delve_core::{
    Action, ActionOutcome, AiState, ArchetypeOracle, EntityId, GameConfig, GameEnv, GameMessage,
    GameState, MapOracle, MessageLog, PcgRng, PhaseListener, RngOracle, TurnClock, TurnContext,
    TurnManager, TurnPhase, restriction,
};

use crate::api::{PlayerInput, Result, RuntimeError};
use crate::executor::ActionExecutor;
use crate::handlers::DeathHandler;
use crate::hooks;
use crate::providers::{BehaviorKind, forced_action};
use crate::repository::SessionSnapshot;
use crate::scenario::Scenario;
use crate::workers::{MetricsSnapshot, SessionMetrics};

/// One resolved action, in execution order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u64,
    pub phase: TurnPhase,
    pub actor: EntityId,
    pub action: Action,
    /// AI behavior that chose the action. `None` for the player and for
    /// actions forced by a status.
    pub behavior: Option<BehaviorKind>,
    pub outcome: ActionOutcome,
}

/// How a session stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// Nothing hostile to the player is left alive.
    Victory,
    /// The player is dead.
    Defeat,
    Ongoing,
}

/// Result of one [`Session::step`].
#[derive(Clone, Debug)]
pub struct StepReport {
    /// Turn number the step played out.
    pub turn: u64,
    /// What the player's action did, after status restrictions.
    pub player: ActionOutcome,
    /// Messages produced during the step.
    pub messages: Vec<GameMessage>,
    pub outcome: SessionOutcome,
}

/// The world the turn manager and phase listeners operate on.
pub struct SessionWorld {
    state: GameState,
    log: MessageLog,
    records: Vec<TurnRecord>,
    config: GameConfig,
    map: Arc<dyn MapOracle>,
    archetypes: Arc<dyn ArchetypeOracle>,
    rng: Arc<dyn RngOracle>,
    metrics: Arc<SessionMetrics>,
}

impl SessionWorld {
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn env(&self) -> GameEnv<'_> {
        GameEnv::new(
            &self.config,
            self.map.as_ref(),
            self.archetypes.as_ref(),
            self.rng.as_ref(),
            self.metrics.as_ref(),
        )
    }

    /// Oracles plus mutable state and log, borrowed together.
    pub fn parts(&mut self) -> (GameEnv<'_>, &mut GameState, &mut MessageLog) {
        let env = GameEnv::new(
            &self.config,
            self.map.as_ref(),
            self.archetypes.as_ref(),
            self.rng.as_ref(),
            self.metrics.as_ref(),
        );
        (env, &mut self.state, &mut self.log)
    }

    /// Executes one action, runs the death pipeline on whatever it killed,
    /// and appends the record.
    pub fn act(
        &mut self,
        actor: EntityId,
        action: Action,
        behavior: Option<BehaviorKind>,
    ) -> Result<ActionOutcome> {
        let turn = self.state.turn_number();
        let phase = self.state.turn.phase;

        let (env, state, log) = self.parts();
        let outcome = ActionExecutor::new(env).execute(state, log, actor, action)?;
        DeathHandler::new(env).process(state, log, outcome.deaths());

        self.records.push(TurnRecord {
            turn,
            phase,
            actor,
            action,
            behavior,
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    /// Writes back a monster's AI state after its action resolved.
    pub fn store_ai(&mut self, actor: EntityId, ai: AiState) {
        if let Some(entity) = self.state.entities.get_mut(actor) {
            entity.ai = Some(ai);
        }
    }

    pub fn outcome(&self) -> SessionOutcome {
        let Some(player) = self.state.entities.player().filter(|p| p.is_alive()) else {
            return SessionOutcome::Defeat;
        };
        let threatened = self
            .state
            .entities
            .iter()
            .any(|entity| entity.is_alive() && entity.is_hostile_to(player));
        if threatened {
            SessionOutcome::Ongoing
        } else {
            SessionOutcome::Victory
        }
    }
}

impl TurnClock for SessionWorld {
    fn turn(&self) -> &TurnContext {
        &self.state.turn
    }

    fn turn_mut(&mut self) -> &mut TurnContext {
        &mut self.state.turn
    }

    fn is_game_over(&self) -> bool {
        self.state.player_dead()
    }
}

/// One running game.
pub struct Session {
    world: SessionWorld,
    turns: TurnManager<SessionWorld>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn state(&self) -> &GameState {
        &self.world.state
    }

    pub fn log(&self) -> &MessageLog {
        &self.world.log
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.world.records
    }

    pub fn env(&self) -> GameEnv<'_> {
        self.world.env()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.world.metrics.snapshot()
    }

    pub fn turn(&self) -> u64 {
        self.world.state.turn_number()
    }

    pub fn listener_names(&self) -> Vec<&'static str> {
        self.turns.listener_names()
    }

    pub fn outcome(&self) -> SessionOutcome {
        self.world.outcome()
    }

    pub fn is_over(&self) -> bool {
        self.outcome() != SessionOutcome::Ongoing
    }

    /// Plays one full turn: the player's `action`, then ENEMY and
    /// ENVIRONMENT, stopping at the start of the next PLAYER phase.
    ///
    /// A paralysed or slowed player waits and a confused one stumbles,
    /// whatever `action` asked for.
    pub fn step(&mut self, action: Action) -> Result<StepReport> {
        if self.is_over() {
            return Err(RuntimeError::GameOver);
        }
        let turn = self.turn();
        let logged = self.world.log.len();

        let action = self
            .world
            .state
            .entities
            .player()
            .map(|player| restriction(player, turn))
            .and_then(|restricted| {
                forced_action(&self.world.state, self.world.env(), EntityId::PLAYER, restricted)
            })
            .unwrap_or(action);

        let player = self.world.act(EntityId::PLAYER, action, None)?;
        self.turns.advance_to_player(&mut self.world);

        let messages = self.world.log.iter().skip(logged).cloned().collect();
        let outcome = self.outcome();
        tracing::debug!(
            target: "runtime::session",
            turn,
            action = action.label(),
            ?outcome,
            "turn complete"
        );
        Ok(StepReport {
            turn,
            player,
            messages,
            outcome,
        })
    }

    /// Pulls the player's action from `input` and steps.
    pub fn step_with(&mut self, input: &mut dyn PlayerInput) -> Result<StepReport> {
        let action = input.next_action(&self.world.state, self.world.env());
        self.step(action)
    }

    /// Steps until the session ends or `max_turns` turns have been played.
    /// Returns `Ongoing` on timeout.
    pub fn run(&mut self, input: &mut dyn PlayerInput, max_turns: u64) -> Result<SessionOutcome> {
        while !self.is_over() && self.turn() < max_turns {
            self.step_with(input)?;
        }
        let outcome = self.outcome();
        tracing::info!(
            target: "runtime::session",
            seed = self.world.state.game_seed,
            turns = self.turn(),
            ?outcome,
            "session finished"
        );
        Ok(outcome)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(
            self.world.state.clone(),
            self.world.log.clone(),
            self.world.records.clone(),
            self.world.metrics.snapshot(),
        )
    }

    /// Replaces state, log, records, and metric counters with `snapshot`.
    /// Oracles and listeners stay as built.
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        self.world.metrics.restore(&snapshot.metrics);
        self.world.state = snapshot.state;
        self.world.log = snapshot.log;
        self.world.records = snapshot.records;
        tracing::debug!(
            target: "runtime::session",
            turn = self.turn(),
            "restored snapshot"
        );
    }
}

/// Builder for [`Session`].
///
/// Needs archetypes, plus either a starting state and map or a scenario
/// (which supplies both). The rng defaults to [`PcgRng`] and the config to
/// [`GameConfig::default`].
#[derive(Default)]
pub struct SessionBuilder {
    config: Option<GameConfig>,
    seed: u64,
    state: Option<GameState>,
    scenario: Option<Scenario>,
    map: Option<Arc<dyn MapOracle>>,
    archetypes: Option<Arc<dyn ArchetypeOracle>>,
    rng: Option<Arc<dyn RngOracle>>,
    metrics: Option<Arc<SessionMetrics>>,
    listeners: Vec<Arc<dyn PhaseListener<SessionWorld>>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Seed for a state built from a scenario. Ignored with [`Self::state`].
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn scenario(mut self, scenario: Scenario) -> Self {
        self.scenario = Some(scenario);
        self
    }

    pub fn map(mut self, map: Arc<dyn MapOracle>) -> Self {
        self.map = Some(map);
        self
    }

    pub fn archetypes(mut self, archetypes: Arc<dyn ArchetypeOracle>) -> Self {
        self.archetypes = Some(archetypes);
        self
    }

    pub fn rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Share a metrics collector, e.g. across sessions.
    pub fn metrics(mut self, metrics: Arc<SessionMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Registers a listener on top of the defaults.
    pub fn listener(mut self, listener: Arc<dyn PhaseListener<SessionWorld>>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub fn build(self) -> Result<Session> {
        let config = self.config.unwrap_or_default();
        let archetypes = self
            .archetypes
            .ok_or(RuntimeError::MissingOracle("archetype"))?;

        let map = match (self.map, &self.scenario) {
            (Some(map), _) => map,
            (None, Some(scenario)) => Arc::new(scenario.grid_map()?) as Arc<dyn MapOracle>,
            (None, None) => return Err(RuntimeError::MissingOracle("map")),
        };

        let state = match (self.state, &self.scenario) {
            (Some(state), _) => state,
            (None, Some(scenario)) => {
                scenario.create_initial_state(self.seed, archetypes.as_ref(), &config)?
            }
            (None, None) => {
                return Err(RuntimeError::InvalidConfig(
                    "session needs a starting state or a scenario".into(),
                ));
            }
        };
        if state.entities.player().is_none() {
            return Err(RuntimeError::InvalidConfig(
                "starting state has no player".into(),
            ));
        }

        let mut turns = TurnManager::new();
        for listener in hooks::default_listeners() {
            turns.register(listener);
        }
        for listener in self.listeners {
            turns.register(listener);
        }

        tracing::info!(
            target: "runtime::session",
            seed = state.game_seed,
            entities = state.entities.len(),
            listeners = ?turns.listener_names(),
            "session started"
        );

        Ok(Session {
            world: SessionWorld {
                state,
                log: MessageLog::new(),
                records: Vec::new(),
                config,
                map,
                archetypes,
                rng: self.rng.unwrap_or_else(|| Arc::new(PcgRng)),
                metrics: self
                    .metrics
                    .unwrap_or_else(|| Arc::new(SessionMetrics::new())),
            },
            turns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::GridMap;
    use delve_content::ArchetypeCatalog;
    use delve_core::{
        AbilityParams, Archetype, ArchetypeTemplate, AttackProfile, CombatStats, DamageType,
        DiceExpr, Entity, Faction, Position, StatusEffect, StatusEffectKind, StatusEffects,
    };

    fn catalog() -> Arc<ArchetypeCatalog> {
        let rat = ArchetypeTemplate::new(
            "rat",
            Archetype::Brute,
            CombatStats::new(1, 0, 0),
            AttackProfile::natural("bite", DiceExpr::new(1, 1, 0), DamageType::Piercing),
        );
        Arc::new(ArchetypeCatalog::new().with("rat", rat))
    }

    fn hero() -> Entity {
        Entity::new("Hero", Position::new(1, 1), Faction::Player)
            .with_stats(CombatStats::new(20, 0, 0))
            .with_attack(AttackProfile::natural(
                "fists",
                DiceExpr::new(1, 2, 0),
                DamageType::Bludgeoning,
            ))
    }

    fn session(state: GameState) -> Session {
        Session::builder()
            .state(state)
            .map(Arc::new(GridMap::open(8, 8)))
            .archetypes(catalog())
            .build()
            .expect("session builds")
    }

    #[test]
    fn build_requires_oracles_and_player() {
        let missing = Session::builder().state(GameState::new(1)).build();
        assert!(matches!(missing, Err(RuntimeError::MissingOracle("archetype"))));

        let no_player = Session::builder()
            .state(GameState::new(1))
            .map(Arc::new(GridMap::open(4, 4)))
            .archetypes(catalog())
            .build();
        assert!(matches!(no_player, Err(RuntimeError::InvalidConfig(_))));
    }

    #[test]
    fn default_listeners_are_ordered() {
        let mut state = GameState::new(1);
        state.entities.set_player(hero());
        let session = session(state);
        assert_eq!(
            session.listener_names(),
            vec!["hazards", "enemy_ai", "status_end", "status_start"]
        );
    }

    #[test]
    fn step_plays_a_full_turn() {
        let mut state = GameState::new(1);
        state.entities.set_player(hero());
        state.entities.spawn(rat(Position::new(5, 5))).expect("spawn");
        let mut session = session(state);

        let report = session
            .step(Action::Move {
                to: Position::new(2, 2),
            })
            .expect("step");
        assert_eq!(report.turn, 0);
        assert_eq!(session.turn(), 1);
        assert_eq!(session.state().turn.phase, TurnPhase::Player);
        assert_eq!(report.outcome, SessionOutcome::Ongoing);

        let records = session.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].actor, EntityId::PLAYER);
        assert_eq!(records[1].phase, TurnPhase::Enemy);
        assert_eq!(records[1].behavior, Some(BehaviorKind::Fallback));
    }

    fn rat(at: Position) -> Entity {
        Entity::new("rat", at, Faction::Monsters)
            .with_stats(CombatStats::new(1, 0, 0))
            .with_ai(AiState::new(Archetype::Brute, "rat", AbilityParams::default(), 8))
    }

    #[test]
    fn paralysed_player_waits() {
        let mut state = GameState::new(1);
        let mut status = StatusEffects::empty();
        status.insert(StatusEffect::new(StatusEffectKind::Paralysis, 2, 0));
        state.entities.set_player(hero().with_status(status));
        state.entities.spawn(rat(Position::new(6, 6))).expect("spawn");
        let mut session = session(state);

        let report = session
            .step(Action::Move {
                to: Position::new(2, 1),
            })
            .expect("step");
        assert_eq!(report.player, ActionOutcome::Waited);
        assert_eq!(
            session.state().entities.player().map(|p| p.position),
            Some(Position::new(1, 1))
        );
    }

    #[test]
    fn cleared_session_refuses_to_step() {
        let mut state = GameState::new(1);
        state.entities.set_player(hero());
        let mut session = session(state);
        assert_eq!(session.outcome(), SessionOutcome::Victory);
        assert!(matches!(
            session.step(Action::Wait),
            Err(RuntimeError::GameOver)
        ));
    }

    #[test]
    fn restore_rewinds_state_and_records() {
        let mut state = GameState::new(1);
        state.entities.set_player(hero());
        state.entities.spawn(rat(Position::new(6, 6))).expect("spawn");
        let mut session = session(state);
        let saved = session.snapshot();

        session.step(Action::Wait).expect("step");
        session.step(Action::Wait).expect("step");
        assert_eq!(session.turn(), 2);

        session.restore(saved.clone());
        assert_eq!(session.turn(), 0);
        assert!(session.records().is_empty());
        assert_eq!(session.snapshot(), saved);
    }
}
