//! AI context for behavior-tree decision making.
//!
//! The [`AiContext`] is the blackboard one monster's tree reads from and
//! writes its decision into. It provides read access to the game state and
//! oracles, a working copy of the monster's [`AiState`], and the spatial
//! queries behaviors share: visible hostiles, raisable corpses, and steps
//! that respect occupancy and portal permissions.

use delve_core::{
    Action, AiState, Entity, EntityId, GameEnv, GameState, MapOracle, Position,
    StatusEffectKind,
};

use super::BehaviorKind;

/// Deterministic ordering for "nearest" picks: distance, then row, then
/// column, then id.
pub fn proximity_key(from: Position, entity: &Entity) -> (u32, (i32, i32), EntityId) {
    (
        from.chebyshev(entity.position),
        entity.position.row_major(),
        entity.id,
    )
}

pub struct AiContext<'a> {
    /// The entity making the decision.
    pub actor: EntityId,
    pub state: &'a GameState,
    pub env: GameEnv<'a>,
    /// Working copy of the actor's AI state. Cooldowns are already ticked
    /// for this decision; behaviors may record a corpse target.
    pub ai: AiState,
    position: Position,
    decision: Option<(Action, BehaviorKind)>,
}

impl<'a> AiContext<'a> {
    /// Returns `None` when `actor` is missing, dead, or has no AI.
    pub fn new(actor: EntityId, state: &'a GameState, env: GameEnv<'a>, ai: AiState) -> Option<Self> {
        let entity = state.entities.get(actor).filter(|e| e.is_alive())?;
        Some(Self {
            actor,
            state,
            env,
            ai,
            position: entity.position,
            decision: None,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn me(&self) -> Option<&'a Entity> {
        self.state.entities.get(self.actor)
    }

    /// Records the decision. The first behavior to decide wins; later calls
    /// are ignored.
    pub fn decide(&mut self, action: Action, behavior: BehaviorKind) {
        if self.decision.is_none() {
            self.decision = Some((action, behavior));
        }
    }

    pub fn decision(&self) -> Option<(Action, BehaviorKind)> {
        self.decision
    }

    pub fn into_parts(self) -> (Option<(Action, BehaviorKind)>, AiState) {
        (self.decision, self.ai)
    }

    /// Tiles held by living entities other than the actor.
    pub fn is_occupied(&self, position: Position) -> bool {
        position != self.position && self.state.entities.is_occupied(position)
    }

    /// Whether the actor can see `target`: hostile, alive, within sight range,
    /// and not invisible.
    pub fn can_see(&self, target: &Entity) -> bool {
        let Some(me) = self.me() else {
            return false;
        };
        target.is_alive()
            && me.is_hostile_to(target)
            && self.position.chebyshev(target.position) <= self.ai.sight_range
            && !target.has_status(StatusEffectKind::Invisibility)
    }

    /// Visible hostiles, nearest first.
    pub fn visible_hostiles(&self) -> Vec<&'a Entity> {
        let mut hostiles: Vec<&'a Entity> = self
            .state
            .entities
            .iter()
            .filter(|target| target.id != self.actor && self.can_see(target))
            .collect();
        hostiles.sort_by_key(|target| proximity_key(self.position, target));
        hostiles
    }

    /// The player, when alive and hostile to the actor.
    ///
    /// Danger checks use this regardless of sight: a caster knows where the
    /// player is even when it cannot target them.
    pub fn hostile_player(&self) -> Option<&'a Entity> {
        let me = self.me()?;
        self.state
            .entities
            .player()
            .filter(|player| player.is_alive() && me.is_hostile_to(player))
    }

    /// Whether standing on `position` puts the actor within its danger radius
    /// of the player. Always false with a zero radius.
    pub fn in_danger_at(&self, position: Position) -> bool {
        let radius = self.ai.abilities.danger_radius;
        radius > 0
            && self
                .hostile_player()
                .is_some_and(|player| position.chebyshev(player.position) <= radius)
    }

    /// Raisable corpses not covered by another living entity, nearest first.
    ///
    /// A corpse under the actor itself is listed; it has to step off before
    /// raising it.
    pub fn raisable_corpses(&self) -> Vec<&'a Entity> {
        let mut corpses: Vec<&'a Entity> = self
            .state
            .entities
            .raisable_corpses()
            .filter(|body| !self.is_occupied(body.position))
            .collect();
        corpses.sort_by_key(|body| proximity_key(self.position, body));
        corpses
    }

    /// Whether the actor may step onto `to` right now.
    pub fn can_step(&self, to: Position) -> bool {
        self.position.chebyshev(to) == 1
            && self.env.map.can_enter(to, self.ai.portal_usable())
            && !self.is_occupied(to)
    }

    /// Next step toward `goal` from the map oracle, re-validated against the
    /// actor's permissions.
    pub fn step_toward(&self, goal: Position) -> Option<Position> {
        let occupied = |pos: Position| self.is_occupied(pos);
        let step = self.env.map.next_step_toward(
            self.position,
            goal,
            self.ai.portal_usable(),
            &occupied,
        )?;
        let legal = self.position.chebyshev(step) == 1
            && self.env.map.can_enter(step, self.ai.portal_usable())
            && (step == goal || !self.is_occupied(step));
        legal.then_some(step)
    }

    /// Enterable, unoccupied neighbors in direction order.
    pub fn open_neighbors(&self) -> Vec<Position> {
        let occupied = |pos: Position| self.is_occupied(pos);
        self.env
            .map
            .open_neighbors(self.position, self.ai.portal_usable(), &occupied)
            .into_iter()
            .map(|(_, pos)| pos)
            .collect()
    }
}
