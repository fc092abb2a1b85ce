//! Authoritative game state representation.
//!
//! This module owns the data structures that describe entities, hazards, and
//! turn bookkeeping. Everything here is plain data so the persistence layer
//! can serialize it as an opaque blob.
mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    AbilityParams, AiState, Archetype, CorpseComponent, CorpseError, CorpseStage, Direction,
    EffectInsert, EntitiesState, Entity, EntityId, Faction, GroundHazard, HazardKind,
    HazardRegistry, HazardSpell, Position, StatusEffect, StatusEffectKind, StatusEffects,
    TurnContext, TurnPhase, decay_percent,
};

use crate::engine::TurnClock;

/// Canonical snapshot of the deterministic game state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// RNG seed for deterministic random generation.
    ///
    /// Set once at session start and never modified. Combined with the turn
    /// number and actor id to derive every roll.
    pub game_seed: u64,
    pub turn: TurnContext,
    pub entities: EntitiesState,
    pub hazards: HazardRegistry,
}

impl GameState {
    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            turn: TurnContext::new(),
            entities: EntitiesState::new(),
            hazards: HazardRegistry::new(),
        }
    }

    pub fn turn_number(&self) -> u64 {
        self.turn.turn_number
    }

    /// The session ends when the player is dead or missing.
    pub fn player_dead(&self) -> bool {
        self.entities.player().is_none_or(|player| !player.is_alive())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TurnClock for GameState {
    fn turn(&self) -> &TurnContext {
        &self.turn
    }

    fn turn_mut(&mut self) -> &mut TurnContext {
        &mut self.turn
    }

    fn is_game_over(&self) -> bool {
        self.player_dead()
    }
}
