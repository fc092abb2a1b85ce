//! Deterministic combat, status, hazard, and turn rules for a turn-based
//! dungeon crawler.
//!
//! `delve-core` owns the data model ([`state`]) and the systems that mutate
//! it: [`combat::CombatResolver`], [`engine::StatusEffectManager`],
//! [`engine::GroundHazardManager`], and the phase sequencer
//! [`engine::TurnManager`]. Map geometry, archetype stat blocks, randomness,
//! and metrics arrive through the oracle traits in [`env`]. Nothing here
//! performs I/O or logs; human-readable text goes to [`env::MessageLog`].
pub mod action;
pub mod combat;
pub mod config;
pub mod dice;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{Action, ActionOutcome};
pub use combat::{
    AttackOutcome, AttackProfile, CombatResolver, DamageReport, DeathCause, DeathEvent, HitRoll,
    is_behind,
};
pub use config::GameConfig;
pub use dice::{DiceError, DiceExpr};
pub use engine::{
    GroundHazardManager, PhaseListener, Restriction, StatusEffectManager, TurnClock, TurnManager,
    restriction,
};
pub use env::{
    ArchetypeOracle, ArchetypeTemplate, AttackerKind, GameEnv, GameMessage, MapDimensions,
    MapOracle, MessageLog, MessageTone, MetricsSink, NullMetrics, PcgRng, RngOracle, RollPurpose,
    RollStream,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AbilityParams, AiState, Archetype, CorpseComponent, CorpseError, CorpseStage, Direction,
    EffectInsert, EntitiesState, Entity, EntityId, Faction, GameState, GroundHazard, HazardKind,
    HazardRegistry, HazardSpell, Position, StateError, StatusEffect, StatusEffectKind,
    StatusEffects, TurnContext, TurnPhase,
};
pub use stats::{
    AbilityModifiers, Armor, ArmorKind, CombatStats, DamageType, Equipment, Immunities,
    Resistances, RingKind, Weapon,
};
