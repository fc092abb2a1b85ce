//! Session orchestration for the deterministic dungeon rules.
//!
//! This crate wires the core's combat, status, hazard, and turn systems into
//! playable sessions. Consumers build a [`Session`], feed it one player
//! action per turn, and read back resolved actions and messages.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the session, its world, and the builder
//! - [`api`] exposes the error type and the player input abstraction
//! - [`providers`] holds the monster AI and automated players
//! - [`executor`] applies actions; [`handlers`] turns deaths into corpses
//! - [`hooks`] provides the phase listeners that run ENEMY and ENVIRONMENT
//! - [`oracle`], [`scenario`], and [`repository`] adapt data in and out
//! - [`harness`] runs many seeded sessions in parallel for balance numbers
pub mod api;
pub mod executor;
pub mod handlers;
pub mod harness;
pub mod hooks;
pub mod oracle;
pub mod providers;
pub mod repository;
pub mod runtime;
pub mod scenario;

mod workers;

pub use api::{PlayerInput, Result, RuntimeError, WaitInput};
pub use executor::ActionExecutor;
pub use handlers::{DeathHandler, PLAYER_CORPSE_ID};
pub use harness::{BalanceHarness, HarnessReport, RunSummary};
pub use hooks::{EnemyPhaseListener, HazardPhaseListener, StatusEndListener, StatusStartListener};
pub use oracle::GridMap;
pub use providers::{
    AiDecision, AiDecisionEngine, AutoPlayer, BehaviorKind, ScriptedInput, forced_action,
};
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepository, SessionSnapshot, SnapshotRepository,
};
pub use runtime::{
    Session, SessionBuilder, SessionOutcome, SessionWorld, StepReport, TurnRecord,
};
pub use scenario::{MonsterPlacement, PlayerSpec, Scenario};
pub use workers::{AttackStats, MetricsSnapshot, SessionMetrics};
