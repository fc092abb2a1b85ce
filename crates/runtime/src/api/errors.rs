//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the core state, content layouts, persistence, and the
//! balance harness so callers can bubble them up with consistent context.
//! Illegal game actions are not errors: they resolve to an
//! [`ActionOutcome`](delve_core::ActionOutcome) instead.
use thiserror::Error;

use delve_content::LayoutError;
use delve_core::{CorpseError, EntityId, StateError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Corpse(#[from] CorpseError),

    #[error("invalid map layout")]
    Layout(#[from] LayoutError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),

    #[error("session requires a {0} oracle before building")]
    MissingOracle(&'static str),

    #[error("actor {0} is not a living entity")]
    ActorNotFound(EntityId),

    #[error("the session is over")]
    GameOver,

    #[error("failed to encode or decode a session snapshot")]
    Snapshot(#[from] bincode::Error),

    #[error("failed to parse scenario")]
    Scenario(#[from] ron::error::SpannedError),

    #[error("i/o failure")]
    Io(#[from] std::io::Error),

    #[error("harness session task failed")]
    HarnessJoin(#[source] tokio::task::JoinError),
}
