//! Entity registry errors.

use crate::error::{ErrorSeverity, GameError};
use crate::state::EntityId;

/// Errors from entity lookups and allocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    #[error("entity {0} does not exist")]
    EntityNotFound(EntityId),

    #[error("entity list is full (max: {max})")]
    EntityLimit { max: usize },

    /// The caller targeted an entity that cannot take part in combat.
    #[error("entity {0} has no combat stats")]
    MissingCombatStats(EntityId),
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StateError::EntityNotFound(_) => ErrorSeverity::Validation,
            StateError::EntityLimit { .. } => ErrorSeverity::Fatal,
            StateError::MissingCombatStats(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            StateError::EntityNotFound(_) => "STATE_ENTITY_NOT_FOUND",
            StateError::EntityLimit { .. } => "STATE_ENTITY_LIMIT",
            StateError::MissingCombatStats(_) => "STATE_MISSING_COMBAT_STATS",
        }
    }
}
