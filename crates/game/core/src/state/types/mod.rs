pub mod ai;
pub mod common;
pub mod corpse;
pub mod entities;
pub mod hazard;
pub mod status;
pub mod turn;

pub use ai::{AbilityParams, AiState, Archetype, HazardSpell};
pub use common::{Direction, EntityId, Position};
pub use corpse::{CorpseComponent, CorpseError, CorpseStage};
pub use entities::{EntitiesState, Entity, Faction};
pub use hazard::{GroundHazard, HazardKind, HazardRegistry, decay_percent};
pub use status::{EffectInsert, StatusEffect, StatusEffectKind, StatusEffects};
pub use turn::{TurnContext, TurnPhase};
