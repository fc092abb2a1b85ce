//! Action sources: behavior-tree AI for monsters, inputs for the player.

pub mod ai;
pub mod player;

pub use ai::{AiContext, AiDecision, AiDecisionEngine, BehaviorKind, forced_action};
pub use player::{AutoPlayer, ScriptedInput};
