//! Behavior-tree AI for monsters.
//!
//! Each archetype owns a fixed priority list of behaviors (see [`presets`]).
//! On its turn a monster ticks a selector over that list and the first
//! behavior whose precondition holds decides the action. Status restrictions
//! (paralysis, slow, confusion) override the tree entirely.
//!
//! # Core Components
//!
//! - [`AiDecisionEngine`]: decides one monster's action and settles its state
//! - [`BehaviorKind`]: the behaviors with their preconditions and effects
//! - [`AiContext`]: blackboard shared by every node in a tree

pub mod behaviors;
pub mod context;
pub mod engine;
pub mod presets;

pub use behaviors::BehaviorKind;
pub use context::AiContext;
pub use engine::{AiDecision, AiDecisionEngine, forced_action};
