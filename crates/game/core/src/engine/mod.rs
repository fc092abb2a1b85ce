//! Per-turn systems and the phase sequencer.
//!
//! The managers here mutate [`GameState`](crate::state::GameState) directly and
//! report deaths as [`DeathEvent`](crate::combat::DeathEvent) values. Removing
//! the dead, dropping corpses, and tallying metrics is left to the runtime's
//! death pipeline.

mod hazards;
mod status;
mod turns;

pub use hazards::GroundHazardManager;
pub use status::{Restriction, StatusEffectManager, restriction};
pub use turns::{PhaseListener, TurnClock, TurnManager};
