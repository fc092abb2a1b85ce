//! Pipelines that react to what actions and phases produced.

mod death;

pub use death::{DeathHandler, PLAYER_CORPSE_ID};
