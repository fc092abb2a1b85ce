//! Abstraction for sourcing the player's intent.
//!
//! Sessions pull one action per PLAYER phase from a [`PlayerInput`], so the
//! same turn loop runs with a UI, scripted fixtures, or the harness's
//! [`AutoPlayer`](crate::providers::AutoPlayer).
use delve_core::{Action, GameEnv, GameState};

/// Source of player actions.
///
/// Different implementations can handle:
/// - Interactive input
/// - Scripted/replayed actions
/// - Automated play for balance runs
pub trait PlayerInput: Send {
    /// Action for the player this turn. Status restrictions are applied by
    /// the session afterwards, so implementations need not check them.
    fn next_action(&mut self, state: &GameState, env: GameEnv<'_>) -> Action;
}

/// Always waits. Useful for testing or as a fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaitInput;

impl PlayerInput for WaitInput {
    fn next_action(&mut self, _state: &GameState, _env: GameEnv<'_>) -> Action {
        Action::Wait
    }
}
