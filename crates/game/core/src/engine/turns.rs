//! Phase sequencing.
//!
//! [`TurnManager`] is the only component that moves the turn forward. Other
//! systems hook in as [`PhaseListener`]s and read the phase from
//! [`TurnContext`] instead of tracking it themselves.

use std::sync::Arc;

use crate::state::{TurnContext, TurnPhase};

/// World types the turn manager can drive.
pub trait TurnClock {
    fn turn(&self) -> &TurnContext;

    fn turn_mut(&mut self) -> &mut TurnContext;

    /// Terminal condition (player death). Once true, remaining listeners for
    /// the current advance are skipped.
    fn is_game_over(&self) -> bool;
}

/// Reacts to phase boundaries.
///
/// Listeners are sorted by priority: lower values run first, ties keep
/// registration order.
pub trait PhaseListener<W>: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn on_phase_start(&self, _phase: TurnPhase, _world: &mut W) {}

    fn on_phase_end(&self, _phase: TurnPhase, _world: &mut W) {}
}

/// Fixed PLAYER → ENEMY → ENVIRONMENT → PLAYER sequencer.
pub struct TurnManager<W> {
    listeners: Vec<Arc<dyn PhaseListener<W>>>,
}

impl<W> Default for TurnManager<W> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<W> Clone for TurnManager<W> {
    fn clone(&self) -> Self {
        Self {
            listeners: self.listeners.clone(),
        }
    }
}

impl<W: TurnClock> TurnManager<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a listener, keeping the list sorted by priority.
    pub fn register(&mut self, listener: Arc<dyn PhaseListener<W>>) {
        self.listeners.push(listener);
        // Stable sort keeps registration order among equal priorities.
        self.listeners.sort_by_key(|listener| listener.priority());
    }

    pub fn with_listener(mut self, listener: Arc<dyn PhaseListener<W>>) -> Self {
        self.register(listener);
        self
    }

    pub fn listener_names(&self) -> Vec<&'static str> {
        self.listeners.iter().map(|listener| listener.name()).collect()
    }

    /// Ends the current phase, moves to the next one, and starts it.
    ///
    /// Always succeeds. The turn number increments only on the ENVIRONMENT to
    /// PLAYER edge. When the world is over, listeners stop running but the
    /// phase still advances.
    pub fn advance(&self, world: &mut W) -> TurnPhase {
        let ending = world.turn().phase;
        for listener in &self.listeners {
            if world.is_game_over() {
                break;
            }
            listener.on_phase_end(ending, world);
        }

        let next = world.turn_mut().advance();

        for listener in &self.listeners {
            if world.is_game_over() {
                break;
            }
            listener.on_phase_start(next, world);
        }
        next
    }

    /// Advances until the PLAYER phase begins again.
    pub fn advance_to_player(&self, world: &mut W) -> TurnPhase {
        loop {
            if self.advance(world) == TurnPhase::Player {
                return TurnPhase::Player;
            }
        }
    }
}
