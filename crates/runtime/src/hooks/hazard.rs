//! ENVIRONMENT phase: ground hazards burn whoever stands on them.

use delve_core::{GroundHazardManager, PhaseListener, TurnPhase};

use crate::handlers::DeathHandler;
use crate::runtime::SessionWorld;

#[derive(Debug, Clone, Copy, Default)]
pub struct HazardPhaseListener;

impl PhaseListener<SessionWorld> for HazardPhaseListener {
    fn name(&self) -> &'static str {
        "hazards"
    }

    /// Ahead of status expiry, so a hazard still hurts on the turn a shield
    /// or rage wears off.
    fn priority(&self) -> i32 {
        -10
    }

    fn on_phase_start(&self, phase: TurnPhase, world: &mut SessionWorld) {
        if phase != TurnPhase::Environment {
            return;
        }
        let (env, state, log) = world.parts();
        let deaths = GroundHazardManager::new().process_turn(state, log);
        if deaths.is_empty() {
            return;
        }
        let dead = DeathHandler::new(env).process(state, log, &deaths);
        tracing::debug!(
            target: "runtime::listeners",
            turn = state.turn_number(),
            killed = dead.len(),
            "hazards resolved"
        );
    }
}
