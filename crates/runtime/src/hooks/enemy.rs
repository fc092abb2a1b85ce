//! ENEMY phase: every living monster decides and acts once.

use delve_core::{PhaseListener, TurnClock, TurnPhase};

use crate::providers::AiDecisionEngine;
use crate::runtime::SessionWorld;

/// Runs the AI for each living monster in ascending id order.
///
/// The roster is taken when the phase starts, so thralls raised this phase
/// act from the next turn on. Monsters killed earlier in the phase are
/// skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyPhaseListener {
    engine: AiDecisionEngine,
}

impl EnemyPhaseListener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhaseListener<SessionWorld> for EnemyPhaseListener {
    fn name(&self) -> &'static str {
        "enemy_ai"
    }

    fn on_phase_start(&self, phase: TurnPhase, world: &mut SessionWorld) {
        if phase != TurnPhase::Enemy {
            return;
        }
        let roster = world.state().entities.living_monster_ids();
        for actor in roster {
            if world.is_game_over() {
                break;
            }
            let Some(decision) = self.engine.decide(world.state(), world.env(), actor) else {
                continue;
            };
            match world.act(actor, decision.action, decision.behavior) {
                Ok(outcome) => {
                    let ai = self.engine.settle(decision, &outcome);
                    world.store_ai(actor, ai);
                }
                Err(error) => {
                    tracing::warn!(
                        target: "runtime::listeners",
                        %actor,
                        %error,
                        "monster action failed"
                    );
                }
            }
        }
    }
}
