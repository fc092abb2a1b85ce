//! Phase listeners that drive the ENEMY and ENVIRONMENT phases.
//!
//! Each listener implements the core [`PhaseListener`] over a
//! [`SessionWorld`]. The turn manager runs them in priority order (lower
//! first, ties in registration order) and stops as soon as the player dies.
//!
//! | Listener | Phase start | Priority |
//! |---|---|---|
//! | [`HazardPhaseListener`] | ENVIRONMENT | -10 |
//! | [`EnemyPhaseListener`] | ENEMY | 0 |
//! | [`StatusEndListener`] | ENVIRONMENT | 0 |
//! | [`StatusStartListener`] | PLAYER | 0 |

mod enemy;
mod hazard;
mod status;

use std::sync::Arc;

use delve_core::PhaseListener;

use crate::runtime::SessionWorld;

pub use enemy::EnemyPhaseListener;
pub use hazard::HazardPhaseListener;
pub use status::{StatusEndListener, StatusStartListener};

/// The listeners every session registers.
pub fn default_listeners() -> Vec<Arc<dyn PhaseListener<SessionWorld>>> {
    vec![
        Arc::new(EnemyPhaseListener::new()),
        Arc::new(HazardPhaseListener),
        Arc::new(StatusEndListener),
        Arc::new(StatusStartListener),
    ]
}
