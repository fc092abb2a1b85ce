//! Traits describing the collaborators the core consumes.
//!
//! Oracles expose static map geometry, archetype stat blocks, seeded
//! randomness, and metric sinks. The [`GameEnv`] aggregate bundles them so the
//! resolver and managers can reach everything they need without hard coupling
//! to concrete implementations.
mod archetypes;
mod map;
mod messages;
mod metrics;
mod rng;

pub use archetypes::{ArchetypeOracle, ArchetypeTemplate};
pub use map::{MapDimensions, MapOracle};
pub use messages::{GameMessage, MessageLog, MessageTone};
pub use metrics::{AttackerKind, MetricsSink, NullMetrics};
pub use rng::{PcgRng, RngOracle, RollPurpose, RollStream, compute_seed};

use crate::config::GameConfig;

/// Read-only collaborators for one session, passed by reference.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    pub config: &'a GameConfig,
    pub map: &'a dyn MapOracle,
    pub archetypes: &'a dyn ArchetypeOracle,
    pub rng: &'a dyn RngOracle,
    pub metrics: &'a dyn MetricsSink,
}

impl<'a> GameEnv<'a> {
    pub fn new(
        config: &'a GameConfig,
        map: &'a dyn MapOracle,
        archetypes: &'a dyn ArchetypeOracle,
        rng: &'a dyn RngOracle,
        metrics: &'a dyn MetricsSink,
    ) -> Self {
        Self {
            config,
            map,
            archetypes,
            rng,
            metrics,
        }
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .field("map", &self.map.dimensions())
            .finish_non_exhaustive()
    }
}
