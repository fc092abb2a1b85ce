//! Point-in-time copy of a whole session.

use serde::{Deserialize, Serialize};

use delve_core::{GameState, MessageLog};

use crate::api::{Result, RuntimeError};
use crate::runtime::TurnRecord;
use crate::workers::MetricsSnapshot;

/// Everything needed to resume a session: state, message log, action
/// records, and metric counters. Oracles and config are supplied again by
/// the session that restores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub version: u32,
    pub state: GameState,
    pub log: MessageLog,
    pub records: Vec<TurnRecord>,
    pub metrics: MetricsSnapshot,
}

impl SessionSnapshot {
    /// Bumped whenever the encoded layout changes.
    pub const VERSION: u32 = 1;

    pub fn new(
        state: GameState,
        log: MessageLog,
        records: Vec<TurnRecord>,
        metrics: MetricsSnapshot,
    ) -> Self {
        Self {
            version: Self::VERSION,
            state,
            log,
            records,
            metrics,
        }
    }

    /// Encodes with bincode. Hazards are keyed by position, which rules out
    /// string-keyed formats.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let snapshot: Self = bincode::deserialize(bytes)?;
        if snapshot.version != Self::VERSION {
            return Err(RuntimeError::InvalidConfig(format!(
                "snapshot version {} is not supported (expected {})",
                snapshot.version,
                Self::VERSION
            )));
        }
        Ok(snapshot)
    }
}
