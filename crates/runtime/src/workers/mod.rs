//! Shared collectors that outlive a single turn.

mod metrics;

pub use metrics::{AttackStats, MetricsSnapshot, SessionMetrics};
