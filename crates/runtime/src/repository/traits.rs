//! Repository contracts for saving and loading session snapshots.

use crate::api::Result;

use super::SessionSnapshot;

/// Repository for session persistence, keyed by a caller-chosen name.
pub trait SnapshotRepository: Send + Sync {
    /// Save a snapshot, replacing any previous one under `key`.
    fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<()>;

    /// Load a snapshot by key.
    fn load(&self, key: &str) -> Result<Option<SessionSnapshot>>;

    /// Check if a snapshot exists
    fn exists(&self, key: &str) -> bool;

    /// Delete a snapshot
    fn delete(&self, key: &str) -> Result<()>;

    /// List all stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}
