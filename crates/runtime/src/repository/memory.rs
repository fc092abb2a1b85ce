//! In-memory SnapshotRepository implementation.

use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::api::Result;

use super::{SessionSnapshot, SnapshotRepository};

/// Keeps encoded snapshots in a map. Useful for tests and for short-lived
/// rollback points.
#[derive(Default)]
pub struct InMemorySnapshotRepository {
    snapshots: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemorySnapshotRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotRepository for InMemorySnapshotRepository {
    fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let bytes = snapshot.to_bytes()?;
        if let Ok(mut snapshots) = self.snapshots.write() {
            snapshots.insert(key.to_string(), bytes);
        }
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<SessionSnapshot>> {
        let bytes = match self.snapshots.read() {
            Ok(snapshots) => snapshots.get(key).cloned(),
            Err(_) => None,
        };
        bytes
            .map(|bytes| SessionSnapshot::from_bytes(&bytes))
            .transpose()
    }

    fn exists(&self, key: &str) -> bool {
        self.snapshots
            .read()
            .is_ok_and(|snapshots| snapshots.contains_key(key))
    }

    fn delete(&self, key: &str) -> Result<()> {
        if let Ok(mut snapshots) = self.snapshots.write() {
            snapshots.remove(key);
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self
            .snapshots
            .read()
            .map(|snapshots| snapshots.keys().cloned().collect())
            .unwrap_or_default())
    }
}
