//! File-based SnapshotRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use crate::api::Result;

use super::{SessionSnapshot, SnapshotRepository};

/// Stores each snapshot as `{key}.bin` in bincode format.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash never leaves a half-written snapshot behind.
pub struct FileSnapshotRepository {
    base_dir: PathBuf,
}

impl FileSnapshotRepository {
    /// Create the repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn snapshot_path(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.bin"))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, key: &str, snapshot: &SessionSnapshot) -> Result<()> {
        let path = self.snapshot_path(key);
        let temp_path = path.with_extension("bin.tmp");

        fs::write(&temp_path, snapshot.to_bytes()?)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!(
            target: "runtime::session",
            key,
            path = %path.display(),
            "saved snapshot"
        );
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<SessionSnapshot>> {
        let path = self.snapshot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path)?;
        let snapshot = SessionSnapshot::from_bytes(&bytes)?;
        tracing::debug!(target: "runtime::session", key, "loaded snapshot");
        Ok(Some(snapshot))
    }

    fn exists(&self, key: &str) -> bool {
        self.snapshot_path(key).exists()
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.snapshot_path(key);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("bin") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
