//! Single-file JSON save store.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::infrastructure::ports::{RepoError, SaveStore, SavePayload};

/// Stores one run as pretty-printed JSON at `path`.
///
/// Writes go to a sibling temp file that is renamed over the target, so a
/// crash mid-write never leaves a truncated save behind.
#[derive(Debug, Clone)]
pub struct JsonFileSaveStore {
    path: PathBuf,
}

impl JsonFileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SaveStore for JsonFileSaveStore {
    fn save(&self, payload: &SavePayload) -> Result<(), RepoError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| RepoError::io("create_save_dir", e))?;
            }
        }

        let json = serde_json::to_string_pretty(payload).map_err(RepoError::serialization)?;
        let temp = self.temp_path();
        fs::write(&temp, json).map_err(|e| RepoError::io("write_save", e))?;
        fs::rename(&temp, &self.path).map_err(|e| RepoError::io("commit_save", e))?;

        tracing::debug!(path = ?self.path, day = payload.day, "Save file written");
        Ok(())
    }

    fn load(&self) -> Result<Option<SavePayload>, RepoError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RepoError::io("read_save", e)),
        };
        let payload = serde_json::from_str(&data).map_err(RepoError::serialization)?;
        Ok(Some(payload))
    }

    fn clear(&self) -> Result<(), RepoError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepoError::io("clear_save", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::memory::tests::sample_payload;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSaveStore::new(dir.path().join("saves").join("run.json"));
        assert!(store.load().unwrap().is_none());

        let payload = sample_payload();
        store.save(&payload).unwrap();
        assert_eq!(store.load().unwrap(), Some(payload));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileSaveStore::new(dir.path().join("run.json"));
        store.save(&sample_payload()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileSaveStore::new(path);
        assert!(matches!(store.load(), Err(RepoError::Serialization(_))));
    }
}
