use std::path::{Path, PathBuf};

use serde_json::Value;

use super::{RotationStore, StoreError};
use crate::state::RotationState;

/// Rotation state kept as a single pretty-printed JSON file.
///
/// A missing file loads as an empty state. The parent directory is created
/// on first save.
pub struct JsonFileRotationStore {
    path: PathBuf,
}

impl JsonFileRotationStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RotationStore for JsonFileRotationStore {
    fn load(&self) -> Result<RotationState, StoreError> {
        if !self.path.exists() {
            return Ok(RotationState::default());
        }
        let json = std::fs::read_to_string(&self.path)?;
        let value: Value = serde_json::from_str(&json)?;
        Ok(RotationState::from_value(&value))
    }

    fn save(&self, state: &RotationState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileRotationStore::new(dir.path().join("rotation.json"));
        assert_eq!(store.load().unwrap(), RotationState::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileRotationStore::new(dir.path().join("nested").join("rotation.json"));
        let mut state = RotationState::settled(&["a".to_string(), "b".to_string()]);
        state.pending.push_back("b".to_string());
        state.completed.insert("a".to_string());

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), state);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("lastActiveSnapshot"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotation.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileRotationStore::new(path);
        assert!(matches!(store.load(), Err(StoreError::Json(_))));
    }
}
