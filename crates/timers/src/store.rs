//! Persistence for timer settings.
//!
//! The persisted shape is one flat row: `{slot}_time` plus `{slot}_am`
//! (`true` = AM, `false` = PM, `null` = unanchored) for each slot.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock12::Phase;
use crate::slot::TimerSlot;

/// Errors produced by timer stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat persisted row of all four slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    #[serde(default)]
    pub kernel_time: Option<String>,
    #[serde(default)]
    pub kernel_am: Option<Phase>,
    #[serde(default)]
    pub evals_time: Option<String>,
    #[serde(default)]
    pub evals_am: Option<Phase>,
    #[serde(default)]
    pub md_time: Option<String>,
    #[serde(default)]
    pub md_am: Option<Phase>,
    #[serde(default)]
    pub samples_time: Option<String>,
    #[serde(default)]
    pub samples_am: Option<Phase>,
}

impl TimerSnapshot {
    pub fn get(&self, slot: TimerSlot) -> (Option<&str>, Option<Phase>) {
        let (time, phase) = match slot {
            TimerSlot::Kernel => (&self.kernel_time, self.kernel_am),
            TimerSlot::Evals => (&self.evals_time, self.evals_am),
            TimerSlot::MetalDetector => (&self.md_time, self.md_am),
            TimerSlot::Samples => (&self.samples_time, self.samples_am),
        };
        (time.as_deref(), phase)
    }

    pub fn set(&mut self, slot: TimerSlot, time: Option<String>, phase: Option<Phase>) {
        let (time_field, phase_field) = match slot {
            TimerSlot::Kernel => (&mut self.kernel_time, &mut self.kernel_am),
            TimerSlot::Evals => (&mut self.evals_time, &mut self.evals_am),
            TimerSlot::MetalDetector => (&mut self.md_time, &mut self.md_am),
            TimerSlot::Samples => (&mut self.samples_time, &mut self.samples_am),
        };
        *time_field = time;
        *phase_field = phase;
    }
}

/// Where timer settings live between sessions.
pub trait TimerStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<TimerSnapshot>, StoreError>;

    fn save(&self, snapshot: &TimerSnapshot) -> Result<(), StoreError>;
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryTimerStore {
    row: Mutex<Option<TimerSnapshot>>,
}

impl MemoryTimerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerStore for MemoryTimerStore {
    fn load(&self) -> Result<Option<TimerSnapshot>, StoreError> {
        Ok(self.row.lock().expect("timer store lock poisoned").clone())
    }

    fn save(&self, snapshot: &TimerSnapshot) -> Result<(), StoreError> {
        *self.row.lock().expect("timer store lock poisoned") = Some(snapshot.clone());
        Ok(())
    }
}

/// Timer row kept as a pretty-printed JSON file.
pub struct JsonFileTimerStore {
    path: PathBuf,
}

impl JsonFileTimerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TimerStore for JsonFileTimerStore {
    fn load(&self) -> Result<Option<TimerSnapshot>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn save(&self, snapshot: &TimerSnapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(snapshot)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_shape_matches_persisted_columns() {
        let mut snapshot = TimerSnapshot::default();
        snapshot.set(TimerSlot::MetalDetector, Some("11:50".into()), Some(Phase::Pm));
        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(value["md_time"], json!("11:50"));
        assert_eq!(value["md_am"], json!(false));
        assert_eq!(value["kernel_am"], json!(null));
    }

    #[test]
    fn partial_rows_deserialize() {
        let snapshot: TimerSnapshot =
            serde_json::from_value(json!({ "evals_time": "07:10", "evals_am": true })).unwrap();
        assert_eq!(snapshot.get(TimerSlot::Evals), (Some("07:10"), Some(Phase::Am)));
        assert_eq!(snapshot.get(TimerSlot::Kernel), (None, None));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileTimerStore::new(dir.path().join("timers.json"));
        assert_eq!(store.load().unwrap(), None);

        let mut snapshot = TimerSnapshot::default();
        snapshot.set(TimerSlot::Kernel, Some("01:00".into()), Some(Phase::Am));
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }
}
