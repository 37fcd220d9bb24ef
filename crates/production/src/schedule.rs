//! Weekly peanut-test shift schedule.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::day::week_monday;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One scheduled week, keyed by its Monday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// `YYYY-MM-DD` of the week's Monday.
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month_num: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    pub shift: String,
}

/// A year of weekly shift assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftSchedule {
    pub version: u32,
    pub year: i32,
    pub generated_at: String,
    #[serde(default)]
    pub entries: Vec<ScheduleEntry>,
    /// Precomputed Monday → shift index. Preferred over `entries`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_date: Option<BTreeMap<String, String>>,
}

impl ShiftSchedule {
    pub fn load(path: &Path) -> Result<Self, ScheduleError> {
        let json = std::fs::read_to_string(path)?;
        let schedule: Self = serde_json::from_str(&json)?;
        debug!(
            path = %path.display(),
            year = schedule.year,
            entries = schedule.entries.len(),
            "loaded shift schedule"
        );
        Ok(schedule)
    }

    /// Shift assigned to the week starting `monday`.
    pub fn shift_for_week(&self, monday: NaiveDate) -> Option<&str> {
        let key = monday.format("%Y-%m-%d").to_string();
        if let Some(shift) = self.by_date.as_ref().and_then(|m| m.get(&key)) {
            return Some(shift);
        }
        self.entries
            .iter()
            .find(|e| e.date == key)
            .map(|e| e.shift.as_str())
    }

    /// Shift for the week containing `date`.
    pub fn shift_on(&self, date: NaiveDate) -> Option<&str> {
        self.shift_for_week(week_monday(date))
    }
}
