//! Injectable wall-clock source.
//!
//! Everything time-dependent in the workspace takes an explicit `now`;
//! a [`Clock`] is how long-running callers obtain one.

use std::sync::Mutex;

use chrono::{Local, NaiveDateTime};

/// Source of the current local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to a settable instant, for tests and replay.
#[derive(Debug)]
pub struct FixedClock {
    at: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at: Mutex::new(at) }
    }

    /// Move the clock to a new instant.
    pub fn set(&self, at: NaiveDateTime) {
        *self.at.lock().expect("fixed clock lock poisoned") = at;
    }

    /// Move the clock forward by a number of minutes.
    pub fn advance_minutes(&self, minutes: i64) {
        let mut guard = self.at.lock().expect("fixed clock lock poisoned");
        *guard += chrono::Duration::minutes(minutes);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.at.lock().expect("fixed clock lock poisoned")
    }
}
