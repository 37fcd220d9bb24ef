//! The four fixed timer slots on the floor board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named timer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerSlot {
    Kernel,
    Evals,
    #[serde(rename = "md")]
    MetalDetector,
    Samples,
}

impl TimerSlot {
    pub const ALL: [TimerSlot; 4] = [
        TimerSlot::Kernel,
        TimerSlot::Evals,
        TimerSlot::MetalDetector,
        TimerSlot::Samples,
    ];

    /// Slots that compete for the "next up" display. Samples is tracked
    /// for due alerts only.
    pub const RANKED: [TimerSlot; 3] = [TimerSlot::Kernel, TimerSlot::Evals, TimerSlot::MetalDetector];

    /// Slot that wins when two ranked timers come due in the same minute.
    pub const TIE_BREAK: TimerSlot = TimerSlot::MetalDetector;

    /// Short key used in persisted payloads and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            TimerSlot::Kernel => "kernel",
            TimerSlot::Evals => "evals",
            TimerSlot::MetalDetector => "md",
            TimerSlot::Samples => "samples",
        }
    }

    /// Minutes added by a single "next test" press.
    pub fn advance_minutes(self) -> i64 {
        match self {
            TimerSlot::Kernel => 40,
            TimerSlot::Evals => 50,
            TimerSlot::MetalDetector => 110,
            TimerSlot::Samples => 120,
        }
    }

    /// Alert tone in hertz.
    pub fn tone_hz(self) -> u32 {
        match self {
            TimerSlot::Kernel => 880,
            TimerSlot::Evals => 740,
            TimerSlot::MetalDetector => 660,
            TimerSlot::Samples => 520,
        }
    }
}

impl fmt::Display for TimerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TimerSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kernel" => Ok(TimerSlot::Kernel),
            "evals" => Ok(TimerSlot::Evals),
            "md" | "metal-detector" | "metal_detector" => Ok(TimerSlot::MetalDetector),
            "samples" => Ok(TimerSlot::Samples),
            other => Err(format!("unknown timer slot '{}'", other)),
        }
    }
}
