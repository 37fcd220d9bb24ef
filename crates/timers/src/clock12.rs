//! 12-hour clock-face arithmetic with AM/PM phase.
//!
//! Times travel as `HH:MM` display strings (hours 01-12). Every function
//! here is total: malformed input is normalized, never rejected.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: i64 = 1_440;

/// AM/PM half of the day. Persisted as `true` = AM, `false` = PM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Phase {
    Am,
    Pm,
}

impl Phase {
    pub fn from_is_am(is_am: bool) -> Self {
        if is_am { Phase::Am } else { Phase::Pm }
    }

    pub fn is_am(self) -> bool {
        self == Phase::Am
    }

    /// Phase of a 24-hour clock hour.
    pub fn of_hour(hour24: u32) -> Self {
        Self::from_is_am(hour24 < 12)
    }
}

impl From<bool> for Phase {
    fn from(is_am: bool) -> Self {
        Phase::from_is_am(is_am)
    }
}

impl From<Phase> for bool {
    fn from(phase: Phase) -> Self {
        phase.is_am()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_am() { "AM" } else { "PM" })
    }
}

/// A clock-face time: hour 1-12, minute 0-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// `None` unless `hour` is 1-12 and `minute` is 0-59.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        ((1..=12).contains(&hour) && minute <= 59).then_some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Parse `H:MM` / `HH:MM` leniently.
    ///
    /// Minutes are clamped to 0-59 (unparseable → 0). Hour 0, negative or
    /// unparseable becomes 12; hours above 12 wrap with `((h - 1) % 12) + 1`.
    /// Empty input is `12:00`.
    pub fn normalize(raw: &str) -> Self {
        if raw.is_empty() {
            return Self { hour: 12, minute: 0 };
        }
        let (h_str, m_str) = raw.split_once(':').unwrap_or((raw, "0"));
        let minute = leading_int(m_str).unwrap_or(0).clamp(0, 59) as u8;
        let hour = match leading_int(h_str) {
            Some(h) if h > 0 => ((h - 1) % 12 + 1) as u8,
            _ => 12,
        };
        Self { hour, minute }
    }

    /// Minutes since midnight for this face read in `phase`.
    /// 12 AM is 0, 12 PM is 720.
    pub fn minutes_of_day(self, phase: Phase) -> u32 {
        let h = u32::from(self.hour % 12);
        let h24 = if phase.is_am() { h } else { h + 12 };
        h24 * 60 + u32::from(self.minute)
    }

    /// Split minutes since midnight (wrapped into one day) back into a
    /// clock face and phase.
    pub fn from_minutes_of_day(minutes: i64) -> (Self, Phase) {
        let total = minutes.rem_euclid(MINUTES_PER_DAY);
        let h24 = (total / 60) as u32;
        let minute = (total % 60) as u8;
        let hour = match h24 % 12 {
            0 => 12,
            h => h as u8,
        };
        (Self { hour, minute }, Phase::of_hour(h24))
    }

    /// The face and phase a wall clock shows at `now`.
    pub fn at(now: NaiveTime) -> (Self, Phase) {
        Self::from_minutes_of_day(i64::from(now.hour() * 60 + now.minute()))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Integer prefix of `s` the way a lenient form field reads it: leading
/// whitespace and one sign allowed, digits up to the first non-digit.
/// Very long digit runs saturate.
fn leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let run: &str = &digits[..digits.bytes().take_while(u8::is_ascii_digit).count()];
    if run.is_empty() {
        return None;
    }
    let value = run.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

fn minutes_now(now: NaiveTime) -> i64 {
    i64::from(now.hour() * 60 + now.minute())
}

/// Normalize raw input to an `HH:MM` display string. Never fails.
pub fn normalize_time12(raw: &str) -> String {
    ClockTime::normalize(raw).to_string()
}

/// Minutes since midnight (0-1439) for a clock face plus phase.
pub fn to_minutes_of_day(hhmm: &str, phase: Phase) -> u32 {
    ClockTime::normalize(hhmm).minutes_of_day(phase)
}

/// Which phase puts the next occurrence of `hhmm` soonest after `now`.
/// Ties go to AM.
pub fn infer_next_phase(hhmm: &str, now: NaiveTime) -> Phase {
    let face = ClockTime::normalize(hhmm);
    let now = minutes_now(now);
    let forward = |phase| (i64::from(face.minutes_of_day(phase)) - now).rem_euclid(MINUTES_PER_DAY);
    if forward(Phase::Am) <= forward(Phase::Pm) {
        Phase::Am
    } else {
        Phase::Pm
    }
}

/// Minutes from `now` until `hhmm` in `phase` next comes around (0-1439).
/// Zero when it is the current minute.
pub fn minutes_until_next(hhmm: &str, phase: Phase, now: NaiveTime) -> u32 {
    let target = i64::from(to_minutes_of_day(hhmm, phase));
    (target - minutes_now(now)).rem_euclid(MINUTES_PER_DAY) as u32
}

/// Result of [`advance_with_phase`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advanced {
    pub time: String,
    pub phase: Phase,
}

/// Shift a clock face by `minutes` (negative allowed), carrying the phase
/// across noon and midnight.
pub fn advance_with_phase(hhmm: &str, phase: Phase, minutes: i64) -> Advanced {
    let start = i64::from(to_minutes_of_day(hhmm, phase));
    let (face, phase) = ClockTime::from_minutes_of_day(start.saturating_add(minutes));
    Advanced {
        time: face.to_string(),
        phase,
    }
}

/// Wall-clock display, e.g. `07:45 PM` or `07:45:12 PM`.
pub fn format_clock_face(now: NaiveTime, with_seconds: bool) -> String {
    let (face, phase) = ClockTime::at(now);
    if with_seconds {
        format!("{}:{:02} {}", face, now.second(), phase)
    } else {
        format!("{} {}", face, phase)
    }
}

/// `H:MM` or `HH:MM` made of digits only.
pub(crate) fn looks_like_clock_face(s: &str) -> bool {
    let Some((h, m)) = s.split_once(':') else {
        return false;
    };
    (1..=2).contains(&h.len())
        && m.len() == 2
        && h.bytes().all(|b| b.is_ascii_digit())
        && m.bytes().all(|b| b.is_ascii_digit())
}
