//! The timer board: one record per slot, plus the set of slots that have
//! come due and are waiting to be acknowledged.

use chrono::NaiveTime;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::clock12::{
    advance_with_phase, infer_next_phase, looks_like_clock_face, minutes_until_next, ClockTime,
    Phase,
};
use crate::slot::TimerSlot;
use crate::store::TimerSnapshot;

/// Time shown by a slot that has never been set. It never matches a wall
/// clock, so an unset slot never comes due.
pub const PLACEHOLDER_TIME: &str = "00:00";

/// Scheduled time of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRecord {
    /// `HH:MM` on a 12-hour face.
    pub time: String,
    /// `None` until the slot is set or advanced.
    pub phase: Option<Phase>,
}

impl Default for TimerRecord {
    fn default() -> Self {
        Self {
            time: PLACEHOLDER_TIME.to_string(),
            phase: None,
        }
    }
}

/// The ranked slot that fires soonest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextDue {
    pub slot: TimerSlot,
    pub time: String,
    pub minutes_until: u32,
}

#[derive(Debug, Clone)]
pub struct TimerBoard {
    records: IndexMap<TimerSlot, TimerRecord>,
    due: IndexSet<TimerSlot>,
}

impl TimerBoard {
    /// All four slots at the placeholder time, nothing due.
    pub fn new() -> Self {
        Self {
            records: TimerSlot::ALL
                .into_iter()
                .map(|slot| (slot, TimerRecord::default()))
                .collect(),
            due: IndexSet::new(),
        }
    }

    /// Rebuild a board from persisted values. Missing times fall back to
    /// the placeholder; the due set starts empty.
    pub fn from_snapshot(snapshot: &TimerSnapshot) -> Self {
        let mut board = Self::new();
        for slot in TimerSlot::ALL {
            let (time, phase) = snapshot.get(slot);
            let record = board.record_mut(slot);
            record.time = time.unwrap_or(PLACEHOLDER_TIME).to_string();
            record.phase = phase;
        }
        board
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let mut snapshot = TimerSnapshot::default();
        for (slot, record) in &self.records {
            let time = (!record.time.is_empty()).then(|| record.time.clone());
            snapshot.set(*slot, time, record.phase);
        }
        snapshot
    }

    pub fn record(&self, slot: TimerSlot) -> &TimerRecord {
        &self.records[&slot]
    }

    fn record_mut(&mut self, slot: TimerSlot) -> &mut TimerRecord {
        self.records.entry(slot).or_default()
    }

    pub fn records(&self) -> impl Iterator<Item = (TimerSlot, &TimerRecord)> {
        self.records.iter().map(|(slot, record)| (*slot, record))
    }

    /// Set a slot from user input. The time is normalized and the phase is
    /// inferred as the next occurrence after `now`. Acknowledges the slot.
    pub fn set_time(&mut self, slot: TimerSlot, raw: &str, now: NaiveTime) -> &TimerRecord {
        let face = ClockTime::normalize(raw).to_string();
        let phase = infer_next_phase(&face, now);
        self.due.shift_remove(&slot);
        info!(slot = %slot, time = %face, phase = %phase, "timer set");

        let record = self.record_mut(slot);
        record.time = face;
        record.phase = Some(phase);
        record
    }

    /// Push a slot forward by its fixed increment.
    pub fn advance(&mut self, slot: TimerSlot, now: NaiveTime) -> &TimerRecord {
        self.advance_by(slot, slot.advance_minutes(), now)
    }

    /// Push a slot forward by `minutes`, carrying the phase across noon or
    /// midnight. An unanchored phase is inferred first. Acknowledges the slot.
    pub fn advance_by(&mut self, slot: TimerSlot, minutes: i64, now: NaiveTime) -> &TimerRecord {
        let current = self.record(slot).clone();
        let base = ClockTime::normalize(&current.time).to_string();
        let phase = current.phase.unwrap_or_else(|| infer_next_phase(&base, now));
        let advanced = advance_with_phase(&base, phase, minutes);
        self.due.shift_remove(&slot);
        info!(
            slot = %slot,
            from = %base,
            to = %advanced.time,
            phase = %advanced.phase,
            "timer advanced"
        );

        let record = self.record_mut(slot);
        record.time = advanced.time;
        record.phase = Some(advanced.phase);
        record
    }

    /// Per-minute due check. Returns the slots that became due on this
    /// check; slots already due stay due until set or advanced.
    pub fn check_due(&mut self, now: NaiveTime) -> Vec<TimerSlot> {
        let (face, current_phase) = ClockTime::at(now);
        let face = face.to_string();

        let mut newly_due = Vec::new();
        for (slot, record) in &self.records {
            if record.time.is_empty() || record.time != face {
                continue;
            }
            let phase_matches = record.phase.map_or(true, |p| p == current_phase);
            if phase_matches && self.due.insert(*slot) {
                newly_due.push(*slot);
            }
        }
        if !newly_due.is_empty() {
            debug!(count = newly_due.len(), at = %face, "timers came due");
        }
        newly_due
    }

    pub fn is_due(&self, slot: TimerSlot) -> bool {
        self.due.contains(&slot)
    }

    /// Due slots, oldest first.
    pub fn due(&self) -> impl Iterator<Item = TimerSlot> + '_ {
        self.due.iter().copied()
    }

    pub fn clear_due(&mut self, slot: TimerSlot) -> bool {
        self.due.shift_remove(&slot)
    }

    /// The ranked slot (kernel, evals, metal detector) that fires soonest.
    ///
    /// Slots without a phase, or whose time is not a clock face, are
    /// skipped. Ties go to [`TimerSlot::TIE_BREAK`].
    pub fn next_due(&self, now: NaiveTime) -> Option<NextDue> {
        TimerSlot::RANKED
            .into_iter()
            .filter_map(|slot| {
                let record = self.record(slot);
                let phase = record.phase?;
                if !looks_like_clock_face(&record.time) {
                    return None;
                }
                Some(NextDue {
                    slot,
                    time: record.time.clone(),
                    minutes_until: minutes_until_next(&record.time, phase, now),
                })
            })
            .min_by_key(|next| (next.minutes_until, next.slot != TimerSlot::TIE_BREAK))
    }
}

impl Default for TimerBoard {
    fn default() -> Self {
        Self::new()
    }
}
