//! Audible alert planning for newly due timers.
//!
//! Playback belongs to the caller; this only lays out which tone sounds
//! when.

use serde::Serialize;

use crate::slot::TimerSlot;

const PIPS_PER_ALERT: u64 = 4;
const PIP_MS: u64 = 120;
const GAP_MS: u64 = 250;
const SLOT_STAGGER_MS: u64 = 240;
const MAX_ALERTED_SLOTS: usize = 4;

/// One pip of an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chime {
    pub slot: TimerSlot,
    pub frequency_hz: u32,
    /// Offset from the moment the alert starts.
    pub start_ms: u64,
    pub duration_ms: u64,
}

/// Pips for the slots that just came due, in start order per slot.
///
/// Each slot gets four pips at its own tone; successive slots start
/// staggered so overlapping alerts stay distinguishable. Empty when sound
/// is off.
pub fn chime_plan(newly_due: &[TimerSlot], sound_on: bool) -> Vec<Chime> {
    if !sound_on {
        return Vec::new();
    }
    newly_due
        .iter()
        .take(MAX_ALERTED_SLOTS)
        .enumerate()
        .flat_map(|(idx, slot)| {
            let offset = idx as u64 * SLOT_STAGGER_MS;
            (0..PIPS_PER_ALERT).map(move |pip| Chime {
                slot: *slot,
                frequency_hz: slot.tone_hz(),
                start_ms: offset + pip * (PIP_MS + GAP_MS),
                duration_ms: PIP_MS,
            })
        })
        .collect()
}
