//! The pure picking decision: state in, state out, no I/O.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::availability::Availability;
use crate::order::{dedupe_ids, positions};
use crate::state::RotationState;

/// Outcome of one picking decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pick {
    /// The product that becomes the extra sample, if any is eligible.
    pub next: Option<String>,
    /// Rotation state after the decision.
    pub state: RotationState,
}

/// Decide which active product is the next extra sample.
///
/// Checks, in order:
/// 1. nothing active or nothing eligible: empty state, no pick
/// 2. active order/membership changed since the snapshot: re-sort progress
/// 3. a newly active, eligible id: picked immediately
/// 4. otherwise the front of `pending`, refilling it (and rolling the
///    cycle over once everything eligible is completed) when empty
pub fn pick_next_extra(
    active_ids: &[String],
    availability: Option<&Availability>,
    prior: &RotationState,
) -> Pick {
    let active = dedupe_ids(active_ids);
    let is_available = |id: &str| availability.map_or(true, |a| a.is_available(id));
    let eligible: Vec<String> = active.iter().filter(|id| is_available(id)).cloned().collect();

    if active.is_empty() || eligible.is_empty() {
        debug!(active = active.len(), "no eligible products, clearing rotation");
        return Pick {
            next: None,
            state: RotationState::default(),
        };
    }

    let active_set: HashSet<&str> = active.iter().map(String::as_str).collect();
    let eligible_set: HashSet<&str> = eligible.iter().map(String::as_str).collect();
    let mut state = prior.clone();

    // Drag-reorder: keep progress, re-sequence it to the new active order.
    if state.last_active_snapshot != active {
        let pos = positions(&active);
        state.pending.retain(|id| eligible_set.contains(id.as_str()));
        state
            .pending
            .make_contiguous()
            .sort_by_key(|id| pos.get(id.as_str()).copied());
        state.completed.retain(|id| eligible_set.contains(id.as_str()));
        state
            .completed
            .sort_by(|a, b| pos.get(a.as_str()).cmp(&pos.get(b.as_str())));
    }

    // Newly activated products jump the queue.
    let snapshot: HashSet<&str> = state.last_active_snapshot.iter().map(String::as_str).collect();
    if let Some(new_id) = active
        .iter()
        .find(|id| !snapshot.contains(id.as_str()) && eligible_set.contains(id.as_str()))
        .cloned()
    {
        debug!(item = %new_id, "fast-tracking newly active product");
        state.pending.retain(|id| *id != new_id);
        state.completed.shift_remove(&new_id);
        state.last_active_snapshot = active;
        return Pick {
            next: Some(new_id),
            state,
        };
    }

    state
        .completed
        .retain(|id| active_set.contains(id.as_str()) && eligible_set.contains(id.as_str()));
    {
        let completed = &state.completed;
        state.pending.retain(|id| {
            active_set.contains(id.as_str())
                && eligible_set.contains(id.as_str())
                && !completed.contains(id)
        });
    }

    if state.pending.is_empty() {
        let all_completed = eligible.iter().all(|id| state.completed.contains(id));
        if all_completed {
            debug!(cycle_len = eligible.len(), "rotation cycle complete, starting over");
            state.completed.clear();
            state.pending = eligible.iter().cloned().collect();
        } else {
            state.pending = eligible
                .iter()
                .filter(|id| !state.completed.contains(*id))
                .cloned()
                .collect();
        }
        state.last_active_snapshot = active.clone();
    }

    let mut next = None;
    while let Some(candidate) = state.pending.pop_front() {
        if eligible_set.contains(candidate.as_str()) {
            state.completed.insert(candidate.clone());
            next = Some(candidate);
            break;
        }
    }

    if next.is_none() {
        state.pending = eligible
            .iter()
            .filter(|id| !state.completed.contains(*id))
            .cloned()
            .collect();
        if let Some(candidate) = state.pending.pop_front() {
            state.completed.insert(candidate.clone());
            next = Some(candidate);
        }
    }

    if eligible.iter().all(|id| state.completed.contains(id)) {
        state.pending.clear();
    }

    Pick { next, state }
}
