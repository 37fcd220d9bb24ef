//! Extra-sample rotation scheduling.
//!
//! [`pick_next_extra`] is the pure decision. [`RotationScheduler`] wraps it
//! with a [`RotationStore`]: load the prior state, decide, save best-effort.
//! A failed save is logged and the decision still stands.

mod core;

#[cfg(test)]
mod tests;

use tracing::{debug, info, warn};

use crate::availability::Availability;
use crate::order::positions;
use crate::state::RotationState;
use crate::store::RotationStore;

pub use self::core::{pick_next_extra, Pick};

/// Drives the rotation against a persisted state store.
pub struct RotationScheduler<S> {
    store: S,
}

impl<S: RotationStore> RotationScheduler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current persisted state; a failed load starts from an empty cycle.
    pub fn load_state(&self) -> RotationState {
        match self.store.load() {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "failed to load rotation state, starting fresh");
                RotationState::default()
            }
        }
    }

    fn persist(&self, state: &RotationState) {
        if let Err(e) = self.store.save(state) {
            warn!(error = %e, "failed to persist rotation state");
        }
    }

    /// Pick the next extra from the persisted state and commit the result.
    pub fn pick_next_extra(&self, active_ids: &[String], availability: Option<&Availability>) -> Pick {
        let prior = self.load_state();
        self.pick_with_state(active_ids, availability, &prior)
    }

    /// Pick from an explicit prior state and commit the result.
    pub fn pick_with_state(
        &self,
        active_ids: &[String],
        availability: Option<&Availability>,
        prior: &RotationState,
    ) -> Pick {
        let pick = pick_next_extra(active_ids, availability, prior);
        self.persist(&pick.state);
        match &pick.next {
            Some(id) => info!(item = %id, pending = pick.state.pending.len(), "picked extra sample"),
            None => info!("no eligible extra sample"),
        }
        pick
    }

    /// What [`pick_next_extra`](Self::pick_next_extra) would return, without
    /// committing anything.
    pub fn preview_next_extra(&self, active_ids: &[String], availability: Option<&Availability>) -> Pick {
        pick_next_extra(active_ids, availability, &self.load_state())
    }

    /// Re-sequence cycle progress after the active list was reordered.
    ///
    /// Ids that are no longer active or are unavailable are dropped from
    /// `pending` and `completed`. An unchanged order returns the stored
    /// state untouched.
    pub fn sync_to_active_order(
        &self,
        active_ids: &[String],
        availability: Option<&Availability>,
    ) -> RotationState {
        let mut state = self.load_state();
        let active = crate::order::dedupe_ids(active_ids);
        if state.last_active_snapshot == active {
            return state;
        }

        let pos = positions(&active);
        let keep = |id: &String| {
            pos.contains_key(id.as_str()) && availability.map_or(true, |a| a.is_available(id))
        };
        state.pending.retain(|id| keep(id));
        state
            .pending
            .make_contiguous()
            .sort_by_key(|id| pos.get(id.as_str()).copied());
        state.completed.retain(|id| keep(id));
        state
            .completed
            .sort_by(|a, b| pos.get(a.as_str()).cmp(&pos.get(b.as_str())));
        state.last_active_snapshot = active;

        debug!(
            pending = state.pending.len(),
            completed = state.completed.len(),
            "rotation synced to new active order"
        );
        self.persist(&state);
        state
    }

    /// Forget all cycle progress.
    pub fn reset(&self) -> RotationState {
        let state = RotationState::default();
        self.persist(&state);
        info!("rotation reset");
        state
    }

    /// The extra to show when a session starts: the last pick if it is still
    /// active and available, otherwise the previewed next pick.
    pub fn restore_extra(&self, active_ids: &[String], availability: Option<&Availability>) -> Option<String> {
        let state = self.load_state();
        if let Some(last) = state.last_completed() {
            let available = availability.map_or(true, |a| a.is_available(last));
            if available && active_ids.iter().any(|id| id == last) {
                return Some(last.to_string());
            }
        }
        pick_next_extra(active_ids, availability, &state).next
    }
}
