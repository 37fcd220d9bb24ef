//! Tests for the rotation scheduler.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::availability::Availability;
    use crate::scheduler::{pick_next_extra, RotationScheduler};
    use crate::state::RotationState;
    use crate::store::{MemoryRotationStore, RotationStore, StoreError};

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn settled(list: &[&str]) -> RotationScheduler<MemoryRotationStore> {
        RotationScheduler::new(MemoryRotationStore::with_state(RotationState::settled(&ids(list))))
    }

    fn next(scheduler: &RotationScheduler<MemoryRotationStore>, active: &[String], avail: Option<&Availability>) -> Option<String> {
        scheduler.pick_next_extra(active, avail).next
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore(RotationState);

    impl RotationStore for ReadOnlyStore {
        fn load(&self) -> Result<RotationState, StoreError> {
            Ok(self.0.clone())
        }

        fn save(&self, _state: &RotationState) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    // -- preview -------------------------------------------------------------

    #[test]
    fn preview_is_idempotent() {
        let scheduler = settled(&["a", "b", "c"]);
        let active = ids(&["a", "b", "c"]);
        let before = scheduler.store().snapshot();

        let first = scheduler.preview_next_extra(&active, None);
        let second = scheduler.preview_next_extra(&active, None);

        assert_eq!(first.next.as_deref(), Some("a"));
        assert_eq!(first.next, second.next);
        assert_eq!(scheduler.store().snapshot(), before);
    }

    #[test]
    fn preview_agrees_with_pick() {
        let scheduler = settled(&["a", "b", "c", "d"]);
        let active = ids(&["a", "b", "c", "d"]);
        let avail = Availability::unavailable(["b"]);
        scheduler.pick_next_extra(&active, Some(&avail));

        let preview = scheduler.preview_next_extra(&active, Some(&avail));
        let pick = scheduler.pick_next_extra(&active, Some(&avail));
        assert_eq!(preview.next, pick.next);
        assert_eq!(pick.next.as_deref(), Some("c"));
    }

    #[test]
    fn preview_agrees_with_pick_after_reorder() {
        let scheduler = settled(&["a", "b", "c", "d"]);
        scheduler.pick_next_extra(&ids(&["a", "b", "c", "d"]), None);

        let reordered = ids(&["d", "c", "b", "a"]);
        let preview = scheduler.preview_next_extra(&reordered, None);
        let pick = scheduler.pick_next_extra(&reordered, None);
        assert_eq!(preview.next, pick.next);
    }

    // -- round robin ---------------------------------------------------------

    #[test]
    fn each_item_once_per_cycle() {
        let scheduler = settled(&["a", "b", "c"]);
        let active = ids(&["a", "b", "c"]);

        let cycle: Vec<String> = (0..3).filter_map(|_| next(&scheduler, &active, None)).collect();
        assert_eq!(cycle, ids(&["a", "b", "c"]));
        let unique: HashSet<&String> = cycle.iter().collect();
        assert_eq!(unique.len(), 3);

        let state = scheduler.store().snapshot();
        assert!(state.pending.is_empty());
        assert_eq!(state.completed.len(), 3);

        assert_eq!(next(&scheduler, &active, None).as_deref(), Some("a"));
        assert_eq!(scheduler.store().snapshot().completed.len(), 1);
    }

    #[test]
    fn first_pick_from_empty_state_takes_first_active() {
        let scheduler = RotationScheduler::new(MemoryRotationStore::new());
        let active = ids(&["a", "b"]);
        assert_eq!(next(&scheduler, &active, None).as_deref(), Some("a"));
        assert_eq!(scheduler.store().snapshot().last_active_snapshot, active);

        // The fast-tracked first pick does not consume its cycle turn.
        assert_eq!(next(&scheduler, &active, None).as_deref(), Some("a"));
        assert_eq!(next(&scheduler, &active, None).as_deref(), Some("b"));
    }

    #[test]
    fn duplicate_ids_are_collapsed() {
        let scheduler = settled(&["a", "b"]);
        let active = ids(&["a", "a", "b"]);
        assert_eq!(next(&scheduler, &active, None).as_deref(), Some("a"));
        assert_eq!(next(&scheduler, &active, None).as_deref(), Some("b"));
        assert_eq!(next(&scheduler, &active, None).as_deref(), Some("a"));
    }

    // -- fast track ----------------------------------------------------------

    #[test]
    fn new_item_is_picked_next() {
        let scheduler = settled(&["a", "b", "c"]);
        let active = ids(&["a", "b", "c"]);
        next(&scheduler, &active, None);
        next(&scheduler, &active, None);

        let grown = ids(&["a", "b", "c", "d"]);
        assert_eq!(next(&scheduler, &grown, None).as_deref(), Some("d"));
        // The interrupted cycle resumes, and the new item still gets a normal turn.
        assert_eq!(next(&scheduler, &grown, None).as_deref(), Some("c"));
        assert_eq!(next(&scheduler, &grown, None).as_deref(), Some("d"));
        assert_eq!(next(&scheduler, &grown, None).as_deref(), Some("a"));
    }

    #[test]
    fn new_item_wins_regardless_of_position() {
        let scheduler = settled(&["a", "b", "c"]);
        next(&scheduler, &ids(&["a", "b", "c"]), None);
        assert_eq!(next(&scheduler, &ids(&["x", "a", "b", "c"]), None).as_deref(), Some("x"));
    }

    #[test]
    fn unavailable_new_item_is_not_fast_tracked() {
        let scheduler = settled(&["a", "b"]);
        let avail = Availability::unavailable(["n"]);
        let pick = scheduler.pick_next_extra(&ids(&["a", "b", "n"]), Some(&avail));
        assert_eq!(pick.next.as_deref(), Some("a"));
    }

    // -- availability --------------------------------------------------------

    #[test]
    fn unavailable_item_is_never_picked() {
        let scheduler = settled(&["a", "b", "c"]);
        let active = ids(&["a", "b", "c"]);
        let avail = Availability::unavailable(["b"]);

        let picks: Vec<String> = (0..6)
            .filter_map(|_| next(&scheduler, &active, Some(&avail)))
            .collect();
        assert_eq!(picks, ids(&["a", "c", "a", "c", "a", "c"]));
    }

    #[test]
    fn skipped_item_keeps_its_turn_when_back() {
        let scheduler = settled(&["a", "b", "c"]);
        let active = ids(&["a", "b", "c"]);
        let mut avail = Availability::unavailable(["b"]);

        assert_eq!(next(&scheduler, &active, Some(&avail)).as_deref(), Some("a"));
        avail.set("b", true);
        assert_eq!(next(&scheduler, &active, Some(&avail)).as_deref(), Some("c"));
        assert_eq!(next(&scheduler, &active, Some(&avail)).as_deref(), Some("b"));
        assert_eq!(next(&scheduler, &active, Some(&avail)).as_deref(), Some("a"));
    }

    #[test]
    fn nothing_eligible_clears_state() {
        let scheduler = settled(&["a", "b"]);
        next(&scheduler, &ids(&["a", "b"]), None);

        let avail = Availability::unavailable(["a", "b"]);
        let pick = scheduler.pick_next_extra(&ids(&["a", "b"]), Some(&avail));
        assert_eq!(pick.next, None);
        assert!(pick.state.is_empty());
        assert!(scheduler.store().snapshot().is_empty());

        let pick = scheduler.pick_next_extra(&[], None);
        assert_eq!(pick.next, None);
    }

    // -- reorder -------------------------------------------------------------

    #[test]
    fn reorder_keeps_progress() {
        let scheduler = settled(&["a", "b", "c", "d"]);
        assert_eq!(next(&scheduler, &ids(&["a", "b", "c", "d"]), None).as_deref(), Some("a"));

        let reordered = ids(&["d", "c", "b", "a"]);
        let picks: Vec<String> = (0..4)
            .filter_map(|_| next(&scheduler, &reordered, None))
            .collect();
        assert_eq!(picks, ids(&["d", "c", "b", "d"]));
    }

    #[test]
    fn stale_pending_ids_are_pruned() {
        let mut prior = RotationState::settled(&ids(&["a", "b"]));
        prior.pending.push_back("gone".to_string());
        prior.pending.push_back("b".to_string());

        let pick = pick_next_extra(&ids(&["a", "b"]), None, &prior);
        assert_eq!(pick.next.as_deref(), Some("b"));
        assert!(!pick.state.pending.contains(&"gone".to_string()));
    }

    #[test]
    fn sync_resorts_without_losing_progress() {
        let scheduler = settled(&["a", "b", "c", "d"]);
        next(&scheduler, &ids(&["a", "b", "c", "d"]), None);

        let synced = scheduler.sync_to_active_order(&ids(&["d", "b", "a", "c"]), None);
        assert_eq!(synced.pending.iter().cloned().collect::<Vec<_>>(), ids(&["d", "b", "c"]));
        assert_eq!(synced.completed.iter().cloned().collect::<Vec<_>>(), ids(&["a"]));
        assert_eq!(synced.last_active_snapshot, ids(&["d", "b", "a", "c"]));
        assert_eq!(scheduler.store().snapshot(), synced);
    }

    #[test]
    fn sync_with_same_order_is_a_noop() {
        let scheduler = settled(&["a", "b"]);
        next(&scheduler, &ids(&["a", "b"]), None);
        let before = scheduler.store().snapshot();
        assert_eq!(scheduler.sync_to_active_order(&ids(&["a", "b"]), None), before);
    }

    // -- restore / reset / persistence ---------------------------------------

    #[test]
    fn restore_prefers_last_pick() {
        let scheduler = settled(&["a", "b", "c"]);
        let active = ids(&["a", "b", "c"]);
        next(&scheduler, &active, None);

        assert_eq!(scheduler.restore_extra(&active, None).as_deref(), Some("a"));

        let avail = Availability::unavailable(["a"]);
        assert_eq!(scheduler.restore_extra(&active, Some(&avail)).as_deref(), Some("b"));
    }

    #[test]
    fn reset_clears_persisted_progress() {
        let scheduler = settled(&["a", "b"]);
        next(&scheduler, &ids(&["a", "b"]), None);
        assert!(scheduler.reset().is_empty());
        assert!(scheduler.store().snapshot().is_empty());
    }

    #[test]
    fn explicit_state_overrides_store() {
        let scheduler = settled(&["a", "b", "c"]);
        let mut prior = RotationState::settled(&ids(&["a", "b", "c"]));
        prior.pending = ids(&["c", "a"]).into();

        let pick = scheduler.pick_with_state(&ids(&["a", "b", "c"]), None, &prior);
        assert_eq!(pick.next.as_deref(), Some("c"));
        assert_eq!(scheduler.store().snapshot(), pick.state);
    }

    #[test]
    fn failed_save_does_not_change_decision() {
        let scheduler = RotationScheduler::new(ReadOnlyStore(RotationState::settled(&ids(&["a", "b"]))));
        let pick = scheduler.pick_next_extra(&ids(&["a", "b"]), None);
        assert_eq!(pick.next.as_deref(), Some("a"));
        assert!(pick.state.completed.contains("a"));
    }
}
