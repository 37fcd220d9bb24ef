//! Keeps a [`TimerBoard`] and a [`TimerStore`] in step.
//!
//! Loads once at construction and saves after every change. Store failures
//! are logged and never interrupt the floor.

use chrono::NaiveTime;
use tracing::{info, warn};

use crate::board::{NextDue, TimerBoard, TimerRecord};
use crate::chime::{chime_plan, Chime};
use crate::slot::TimerSlot;
use crate::store::TimerStore;

pub struct TimerController<S> {
    board: TimerBoard,
    store: S,
    sound_on: bool,
}

impl<S: TimerStore> TimerController<S> {
    /// Open the board from `store`. A missing or unreadable row starts
    /// every slot at the placeholder.
    pub fn open(store: S, sound_on: bool) -> Self {
        let board = match store.load() {
            Ok(Some(snapshot)) => TimerBoard::from_snapshot(&snapshot),
            Ok(None) => TimerBoard::new(),
            Err(e) => {
                warn!(error = %e, "failed to load timers, starting from placeholders");
                TimerBoard::new()
            }
        };
        info!(sound_on, "timer board opened");
        Self {
            board,
            store,
            sound_on,
        }
    }

    pub fn board(&self) -> &TimerBoard {
        &self.board
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sound_on(&self) -> bool {
        self.sound_on
    }

    pub fn set_sound(&mut self, on: bool) {
        self.sound_on = on;
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.board.snapshot()) {
            warn!(error = %e, "failed to persist timers");
        }
    }

    pub fn set_time(&mut self, slot: TimerSlot, raw: &str, now: NaiveTime) -> TimerRecord {
        let record = self.board.set_time(slot, raw, now).clone();
        self.persist();
        record
    }

    pub fn advance(&mut self, slot: TimerSlot, now: NaiveTime) -> TimerRecord {
        let record = self.board.advance(slot, now).clone();
        self.persist();
        record
    }

    pub fn advance_by(&mut self, slot: TimerSlot, minutes: i64, now: NaiveTime) -> TimerRecord {
        let record = self.board.advance_by(slot, minutes, now).clone();
        self.persist();
        record
    }

    /// Run one due check and plan the alert for whatever just came due.
    pub fn tick(&mut self, now: NaiveTime) -> (Vec<TimerSlot>, Vec<Chime>) {
        let newly_due = self.board.check_due(now);
        let chimes = chime_plan(&newly_due, self.sound_on);
        for slot in &newly_due {
            info!(slot = %slot, time = %self.board.record(*slot).time, "timer due");
        }
        (newly_due, chimes)
    }

    pub fn next_due(&self, now: NaiveTime) -> Option<NextDue> {
        self.board.next_due(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock12::Phase;
    use crate::store::{MemoryTimerStore, StoreError, TimerSnapshot};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    struct BrokenStore;

    impl TimerStore for BrokenStore {
        fn load(&self) -> Result<Option<TimerSnapshot>, StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }

        fn save(&self, _snapshot: &TimerSnapshot) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn changes_are_saved() {
        let mut controller = TimerController::open(MemoryTimerStore::new(), true);
        controller.set_time(TimerSlot::Kernel, "9:5", t(8, 0));

        let saved = controller.store().load().unwrap().unwrap();
        assert_eq!(saved.get(TimerSlot::Kernel), (Some("09:05"), Some(Phase::Am)));
    }

    #[test]
    fn broken_store_does_not_block_updates() {
        let mut controller = TimerController::open(BrokenStore, false);
        let record = controller.advance(TimerSlot::Evals, t(13, 0));
        // Placeholder 12:00, next occurrence after 13:00 is midnight, plus 50.
        assert_eq!(record.time, "12:50");
        assert_eq!(record.phase, Some(Phase::Am));
    }

    #[test]
    fn tick_plans_chimes_for_new_due_slots() {
        let mut controller = TimerController::open(MemoryTimerStore::new(), true);
        controller.set_time(TimerSlot::Samples, "10:00", t(9, 30));

        let (due, chimes) = controller.tick(t(10, 0));
        assert_eq!(due, vec![TimerSlot::Samples]);
        assert_eq!(chimes.len(), 4);

        let (due, chimes) = controller.tick(t(10, 0));
        assert!(due.is_empty());
        assert!(chimes.is_empty());
    }
}
