use chrono::NaiveTime;
use opsfloor_timers::{JsonFileTimerStore, Phase, TimerController, TimerSlot, TimerStore};

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn timers_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("timers.json");

    {
        let mut controller = TimerController::open(JsonFileTimerStore::new(&path), true);
        controller.set_time(TimerSlot::MetalDetector, "11:00", t(10, 15));
        controller.advance(TimerSlot::MetalDetector, t(11, 0));
    }

    let controller = TimerController::open(JsonFileTimerStore::new(&path), true);
    let record = controller.board().record(TimerSlot::MetalDetector);
    assert_eq!(record.time, "12:50");
    assert_eq!(record.phase, Some(Phase::Pm));
    assert!(!controller.board().is_due(TimerSlot::MetalDetector));
}

#[test]
fn overnight_shift_crosses_midnight() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileTimerStore::new(dir.path().join("timers.json"));
    let mut controller = TimerController::open(store, true);

    controller.set_time(TimerSlot::Kernel, "11:40", t(23, 0));
    let (due, chimes) = controller.tick(t(23, 40));
    assert_eq!(due, vec![TimerSlot::Kernel]);
    assert_eq!(chimes[0].frequency_hz, 880);

    let record = controller.advance(TimerSlot::Kernel, t(23, 41));
    assert_eq!(record.time, "12:20");
    assert_eq!(record.phase, Some(Phase::Am));

    let next = controller.next_due(t(23, 41)).unwrap();
    assert_eq!(next.slot, TimerSlot::Kernel);
    assert_eq!(next.minutes_until, 39);

    let saved = controller.store().load().unwrap().unwrap();
    assert_eq!(saved.kernel_time.as_deref(), Some("12:20"));
    assert_eq!(saved.kernel_am, Some(Phase::Am));
}
