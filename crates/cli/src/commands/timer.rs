use std::time::Duration;

use anyhow::Result;
use serde_json::json;
use tracing::info;

use opsfloor_core::{Clock, Config, FloorError};
use opsfloor_timers::{format_clock_face, JsonFileTimerStore, TimerController, TimerSlot};

use super::print_json;
use crate::cli::TimerCommand;

fn parse_slot(raw: &str) -> Result<TimerSlot, FloorError> {
    raw.parse().map_err(FloorError::InvalidArgument)
}

pub async fn run(cmd: TimerCommand, config: &Config, clock: &dyn Clock) -> Result<()> {
    let store = JsonFileTimerStore::new(config.storage.timers_path());
    let mut controller = TimerController::open(store, config.timers.sound_on);

    match cmd {
        TimerCommand::Set { slot, time } => {
            let slot = parse_slot(&slot)?;
            let record = controller.set_time(slot, &time, clock.now().time());
            print_json(&json!({ "slot": slot, "record": record }))
        }
        TimerCommand::Advance { slot, minutes } => {
            let slot = parse_slot(&slot)?;
            let now = clock.now().time();
            let record = match minutes {
                Some(m) => controller.advance_by(slot, m, now),
                None => controller.advance(slot, now),
            };
            print_json(&json!({ "slot": slot, "record": record }))
        }
        TimerCommand::Status => {
            let now = clock.now().time();
            let records: serde_json::Map<String, serde_json::Value> = controller
                .board()
                .records()
                .map(|(slot, record)| (slot.key().to_string(), json!(record)))
                .collect();
            print_json(&json!({
                "clock": format_clock_face(now, false),
                "timers": records,
                "next": controller.next_due(now),
            }))
        }
        TimerCommand::Watch { interval, mute } => {
            if mute {
                controller.set_sound(false);
            }
            let secs = interval.unwrap_or(config.timers.check_interval_secs).max(1);
            watch(&mut controller, clock, Duration::from_secs(secs)).await
        }
    }
}

async fn watch(
    controller: &mut TimerController<JsonFileTimerStore>,
    clock: &dyn Clock,
    period: Duration,
) -> Result<()> {
    info!(every_secs = period.as_secs(), "watching timers, ctrl-c to stop");
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = clock.now().time();
                let (due, chimes) = controller.tick(now);
                if !due.is_empty() {
                    print_json(&json!({
                        "at": format_clock_face(now, true),
                        "due": due,
                        "chimes": chimes,
                    }))?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("timer watch stopped");
                return Ok(());
            }
        }
    }
}
