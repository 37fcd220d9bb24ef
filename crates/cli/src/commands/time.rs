use anyhow::Result;
use serde_json::json;

use opsfloor_core::Clock;
use opsfloor_timers::{
    advance_with_phase, format_clock_face, infer_next_phase, minutes_until_next, normalize_time12,
    to_minutes_of_day,
};

use super::{parse_phase, print_json};
use crate::cli::TimeCommand;

pub fn run(cmd: TimeCommand, clock: &dyn Clock) -> Result<()> {
    let now = clock.now().time();

    match cmd {
        TimeCommand::Normalize { raw } => print_json(&json!({ "time": normalize_time12(&raw) })),
        TimeCommand::Infer { time } => {
            let time = normalize_time12(&time);
            let phase = infer_next_phase(&time, now);
            print_json(&json!({ "time": time, "phase": phase.to_string() }))
        }
        TimeCommand::Minutes { time, phase } => {
            let phase = parse_phase(&phase)?;
            print_json(&json!({ "minutes": to_minutes_of_day(&time, phase) }))
        }
        TimeCommand::Until { time, phase } => {
            let phase = parse_phase(&phase)?;
            print_json(&json!({ "minutes": minutes_until_next(&time, phase, now) }))
        }
        TimeCommand::Advance {
            time,
            phase,
            minutes,
        } => {
            let advanced = advance_with_phase(&time, parse_phase(&phase)?, minutes);
            print_json(&json!({ "time": advanced.time, "phase": advanced.phase.to_string() }))
        }
        TimeCommand::Face { seconds } => print_json(&json!({ "clock": format_clock_face(now, seconds) })),
    }
}
