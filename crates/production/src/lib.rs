//! Production-day arithmetic and the paperwork hung off it.
//!
//! The floor's day runs from the configured start hour (07:00 by default)
//! to the same hour the next morning. Lot codes, best-by dates, sample
//! timestamps and the weekly peanut-test shift all key off that day.

pub mod day;
pub mod ids;
pub mod label;
pub mod schedule;

pub use day::{
    best_by, lot_code, week_monday, ProductionCalendar, ProductionDayKey, DEFAULT_DAY_START_HOUR,
};
pub use ids::{fnv1a32, production_day_uuid};
pub use label::{LabelContext, LabelError, LabelRenderer};
pub use schedule::{ScheduleEntry, ScheduleError, ShiftSchedule};
