//! Shift timers on a 12-hour clock face.
//!
//! This crate provides:
//! - the phase engine: normalization, AM/PM inference, minute arithmetic
//! - [`TimerBoard`], the four fixed timer slots with due tracking and
//!   next-due ranking
//! - chime planning for newly due timers
//! - [`TimerStore`] persistence and [`TimerController`], which keeps a
//!   board and a store in step

pub mod board;
pub mod chime;
pub mod clock12;
pub mod controller;
pub mod slot;
pub mod store;

pub use board::{NextDue, TimerBoard, TimerRecord, PLACEHOLDER_TIME};
pub use chime::{chime_plan, Chime};
pub use clock12::{
    advance_with_phase, format_clock_face, infer_next_phase, minutes_until_next, normalize_time12,
    to_minutes_of_day, Advanced, ClockTime, Phase,
};
pub use controller::TimerController;
pub use slot::TimerSlot;
pub use store::{JsonFileTimerStore, MemoryTimerStore, StoreError, TimerSnapshot, TimerStore};
