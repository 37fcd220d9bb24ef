//! Round-robin "extra sample" rotation over the active product list.
//!
//! This crate provides:
//! - [`RotationState`], the persisted cycle progress
//! - a pure picker ([`pick_next_extra`]) that takes state in and hands state out
//! - [`RotationScheduler`], which threads that state through a [`RotationStore`]
//! - availability and drag-reorder helpers used by callers between picks

pub mod availability;
pub mod order;
pub mod scheduler;
pub mod state;
pub mod store;

pub use availability::Availability;
pub use scheduler::{pick_next_extra, Pick, RotationScheduler};
pub use state::RotationState;
pub use store::{JsonFileRotationStore, MemoryRotationStore, RotationStore, StoreError};
