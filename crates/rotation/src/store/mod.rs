//! Persistence for [`RotationState`].

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::JsonFileRotationStore;
pub use memory::MemoryRotationStore;

use crate::state::RotationState;

/// Where rotation progress lives between picks.
///
/// Saves are best-effort from the scheduler's point of view: an `Err` is
/// logged and never changes the decision already made.
pub trait RotationStore: Send + Sync {
    fn load(&self) -> Result<RotationState, StoreError>;

    fn save(&self, state: &RotationState) -> Result<(), StoreError>;
}

impl<T: RotationStore + ?Sized> RotationStore for std::sync::Arc<T> {
    fn load(&self) -> Result<RotationState, StoreError> {
        (**self).load()
    }

    fn save(&self, state: &RotationState) -> Result<(), StoreError> {
        (**self).save(state)
    }
}
