use std::sync::Mutex;

use super::{RotationStore, StoreError};
use crate::state::RotationState;

/// In-process store; the state is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryRotationStore {
    state: Mutex<RotationState>,
}

impl MemoryRotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: RotationState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Copy of whatever was last saved.
    pub fn snapshot(&self) -> RotationState {
        self.state.lock().expect("rotation store lock poisoned").clone()
    }
}

impl RotationStore for MemoryRotationStore {
    fn load(&self) -> Result<RotationState, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, state: &RotationState) -> Result<(), StoreError> {
        *self.state.lock().expect("rotation store lock poisoned") = state.clone();
        Ok(())
    }
}
