//! Persisted cycle progress for the extra-sample rotation.

use std::collections::VecDeque;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Progress through the current rotation cycle.
///
/// Every id in `pending` and `completed` is expected to be active; the
/// picker prunes stale entries on each call rather than trusting this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RotationState {
    /// Ids still owed a turn this cycle, front first.
    #[serde(default)]
    pub pending: VecDeque<String>,
    /// Ids already picked this cycle, in pick order.
    #[serde(default)]
    pub completed: IndexSet<String>,
    /// Active ids (membership and order) as of the last state update.
    #[serde(default)]
    pub last_active_snapshot: Vec<String>,
}

impl RotationState {
    /// A state with no progress whose snapshot already matches `active`,
    /// so none of its ids count as newly added.
    pub fn settled(active: &[String]) -> Self {
        Self {
            last_active_snapshot: active.to_vec(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty() && self.last_active_snapshot.is_empty()
    }

    /// The most recently picked id, if any.
    pub fn last_completed(&self) -> Option<&str> {
        self.completed.last().map(String::as_str)
    }

    /// Build a state from loosely-typed JSON.
    ///
    /// Fields that are missing or not arrays become empty; non-string
    /// elements are skipped. Anything that is not an object yields the
    /// default state.
    pub fn from_value(value: &Value) -> Self {
        let strings = |key: &str| -> Vec<String> {
            value
                .get(key)
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };
        Self {
            pending: strings("pending").into(),
            completed: strings("completed").into_iter().collect(),
            last_active_snapshot: strings("lastActiveSnapshot"),
        }
    }
}
