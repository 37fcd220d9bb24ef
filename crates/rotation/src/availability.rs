//! Per-product availability flags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Product id → available flag. Ids that are absent count as available.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability(BTreeMap<String, bool>);

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor: every listed id marked unavailable.
    pub fn unavailable<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(|id| (id.into(), false)).collect())
    }

    /// `false` only when the id is explicitly marked unavailable.
    pub fn is_available(&self, id: &str) -> bool {
        self.0.get(id).copied() != Some(false)
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.0.get(id).copied()
    }

    pub fn set(&mut self, id: impl Into<String>, available: bool) {
        self.0.insert(id.into(), available);
    }

    /// Apply a (typically single-entry) change feed patch.
    pub fn merge(&mut self, patch: &Availability) {
        for (id, available) in &patch.0 {
            self.0.insert(id.clone(), *available);
        }
    }

    /// Default every active id to available and drop ids that are no
    /// longer active. Returns whether anything changed.
    pub fn reconcile(&mut self, active: &[String]) -> bool {
        let mut changed = false;
        for id in active {
            if !self.0.contains_key(id) {
                self.0.insert(id.clone(), true);
                changed = true;
            }
        }
        let before = self.0.len();
        self.0.retain(|id, _| active.contains(id));
        changed || self.0.len() != before
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(id, available)| (id.as_str(), *available))
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for Availability {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, a)| (id.into(), a)).collect())
    }
}
