//! Active-list ordering helpers.

use std::collections::{HashMap, HashSet};

/// Collapse duplicate ids, keeping the first occurrence's position.
pub fn dedupe_ids(ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Move `dragged` into `target`'s slot, shifting the items in between.
///
/// Returns the order unchanged when either id is missing or they are the
/// same id.
pub fn move_item(order: &[String], dragged: &str, target: &str) -> Vec<String> {
    let mut next = order.to_vec();
    if dragged == target {
        return next;
    }
    let (Some(from), Some(to)) = (
        order.iter().position(|id| id == dragged),
        order.iter().position(|id| id == target),
    ) else {
        return next;
    };
    let item = next.remove(from);
    next.insert(to, item);
    next
}

/// Index of every id in `active`, for sorting other collections into the
/// same order.
pub(crate) fn positions(active: &[String]) -> HashMap<&str, usize> {
    active
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect()
}
