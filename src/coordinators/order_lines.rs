use std::collections::HashSet;
use crate::errors::internal::OrderError;

/// Reject empty product lists and repeated product ids
pub fn ensure_valid_selection(pids: &[i64]) -> Result<(), OrderError> {
    if pids.is_empty() {
        return Err(OrderError::EmptyProducts);
    }

    let mut seen = HashSet::with_capacity(pids.len());
    for &pid in pids {
        if !seen.insert(pid) {
            return Err(OrderError::DuplicateProduct { pid });
        }
    }
    Ok(())
}

/// Lines to remove and lines to add when moving an order from `old` to `new`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    pub to_delete: Vec<i64>,
    pub to_insert: Vec<i64>,
}

impl LineDiff {
    /// Set difference in both directions, keeping the input order of each side
    pub fn between(old: &[i64], new: &[i64]) -> Self {
        let old_set: HashSet<i64> = old.iter().copied().collect();
        let new_set: HashSet<i64> = new.iter().copied().collect();

        Self {
            to_delete: old.iter().copied().filter(|pid| !new_set.contains(pid)).collect(),
            to_insert: new.iter().copied().filter(|pid| !old_set.contains(pid)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_delete.is_empty() && self.to_insert.is_empty()
    }
}
