//! Facility code indexing.
//!
//! Facility codes are strings chosen by whoever produced the rows; the
//! algorithms work on dense `NodeId`s. `FacilityIndex` is the one place that
//! translates between them.

use std::collections::HashMap;

use rn_core::NodeId;

/// Lookup from facility code to `NodeId`.
///
/// IDs are handed out in insertion order, so the n-th distinct code inserted
/// maps to index n. Re-inserting a known code returns the existing ID.
#[derive(Debug, Clone, Default)]
pub struct FacilityIndex {
    by_code: HashMap<String, NodeId>,
}

impl FacilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ID for `code`, allocating the next one if unseen.
    ///
    /// The boolean is true when a new ID was allocated.
    pub fn get_or_insert(&mut self, code: &str) -> (NodeId, bool) {
        if let Some(&id) = self.by_code.get(code) {
            return (id, false);
        }
        let id = NodeId::from_usize(self.by_code.len());
        self.by_code.insert(code.to_string(), id);
        (id, true)
    }

    pub fn get(&self, code: &str) -> Option<NodeId> {
        self.by_code.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.by_code.iter().map(|(code, &id)| (code.as_str(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_contiguous_in_insertion_order() {
        let mut index = FacilityIndex::new();
        let (a, new_a) = index.get_or_insert("A");
        let (b, _) = index.get_or_insert("B");
        let (c, _) = index.get_or_insert("C");
        assert!(new_a);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn reinsert_returns_existing() {
        let mut index = FacilityIndex::new();
        let (first, _) = index.get_or_insert("H-7");
        let (again, fresh) = index.get_or_insert("H-7");
        assert_eq!(first, again);
        assert!(!fresh);
        assert_eq!(index.len(), 1);
    }
}
