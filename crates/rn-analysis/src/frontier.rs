//! Min-priority frontier shared by Dijkstra and Prim.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rn_core::{NodeId, Real};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Entry {
    cost: Real,
    node: NodeId,
}

impl Eq for Entry {}

impl Ord for Entry {
    // Reversed so the std max-heap pops the smallest cost; equal costs pop
    // the lower node index first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lazy-deletion priority queue: stale entries are left in place and the
/// caller skips them when popped.
#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<Entry>,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, node: NodeId, cost: Real) {
        self.heap.push(Entry { cost, node });
    }

    pub(crate) fn pop(&mut self) -> Option<(NodeId, Real)> {
        self.heap.pop().map(|e| (e.node, e.cost))
    }
}
