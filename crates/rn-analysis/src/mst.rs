//! Minimum spanning tree over the undirected view (Prim).

use tracing::debug;

use rn_core::{NodeId, Real};
use rn_graph::Graph;

use crate::frontier::Frontier;

/// A tree edge, oriented from the node already in the tree to the one it pulled in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEdge {
    pub parent: NodeId,
    pub child: NodeId,
    pub weight_km: Real,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanningForest {
    /// Edges in the order Prim added them.
    pub edges: Vec<TreeEdge>,
    pub total_weight_km: Real,
    /// Nodes included, tree roots counted.
    pub nodes_spanned: usize,
}

/// Prim from the first node in graph order.
///
/// Only the start's component is spanned; nodes of other components are
/// silently absent from the result. An empty graph yields an empty result.
pub fn minimum_spanning_forest(graph: &Graph) -> SpanningForest {
    match graph.node_ids().next() {
        Some(start) => minimum_spanning_tree_from(graph, start),
        None => SpanningForest::default(),
    }
}

/// Prim from an explicit start node; a foreign start yields an empty result.
pub fn minimum_spanning_tree_from(graph: &Graph, start: NodeId) -> SpanningForest {
    let mut prim = Prim::new(graph.node_count());
    let mut forest = SpanningForest::default();
    if start.idx() < graph.node_count() {
        prim.grow(graph, start, &mut forest);
    }
    debug!(
        edges = forest.edges.len(),
        total_km = forest.total_weight_km,
        "spanning tree computed"
    );
    forest
}

/// Prim restarted at every node not yet covered, spanning every component.
pub fn full_spanning_forest(graph: &Graph) -> SpanningForest {
    let mut prim = Prim::new(graph.node_count());
    let mut forest = SpanningForest::default();
    let mut trees = 0usize;
    for root in graph.node_ids() {
        if !prim.in_tree[root.idx()] {
            prim.grow(graph, root, &mut forest);
            trees += 1;
        }
    }
    debug!(
        trees,
        edges = forest.edges.len(),
        total_km = forest.total_weight_km,
        "spanning forest computed"
    );
    forest
}

struct Prim {
    key: Vec<Real>,
    parent: Vec<Option<NodeId>>,
    in_tree: Vec<bool>,
}

impl Prim {
    fn new(n: usize) -> Self {
        Self {
            key: vec![Real::INFINITY; n],
            parent: vec![None; n],
            in_tree: vec![false; n],
        }
    }

    /// Grow one tree from `root`, appending its edges to `forest`.
    fn grow(&mut self, graph: &Graph, root: NodeId, forest: &mut SpanningForest) {
        let mut frontier = Frontier::new();
        self.key[root.idx()] = 0.0;
        frontier.push(root, 0.0);

        while let Some((u, key_u)) = frontier.pop() {
            if self.in_tree[u.idx()] || key_u > self.key[u.idx()] {
                continue;
            }
            self.in_tree[u.idx()] = true;
            forest.nodes_spanned += 1;
            if let Some(parent) = self.parent[u.idx()] {
                forest.edges.push(TreeEdge {
                    parent,
                    child: u,
                    weight_km: key_u,
                });
                forest.total_weight_km += key_u;
            }

            for edge in graph.neighbors(u) {
                let v = edge.to;
                if !self.in_tree[v.idx()] && edge.weight_km < self.key[v.idx()] {
                    self.key[v.idx()] = edge.weight_km;
                    self.parent[v.idx()] = Some(u);
                    frontier.push(v, edge.weight_km);
                }
            }
        }
    }
}
