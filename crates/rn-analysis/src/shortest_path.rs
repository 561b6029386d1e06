//! Single-source shortest paths over declared relations.

use tracing::debug;

use rn_core::{NodeId, Real};
use rn_graph::{Graph, Node};

use crate::frontier::Frontier;

/// Distances and predecessor links from one start facility.
///
/// Tables cover every node of the graph the run was computed on. Unreached
/// nodes keep an infinite distance and no predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    /// `None` when the requested start was not part of the graph.
    pub start: Option<NodeId>,
    distances: Vec<Real>,
    predecessors: Vec<Option<NodeId>>,
}

impl ShortestPaths {
    fn unreached(n: usize) -> Self {
        Self {
            start: None,
            distances: vec![Real::INFINITY; n],
            predecessors: vec![None; n],
        }
    }

    /// Distance in km, infinite when unreachable or unknown.
    pub fn distance(&self, id: NodeId) -> Real {
        self.distances.get(id.idx()).copied().unwrap_or(Real::INFINITY)
    }

    pub fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.predecessors.get(id.idx()).copied().flatten()
    }

    pub fn is_reachable(&self, id: NodeId) -> bool {
        self.distance(id).is_finite()
    }

    pub fn distances(&self) -> &[Real] {
        &self.distances
    }

    pub fn predecessors(&self) -> &[Option<NodeId>] {
        &self.predecessors
    }

    /// Route from the start to `end`, if one was found.
    pub fn path_to(&self, end: NodeId) -> Option<Vec<NodeId>> {
        reconstruct_path(&self.predecessors, self.start?, end)
    }
}

/// Dijkstra from `start` over the directed adjacency.
///
/// A start outside the graph yields all-infinite distances.
pub fn shortest_paths(graph: &Graph, start: NodeId) -> ShortestPaths {
    let n = graph.node_count();
    let mut paths = ShortestPaths::unreached(n);
    if start.idx() >= n {
        return paths;
    }
    paths.start = Some(start);

    let mut settled = vec![false; n];
    let mut frontier = Frontier::new();
    paths.distances[start.idx()] = 0.0;
    frontier.push(start, 0.0);

    let mut settled_count = 0usize;
    while let Some((u, dist_u)) = frontier.pop() {
        if settled[u.idx()] || dist_u > paths.distances[u.idx()] {
            continue;
        }
        settled[u.idx()] = true;
        settled_count += 1;

        for edge in graph.outgoing(u) {
            let v = edge.to;
            let alt = dist_u + edge.weight_km;
            if alt < paths.distances[v.idx()] {
                paths.distances[v.idx()] = alt;
                paths.predecessors[v.idx()] = Some(u);
                frontier.push(v, alt);
            }
        }
    }

    debug!(start = graph.code(start), settled = settled_count, "shortest paths computed");
    paths
}

/// Dijkstra from a facility code; unknown codes yield all-infinite distances.
pub fn shortest_paths_from(graph: &Graph, code: &str) -> ShortestPaths {
    match graph.lookup(code) {
        Some(start) => shortest_paths(graph, start),
        None => ShortestPaths::unreached(graph.node_count()),
    }
}

/// Walk predecessor links back from `end` to `start`.
///
/// Returns the route `start..=end`, or `None` when the walk never reaches
/// `start`. `end == start` is the single-node route.
pub fn reconstruct_path(
    predecessors: &[Option<NodeId>],
    start: NodeId,
    end: NodeId,
) -> Option<Vec<NodeId>> {
    let n = predecessors.len();
    if start.idx() >= n || end.idx() >= n {
        return None;
    }

    let mut path = vec![end];
    let mut current = end;
    while current != start {
        current = predecessors[current.idx()]?;
        path.push(current);
        // A well-formed predecessor chain visits each node at most once.
        if path.len() > n {
            return None;
        }
    }
    path.reverse();
    Some(path)
}

/// The closest reachable node satisfying `predicate`.
///
/// Ties keep the first node in graph order. `None` when no matching node has
/// a finite distance.
pub fn nearest_matching(
    graph: &Graph,
    paths: &ShortestPaths,
    predicate: impl Fn(&Node) -> bool,
) -> Option<NodeId> {
    let mut best: Option<(NodeId, Real)> = None;
    for node in graph.nodes() {
        let d = paths.distance(node.id);
        if !d.is_finite() || !predicate(node) {
            continue;
        }
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((node.id, d));
        }
    }
    best.map(|(id, _)| id)
}
