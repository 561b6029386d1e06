//! Connected components of the undirected view.

use std::collections::HashSet;

use tracing::debug;

use rn_core::NodeId;
use rn_graph::Graph;

/// Node IDs of one component, in discovery order.
pub type Component = Vec<NodeId>;

/// All components of the graph.
pub fn connected_components(graph: &Graph) -> Vec<Component> {
    collect(graph, |_| true)
}

/// Components of the subgraph induced by `subset`.
///
/// Neighbours outside the subset are not followed, so two subset nodes that
/// are only linked through an outside node land in different components.
/// IDs in `subset` that the graph doesn't know are ignored.
pub fn connected_components_within(graph: &Graph, subset: &HashSet<NodeId>) -> Vec<Component> {
    collect(graph, |id| subset.contains(&id))
}

/// The component that contains `node`, or `None` for a foreign ID.
pub fn component_containing(graph: &Graph, node: NodeId) -> Option<Component> {
    if node.idx() >= graph.node_count() {
        return None;
    }
    let mut visited = vec![false; graph.node_count()];
    Some(explore(graph, node, &mut visited, &|_: NodeId| true))
}

fn collect(graph: &Graph, in_scope: impl Fn(NodeId) -> bool) -> Vec<Component> {
    let mut visited = vec![false; graph.node_count()];
    let mut components = Vec::new();
    for seed in graph.node_ids() {
        if visited[seed.idx()] || !in_scope(seed) {
            continue;
        }
        components.push(explore(graph, seed, &mut visited, &in_scope));
    }
    debug!(components = components.len(), "connected components computed");
    components
}

/// Iterative depth-first walk from `seed` through in-scope neighbours.
fn explore(
    graph: &Graph,
    seed: NodeId,
    visited: &mut [bool],
    in_scope: &impl Fn(NodeId) -> bool,
) -> Component {
    let mut component = Vec::new();
    let mut stack = vec![seed];
    visited[seed.idx()] = true;
    while let Some(u) = stack.pop() {
        component.push(u);
        for edge in graph.neighbors(u) {
            let v = edge.to;
            if !visited[v.idx()] && in_scope(v) {
                visited[v.idx()] = true;
                stack.push(v);
            }
        }
    }
    component
}
