//! Graph validation logic.

use crate::error::GraphError;
use crate::graph::{Edge, Graph};

/// Validate the graph structure: node slots, code index, adjacency tables.
pub(crate) fn validate_graph(graph: &Graph) -> Result<(), GraphError> {
    let n = graph.nodes.len();

    for (position, node) in graph.nodes.iter().enumerate() {
        if node.id.idx() != position {
            return Err(GraphError::NodeIdMismatch {
                position,
                id: node.id,
            });
        }
    }

    if graph.index.len() != n {
        let code = graph
            .nodes
            .iter()
            .find(|node| graph.index.get(&node.code) != Some(node.id))
            .map(|node| node.code.clone())
            .unwrap_or_default();
        return Err(GraphError::IndexMismatch { code });
    }
    for (code, id) in graph.index.iter() {
        if graph.nodes.get(id.idx()).map(|node| node.code.as_str()) != Some(code) {
            return Err(GraphError::IndexMismatch {
                code: code.to_string(),
            });
        }
    }

    for (what, table) in [("directed", &graph.directed), ("undirected", &graph.undirected)] {
        if table.len() != n {
            return Err(GraphError::AdjacencyLength {
                what,
                len: table.len(),
                expected: n,
            });
        }
        for (owner, edges) in table.iter().enumerate() {
            for edge in edges {
                validate_edge(owner, edge, n)?;
            }
        }
    }

    // Every relation is mirrored, so the undirected table holds exactly two
    // entries per directed edge.
    let directed = graph.directed_edge_count();
    let undirected: usize = graph.undirected.iter().map(Vec::len).sum();
    if undirected != 2 * directed {
        return Err(GraphError::UnbalancedUndirected {
            directed,
            undirected,
        });
    }

    Ok(())
}

fn validate_edge(owner: usize, edge: &Edge, n: usize) -> Result<(), GraphError> {
    if edge.from.idx() != owner {
        return Err(GraphError::EdgeSourceMismatch {
            owner: rn_core::NodeId::from_usize(owner),
            from: edge.from,
        });
    }
    if edge.to.idx() >= n {
        return Err(GraphError::DanglingTarget {
            from: edge.from,
            to: edge.to,
        });
    }
    if !edge.weight_km.is_finite() || edge.weight_km < 0.0 {
        return Err(GraphError::InvalidWeight {
            from: edge.from,
            to: edge.to,
            weight: edge.weight_km,
        });
    }
    Ok(())
}
