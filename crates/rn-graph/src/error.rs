//! Graph-specific error types.

use rn_core::{NodeId, RnError};

/// Structural inconsistencies detected in a built graph.
///
/// The builder never produces these for any input; they exist so that
/// `Graph::check_invariants` can prove it.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A node sits at a slot that doesn't match its ID.
    NodeIdMismatch { position: usize, id: NodeId },

    /// The code index disagrees with the node table.
    IndexMismatch { code: String },

    /// An adjacency table doesn't have one entry list per node.
    AdjacencyLength {
        what: &'static str,
        len: usize,
        expected: usize,
    },

    /// An edge is stored under a node that isn't its source.
    EdgeSourceMismatch { owner: NodeId, from: NodeId },

    /// An edge points at a node that doesn't exist.
    DanglingTarget { from: NodeId, to: NodeId },

    /// An edge weight is negative or non-finite.
    InvalidWeight { from: NodeId, to: NodeId, weight: f64 },

    /// The undirected table isn't exactly the directed relations in both directions.
    UnbalancedUndirected { directed: usize, undirected: usize },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::NodeIdMismatch { position, id } => {
                write!(f, "Node at position {} carries id {}", position, id)
            }
            GraphError::IndexMismatch { code } => {
                write!(f, "Facility code {} is not indexed to its node", code)
            }
            GraphError::AdjacencyLength {
                what,
                len,
                expected,
            } => {
                write!(
                    f,
                    "{} adjacency has {} entries (expected {})",
                    what, len, expected
                )
            }
            GraphError::EdgeSourceMismatch { owner, from } => {
                write!(f, "Edge from {} is listed under node {}", from, owner)
            }
            GraphError::DanglingTarget { from, to } => {
                write!(f, "Edge {} -> {} targets a non-existent node", from, to)
            }
            GraphError::InvalidWeight { from, to, weight } => {
                write!(f, "Edge {} -> {} has invalid weight {}", from, to, weight)
            }
            GraphError::UnbalancedUndirected {
                directed,
                undirected,
            } => {
                write!(
                    f,
                    "{} directed relations but {} undirected entries (expected twice as many)",
                    directed, undirected
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

impl From<GraphError> for RnError {
    fn from(err: GraphError) -> Self {
        RnError::Invariant {
            what: err.to_string(),
        }
    }
}
