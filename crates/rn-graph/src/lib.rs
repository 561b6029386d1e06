//! rn-graph: facility graph layer for refnet.
//!
//! Provides:
//! - Raw row records as handed over by the ingestion side
//! - A builder that normalises rows into facilities and weighted relations,
//!   collecting non-fatal diagnostics instead of failing
//! - The immutable `Graph` with directed and undirected adjacency
//! - Code -> id indexing, invariant checks and a content fingerprint
//!
//! # Example
//!
//! ```
//! use rn_graph::{build_graph, RawRow};
//!
//! let rows = vec![
//!     RawRow::facility("A", "I-1").with_relation("B", 5.0),
//!     RawRow::facility("B", "II-2"),
//! ];
//! let report = build_graph(&rows);
//! let graph = report.graph;
//!
//! assert_eq!(graph.node_count(), 2);
//! assert!(report.diagnostics.is_empty());
//! let a = graph.lookup("A").unwrap();
//! assert_eq!(graph.outgoing(a).len(), 1);
//! ```

pub mod builder;
pub mod diagnostics;
pub mod error;
mod fingerprint;
pub mod graph;
pub mod indexing;
pub mod row;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::{BuildReport, GraphBuilder, build_graph};
pub use diagnostics::{Diagnostic, DiagnosticKind, DropReason, ListFieldKind};
pub use error::GraphError;
pub use graph::{Edge, Graph, Node};
pub use indexing::FacilityIndex;
pub use row::{ListField, RawRow, Scalar};
