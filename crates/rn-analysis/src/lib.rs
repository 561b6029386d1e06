//! rn-analysis: graph algorithms over a built facility network.
//!
//! Every operation takes the graph explicitly and never fails: unknown
//! facilities, missing paths and empty graphs are ordinary return values.
//!
//! - `shortest_path`: Dijkstra over declared (directed) relations
//! - `mst`: Prim over the undirected view
//! - `components`: connected components, optionally on an induced subgraph
//! - `classify`: component statistics and isolation labels

pub mod classify;
pub mod components;
mod frontier;
pub mod mst;
pub mod shortest_path;

pub use classify::{ComponentLabel, ComponentSummary, LevelCounts, MICRO_COMPONENT_MAX, classify};
pub use components::{
    Component, component_containing, connected_components, connected_components_within,
};
pub use mst::{
    SpanningForest, TreeEdge, full_spanning_forest, minimum_spanning_forest,
    minimum_spanning_tree_from,
};
pub use shortest_path::{
    ShortestPaths, nearest_matching, reconstruct_path, shortest_paths, shortest_paths_from,
};
