//! Core graph data structures.

use std::collections::{BTreeSet, HashSet};

use rn_core::{LevelTier, NodeId, Real, RnResult};

use crate::indexing::FacilityIndex;
use crate::validate;

/// A healthcare facility.
///
/// Placeholders are facilities that so far have only been seen as the target
/// of a relation: their name is the code and everything else is absent until
/// (and unless) their own row shows up.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    /// External facility identifier, unique per graph.
    pub code: String,
    pub name: String,
    /// Raw level text, e.g. "II-1".
    pub level: Option<String>,
    pub tier: Option<LevelTier>,
    pub region: Option<String>,
    pub facility_type: Option<String>,
    pub latitude: Option<Real>,
    pub longitude: Option<Real>,
    pub services: BTreeSet<String>,
    pub placeholder: bool,
}

impl Node {
    pub(crate) fn placeholder(id: NodeId, code: &str) -> Self {
        Self {
            id,
            code: code.to_string(),
            name: code.to_string(),
            level: None,
            tier: None,
            region: None,
            facility_type: None,
            latitude: None,
            longitude: None,
            services: BTreeSet::new(),
            placeholder: true,
        }
    }

    /// `(latitude, longitude)` when both are known.
    pub fn position(&self) -> Option<(Real, Real)> {
        Some((self.latitude?, self.longitude?))
    }

    /// Case-insensitive service membership.
    pub fn offers(&self, service: &str) -> bool {
        let wanted = service.trim();
        self.services
            .iter()
            .any(|s| s.trim().eq_ignore_ascii_case(wanted))
    }

    /// Case-insensitive region match; facilities without a region never match.
    pub fn in_region(&self, region: &str) -> bool {
        self.region
            .as_deref()
            .is_some_and(|r| r.trim().eq_ignore_ascii_case(region.trim()))
    }
}

/// A weighted relation between two facilities, in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight_km: Real,
}

/// The graph: an immutable set of facilities plus two adjacency views.
///
/// - `directed`: for each node, the relations it declared, in row order.
/// - `undirected`: every declared relation inserted in both directions. Two
///   facilities declaring the same relation produce parallel entries; the
///   algorithms tolerate that, so nothing is deduplicated.
///
/// Node IDs are dense and follow first-encounter order, so every per-node
/// table is a plain vector indexed by `NodeId::idx`.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) index: FacilityIndex,
    pub(crate) directed: Vec<Vec<Edge>>,
    pub(crate) undirected: Vec<Vec<Edge>>,
}

impl Graph {
    /// Return all nodes in first-encounter order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.idx())
    }

    /// Resolve a facility code.
    pub fn lookup(&self, code: &str) -> Option<NodeId> {
        self.index.get(code.trim())
    }

    pub fn node_by_code(&self, code: &str) -> Option<&Node> {
        self.lookup(code).and_then(|id| self.node(id))
    }

    /// Facility code for an ID, or an empty string for a foreign ID.
    pub fn code(&self, id: NodeId) -> &str {
        self.node(id).map_or("", |n| n.code.as_str())
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn index(&self) -> &FacilityIndex {
        &self.index
    }

    /// Outgoing relations as declared.
    pub fn outgoing(&self, id: NodeId) -> &[Edge] {
        self.directed.get(id.idx()).map_or(&[], Vec::as_slice)
    }

    /// Relations touching a node in either direction.
    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        self.undirected.get(id.idx()).map_or(&[], Vec::as_slice)
    }

    pub fn directed_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.directed.iter().flatten()
    }

    pub fn undirected_entries(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.undirected.iter().flatten()
    }

    pub fn directed_edge_count(&self) -> usize {
        self.directed.iter().map(Vec::len).sum()
    }

    /// IDs of every facility in a region (case-insensitive).
    pub fn nodes_in_region(&self, region: &str) -> HashSet<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.in_region(region))
            .map(|n| n.id)
            .collect()
    }

    /// Distinct non-empty regions, sorted.
    pub fn regions(&self) -> BTreeSet<String> {
        self.nodes
            .iter()
            .filter_map(|n| n.region.clone())
            .collect()
    }

    /// Re-check the structural invariants the builder guarantees.
    pub fn check_invariants(&self) -> RnResult<()> {
        validate::validate_graph(self)?;
        Ok(())
    }
}
