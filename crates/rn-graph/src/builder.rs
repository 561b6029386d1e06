//! Graph builder: raw rows in, validated facilities and adjacency out.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::{debug, warn};

use rn_core::{LevelTier, NodeId, Real};

use crate::diagnostics::{Diagnostic, DiagnosticKind, DropReason, ListFieldKind};
use crate::graph::{Edge, Graph, Node};
use crate::indexing::FacilityIndex;
use crate::row::{ListDecodeError, ListField, RawRow, Scalar};

/// Output of one build: the graph plus whatever was skipped or repaired.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub graph: Graph,
    pub diagnostics: Vec<Diagnostic>,
    pub rows_read: usize,
}

impl BuildReport {
    /// Rows dropped entirely (no id).
    pub fn rows_skipped(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.skipped_row()).count()
    }
}

/// Build a graph from rows in one go.
pub fn build_graph<'a>(rows: impl IntoIterator<Item = &'a RawRow>) -> BuildReport {
    let mut builder = GraphBuilder::new();
    for row in rows {
        builder.ingest(row);
    }
    builder.build()
}

/// Builder for constructing a graph row by row.
///
/// Feed rows with `ingest` in input order, then call `build()` to freeze the
/// result. Nothing a row contains can make the build fail: bad cells degrade
/// to absent values or empty lists and are recorded as diagnostics.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    index: FacilityIndex,
    directed: Vec<Vec<Edge>>,
    undirected: Vec<Vec<Edge>>,
    diagnostics: Vec<Diagnostic>,
    rows_read: usize,
}

struct Relation {
    target: String,
    weight_km: Option<Real>,
}

impl GraphBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one row.
    pub fn ingest(&mut self, row: &RawRow) {
        self.rows_read += 1;
        let row_no = self.rows_read;

        let code = row.id.as_ref().map(Scalar::to_text).unwrap_or_default();
        if code.is_empty() {
            self.report(row_no, None, DiagnosticKind::MissingId);
            return;
        }

        let latitude = self.coordinate(row_no, &code, "latitude", row.latitude.as_ref());
        let longitude = self.coordinate(row_no, &code, "longitude", row.longitude.as_ref());
        let relations = self.decode_list(row_no, &code, ListFieldKind::Relations, &row.relations);
        let services = self.decode_list(row_no, &code, ListFieldKind::Services, &row.services);

        let id = self.ensure_node(&code);
        let node = &mut self.nodes[id.idx()];
        node.name = text_cell(row.name.as_ref()).unwrap_or_else(|| code.clone());
        node.level = text_cell(row.level.as_ref());
        node.tier = node.level.as_deref().and_then(LevelTier::classify);
        node.region = text_cell(row.region.as_ref());
        node.facility_type = text_cell(row.facility_type.as_ref());
        node.latitude = latitude;
        node.longitude = longitude;
        node.services = services_from(&services);
        node.placeholder = false;

        for relation in relations.iter().map(relation_from) {
            self.add_relation(row_no, &code, id, relation);
        }
    }

    /// Freeze into an immutable graph.
    pub fn build(self) -> BuildReport {
        debug!(
            rows = self.rows_read,
            nodes = self.nodes.len(),
            diagnostics = self.diagnostics.len(),
            "graph built"
        );
        BuildReport {
            graph: Graph {
                nodes: self.nodes,
                index: self.index,
                directed: self.directed,
                undirected: self.undirected,
            },
            diagnostics: self.diagnostics,
            rows_read: self.rows_read,
        }
    }

    /// Look up a facility, creating a placeholder with empty adjacency if unseen.
    fn ensure_node(&mut self, code: &str) -> NodeId {
        let (id, fresh) = self.index.get_or_insert(code);
        if fresh {
            self.nodes.push(Node::placeholder(id, code));
            self.directed.push(Vec::new());
            self.undirected.push(Vec::new());
        }
        id
    }

    fn add_relation(&mut self, row_no: usize, code: &str, from: NodeId, relation: Relation) {
        let weight_km = match relation.weight_km {
            _ if relation.target.is_empty() => Err(DropReason::EmptyTarget),
            None => Err(DropReason::NonFiniteWeight),
            Some(w) if w < 0.0 => Err(DropReason::NegativeWeight),
            Some(w) => Ok(w),
        };
        let weight_km = match weight_km {
            Ok(w) => w,
            Err(reason) => {
                self.report(
                    row_no,
                    Some(code),
                    DiagnosticKind::DroppedRelation {
                        target: relation.target,
                        reason,
                    },
                );
                return;
            }
        };

        let to = self.ensure_node(&relation.target);
        let edge = Edge {
            from,
            to,
            weight_km,
        };
        self.directed[from.idx()].push(edge);
        self.undirected[from.idx()].push(edge);
        self.undirected[to.idx()].push(Edge {
            from: to,
            to: from,
            weight_km,
        });
    }

    fn coordinate(
        &mut self,
        row_no: usize,
        code: &str,
        field: &'static str,
        cell: Option<&Scalar>,
    ) -> Option<Real> {
        let cell = cell?;
        let value = cell.to_finite();
        if value.is_none() && !cell.is_blank() {
            self.report(
                row_no,
                Some(code),
                DiagnosticKind::InvalidCoordinate {
                    field,
                    raw: cell.raw(),
                },
            );
        }
        value
    }

    fn decode_list(
        &mut self,
        row_no: usize,
        code: &str,
        field: ListFieldKind,
        cell: &Option<ListField>,
    ) -> Vec<Value> {
        let Some(cell) = cell else {
            return Vec::new();
        };
        match cell.decode() {
            Ok(items) => items,
            Err(ListDecodeError::Malformed { text }) => {
                self.report(row_no, Some(code), DiagnosticKind::MalformedList { field, text });
                Vec::new()
            }
            Err(ListDecodeError::NotAList) => {
                self.report(row_no, Some(code), DiagnosticKind::NotAList { field });
                Vec::new()
            }
        }
    }

    fn report(&mut self, row: usize, facility: Option<&str>, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            row,
            facility: facility.map(str::to_string),
            kind,
        };
        match diagnostic.kind {
            DiagnosticKind::MalformedList { .. } | DiagnosticKind::NotAList { .. } => {
                warn!("{}", diagnostic)
            }
            _ => debug!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }
}

fn text_cell(cell: Option<&Scalar>) -> Option<String> {
    cell.map(Scalar::to_text).filter(|s| !s.is_empty())
}

fn relation_from(item: &Value) -> Relation {
    let field = |key: &str| item.get(key).map(Scalar::from);
    Relation {
        target: field("target_id").map(|s| s.to_text()).unwrap_or_default(),
        weight_km: field("weight_km").and_then(|s| s.to_finite()),
    }
}

fn services_from(items: &[Value]) -> BTreeSet<String> {
    items
        .iter()
        .filter_map(|item| text_cell(Some(&Scalar::from(item))))
        .collect()
}
