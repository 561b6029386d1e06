//! Integration tests for rn-graph.

use rn_core::LevelTier;
use rn_graph::{DiagnosticKind, ListFieldKind, RawRow, build_graph};

fn edge_multiset(graph: &rn_graph::Graph, undirected: bool) -> Vec<(String, String, u64)> {
    let edges: Vec<_> = if undirected {
        graph.undirected_entries().collect()
    } else {
        graph.directed_edges().collect()
    };
    let mut out: Vec<_> = edges
        .into_iter()
        .map(|e| {
            (
                graph.code(e.from).to_string(),
                graph.code(e.to).to_string(),
                e.weight_km.to_bits(),
            )
        })
        .collect();
    out.sort();
    out
}

#[test]
fn build_minimal_graph() {
    // A -(5)-> B
    let rows = vec![
        RawRow::facility("A", "I-1").with_relation("B", 5.0),
        RawRow::facility("B", "II-1"),
    ];
    let report = build_graph(&rows);
    let graph = &report.graph;

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.directed_edge_count(), 1);
    assert!(report.diagnostics.is_empty());

    let a = graph.lookup("A").unwrap();
    let b = graph.lookup("B").unwrap();
    assert_eq!(graph.outgoing(a).len(), 1);
    assert!(graph.outgoing(b).is_empty());
    assert_eq!(graph.neighbors(a).len(), 1);
    assert_eq!(graph.neighbors(b).len(), 1);
    assert_eq!(graph.neighbors(b)[0].to, a);
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn chain_with_tiers() {
    let rows = vec![
        RawRow::facility("A", "I-1").with_relation("B", 5.0),
        RawRow::facility("B", "II-2").with_relation("C", 3.0),
        RawRow::facility("C", "III-1"),
    ];
    let graph = build_graph(&rows).graph;

    let tiers: Vec<_> = graph.nodes().iter().map(|n| n.tier).collect();
    assert_eq!(
        tiers,
        vec![Some(LevelTier::I), Some(LevelTier::II), Some(LevelTier::III)]
    );
    // B: one mirrored entry from A, one own relation to C.
    assert_eq!(graph.neighbors(graph.lookup("B").unwrap()).len(), 2);
}

#[test]
fn invalid_json_relations_produce_no_edges() {
    let rows = vec![RawRow::facility("A", "I-1").with_relations_text("not valid json")];
    let report = build_graph(&rows);

    assert_eq!(report.graph.node_count(), 1);
    assert_eq!(report.graph.directed_edge_count(), 0);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(matches!(
        &report.diagnostics[0].kind,
        DiagnosticKind::MalformedList {
            field: ListFieldKind::Relations,
            ..
        }
    ));
    assert_eq!(report.diagnostics[0].row, 1);
}

#[test]
fn every_target_exists_in_both_adjacencies() {
    let rows = vec![
        RawRow::facility("A", "I-1")
            .with_relation("X", 1.0)
            .with_relation("Y", 2.0),
        RawRow::facility("B", "I-1").with_relation("X", 4.0),
    ];
    let graph = build_graph(&rows).graph;

    for code in ["X", "Y"] {
        let node = graph.node_by_code(code).unwrap();
        assert!(node.placeholder);
        assert!(graph.outgoing(node.id).is_empty());
        assert!(!graph.neighbors(node.id).is_empty());
    }
    assert!(graph.check_invariants().is_ok());
}

#[test]
fn mutual_declarations_keep_parallel_entries() {
    let rows = vec![
        RawRow::facility("A", "I-1").with_relation("B", 5.0),
        RawRow::facility("B", "II-1").with_relation("A", 5.0),
    ];
    let graph = build_graph(&rows).graph;

    let a = graph.lookup("A").unwrap();
    assert_eq!(graph.neighbors(a).len(), 2);
    assert_eq!(graph.undirected_entries().count(), 4);
}

#[test]
fn rebuilding_is_idempotent() {
    let rows = vec![
        RawRow::facility("A", "I-1")
            .with_relation("B", 5.0)
            .with_relation("C", 9.5),
        RawRow::facility("B", "II-1").with_relation("C", 3.0),
        RawRow::facility("C", "III-1")
            .with_region("Cusco")
            .with_services(&["UCI"]),
        RawRow::facility("D", "I-2").with_relations_text("[oops"),
    ];
    let first = build_graph(&rows);
    let second = build_graph(&rows);

    let codes = |g: &rn_graph::Graph| {
        let mut c: Vec<_> = g.nodes().iter().map(|n| n.code.clone()).collect();
        c.sort();
        c
    };
    assert_eq!(codes(&first.graph), codes(&second.graph));
    assert_eq!(
        edge_multiset(&first.graph, false),
        edge_multiset(&second.graph, false)
    );
    assert_eq!(
        edge_multiset(&first.graph, true),
        edge_multiset(&second.graph, true)
    );
    assert_eq!(first.diagnostics, second.diagnostics);
    assert_eq!(first.graph.fingerprint(), second.graph.fingerprint());
}

#[test]
fn rows_from_yaml() {
    let yaml = r#"
- id: P-01
  name: Puesto Ayaviri
  region: Puno
  level: I-1
  type: Puesto
  lat: -14.88
  lon: -70.59
  relations: '[{"target_id": "H-02", "weight_km": 130.2}]'
  services: []
- id: H-02
  name: Hospital Juliaca
  region: Puno
  level: II-2
  relations:
    - target_id: P-01
      weight_km: 130.2
  services: [Emergencia, Cirugia]
"#;
    let rows: Vec<RawRow> = serde_yaml::from_str(yaml).unwrap();
    let report = build_graph(&rows);
    let graph = &report.graph;

    assert!(report.diagnostics.is_empty());
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.directed_edge_count(), 2);
    let hospital = graph.node_by_code("H-02").unwrap();
    assert!(hospital.offers("cirugia"));
    assert_eq!(graph.node_by_code("P-01").unwrap().position(), Some((-14.88, -70.59)));
    assert_eq!(graph.nodes_in_region("PUNO").len(), 2);
}

#[test]
fn empty_input() {
    let report = build_graph(&Vec::<RawRow>::new());
    assert!(report.graph.is_empty());
    assert_eq!(report.rows_read, 0);
    assert!(report.graph.check_invariants().is_ok());
}

#[test]
fn large_graph() {
    let rows: Vec<RawRow> = (0..200)
        .map(|i| {
            let row = RawRow::facility(&format!("N{}", i), "I-1");
            if i + 1 < 200 {
                row.with_relation(&format!("N{}", i + 1), 1.0 + i as f64)
            } else {
                row
            }
        })
        .collect();
    let graph = build_graph(&rows).graph;

    assert_eq!(graph.node_count(), 200);
    assert_eq!(graph.directed_edge_count(), 199);
    for (i, node) in graph.nodes().iter().take(10).enumerate() {
        assert_eq!(node.id.idx(), i);
        assert_eq!(graph.lookup(&node.code), Some(node.id));
    }
    assert!(graph.check_invariants().is_ok());
}
