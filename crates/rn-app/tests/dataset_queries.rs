use std::path::PathBuf;

use rn_app::{
    AppError, FacilityFilter, RouteOutcome, RouteRequest, RouteTarget, Session, load_network,
};
use rn_core::LevelTier;

const ROWS_JSON: &str = r#"[
  {"id": "P1", "name": "Posta Ccorca", "region": "Cusco", "level": "I-1",
   "relations": "\"[{\"\"target_id\"\": \"\"C1\"\", \"\"weight_km\"\": 4}]\"",
   "services": "[\"triage\"]"},
  {"id": "C1", "name": "Centro Anta", "region": "Cusco", "level": "I-4",
   "latitude": "-13.47", "longitude": "-72.15",
   "relations": [{"target_id": "H1", "weight_km": 25}]},
  {"id": "H1", "name": "Hospital Regional", "region": "Cusco", "level": "III-1",
   "services": ["uci", "cirugia"]},
  {"id": 77, "level": "II-2", "region": "Apurimac",
   "relations": [{"target_id": "C1", "weight_km": "12.5"}]},
  {"id": "", "name": "blank"}
]"#;

const ROWS_YAML: &str = r#"
- id: A
  level: I-2
  relations:
    - target_id: B
      weight_km: 7
- id: B
  level: II-1
"#;

fn write_temp(name: &str, content: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("rn_app_dataset_queries");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn json_rows_build_and_route() {
    let path = write_temp("network.json", ROWS_JSON);
    let report = load_network(&path).unwrap();

    assert_eq!(report.rows_read, 5);
    assert_eq!(report.rows_skipped(), 1);
    assert_eq!(report.graph.node_count(), 4);
    assert_eq!(report.graph.directed_edge_count(), 3);
    assert!(report.graph.lookup("77").is_some());
    assert!(report.graph.check_invariants().is_ok());

    let request = RouteRequest {
        origin: "P1".into(),
        target: RouteTarget::Nearest(FacilityFilter {
            min_tier: LevelTier::III,
            service: Some("UCI".into()),
            region: None,
        }),
    };
    let RouteOutcome::Found(plan) = rn_app::plan_route(&report.graph, &request) else {
        panic!("expected a route");
    };
    assert_eq!(plan.codes, vec!["P1", "C1", "H1"]);
    assert!((plan.distance_km - 29.0).abs() < 1e-9);
    assert!(plan.origin_component.at_risk);
}

#[test]
fn session_loads_yaml_then_json() {
    let yaml = write_temp("small.yaml", ROWS_YAML);
    let json = write_temp("replace.json", ROWS_JSON);

    let mut session = Session::new();
    session.load_file(&yaml).unwrap();
    assert_eq!(session.graph().node_count(), 2);
    assert_eq!(session.source(), Some(yaml.as_path()));

    let request = RouteRequest {
        origin: "A".into(),
        target: RouteTarget::Facility("B".into()),
    };
    assert!(matches!(session.route(&request), RouteOutcome::Found(_)));

    session.load_file(&json).unwrap();
    assert_eq!(session.graph().node_count(), 4);
    assert!(matches!(
        session.route(&request),
        RouteOutcome::UnknownFacility(code) if code == "A"
    ));

    let backbone = session.backbone(false);
    assert_eq!(backbone.nodes_spanned, 4);
    assert!((backbone.total_weight_km - 41.5).abs() < 1e-9);

    let cusco = session.components(Some("cusco"));
    assert_eq!(cusco.len(), 1);
    assert_eq!(cusco[0].summary.size, 3);
}

#[test]
fn unreadable_or_malformed_files_fail_cleanly() {
    let missing = std::env::temp_dir().join("rn_app_dataset_queries/missing.json");
    assert!(matches!(
        load_network(&missing),
        Err(AppError::DatasetRead { .. })
    ));

    let not_rows = write_temp("object.json", r#"{"id": "A"}"#);
    assert!(matches!(load_network(&not_rows), Err(AppError::Json(_))));

    let unsupported = write_temp("rows.txt", "A,B");
    assert!(matches!(
        load_network(&unsupported),
        Err(AppError::UnsupportedFormat { .. })
    ));
}

#[test]
fn badly_typed_cells_do_not_sink_the_file() {
    let path = write_temp(
        "odd_cells.json",
        r#"[
          {"id": "A", "name": 5, "level": "I-1", "latitude": true,
           "relations": {"target_id": "B", "weight_km": 1}},
          {"id": "B", "region": 7, "level": "III-1"},
          "not a row"
        ]"#,
    );
    let report = load_network(&path).unwrap();

    assert_eq!(report.rows_read, 3);
    assert_eq!(report.rows_skipped(), 1);
    assert_eq!(report.graph.node_count(), 2);
    assert_eq!(report.graph.directed_edge_count(), 0);
    assert_eq!(report.graph.node_by_code("A").unwrap().name, "5");
    assert_eq!(
        report.graph.node_by_code("B").unwrap().region.as_deref(),
        Some("7")
    );

    let kinds: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(kinds.len(), 3);
    assert!(kinds[0].contains("latitude"));
    assert!(kinds[1].contains("is not a list"));
}
