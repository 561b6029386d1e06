//! Property tests: brute force and petgraph as oracles.

use std::collections::HashSet;

use petgraph::algo::min_spanning_tree;
use petgraph::data::Element;
use petgraph::graph::{NodeIndex, UnGraph};
use proptest::prelude::*;

use rn_analysis::{
    connected_components, full_spanning_forest, minimum_spanning_tree_from, shortest_paths,
};
use rn_core::{NodeId, Tolerances, nearly_equal};
use rn_graph::{Graph, RawRow, build_graph};

const LEVELS: [&str; 3] = ["I-1", "II-1", "III-1"];

type Spec = (usize, Vec<(usize, usize, u8)>, Vec<usize>);

/// Random small network: node count, directed relations, level per node.
fn network() -> impl Strategy<Value = Spec> {
    (1usize..9).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n, 0u8..30), 0..24),
            prop::collection::vec(0usize..3, n),
        )
    })
}

/// Random connected network: a random spanning tree plus extra relations.
fn connected_network() -> impl Strategy<Value = Spec> {
    (2usize..9).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0usize..1000, 1u8..30), n - 1),
            prop::collection::vec((0..n, 0..n, 0u8..30), 0..16),
            prop::collection::vec(0usize..3, n),
        )
            .prop_map(|(n, tree, extra, levels)| {
                let mut edges: Vec<(usize, usize, u8)> = tree
                    .into_iter()
                    .enumerate()
                    .map(|(i, (pick, w))| (pick % (i + 1), i + 1, w))
                    .collect();
                edges.extend(extra);
                (n, edges, levels)
            })
    })
}

fn code(i: usize) -> String {
    format!("N{}", i)
}

fn build((n, edges, levels): &Spec) -> Graph {
    let rows: Vec<RawRow> = (0..*n)
        .map(|i| {
            edges
                .iter()
                .filter(|(from, _, _)| *from == i)
                .fold(RawRow::facility(&code(i), LEVELS[levels[i]]), |row, (_, to, w)| {
                    row.with_relation(&code(*to), f64::from(*w))
                })
        })
        .collect();
    build_graph(&rows).graph
}

fn id(graph: &Graph, i: usize) -> NodeId {
    graph.lookup(&code(i)).expect("every node has a row")
}

/// All-pairs shortest distances by Floyd-Warshall, indexed by row number.
fn floyd_warshall(n: usize, edges: &[(usize, usize, u8)]) -> Vec<Vec<f64>> {
    let mut d = vec![vec![f64::INFINITY; n]; n];
    for (i, row) in d.iter_mut().enumerate() {
        row[i] = 0.0;
    }
    for &(u, v, w) in edges {
        d[u][v] = d[u][v].min(f64::from(w));
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = d[i][k] + d[k][j];
                if via < d[i][j] {
                    d[i][j] = via;
                }
            }
        }
    }
    d
}

fn petgraph_mst_weight(n: usize, edges: &[(usize, usize, u8)]) -> f64 {
    let mut g = UnGraph::<(), f64>::new_undirected();
    let nodes: Vec<NodeIndex> = (0..n).map(|_| g.add_node(())).collect();
    for &(u, v, w) in edges {
        g.add_edge(nodes[u], nodes[v], f64::from(w));
    }
    min_spanning_tree(&g)
        .filter_map(|element| match element {
            Element::Edge { weight, .. } => Some(weight),
            Element::Node { .. } => None,
        })
        .sum()
}

fn tol() -> Tolerances {
    Tolerances {
        abs: 1e-9,
        rel: 1e-9,
    }
}

proptest! {
    #[test]
    fn start_distance_is_zero(spec in network()) {
        let graph = build(&spec);
        for start in graph.node_ids() {
            prop_assert_eq!(shortest_paths(&graph, start).distance(start), 0.0);
        }
    }

    #[test]
    fn distances_match_brute_force(spec in network()) {
        let graph = build(&spec);
        let (n, edges, _) = &spec;
        let expected = floyd_warshall(*n, edges);
        for s in 0..*n {
            let paths = shortest_paths(&graph, id(&graph, s));
            for t in 0..*n {
                let got = paths.distance(id(&graph, t));
                if expected[s][t].is_infinite() {
                    prop_assert!(got.is_infinite());
                } else {
                    prop_assert!(nearly_equal(got, expected[s][t], tol()));
                }
            }
        }
    }

    #[test]
    fn reconstructed_paths_sum_to_distance(spec in network()) {
        let graph = build(&spec);
        for start in graph.node_ids() {
            let paths = shortest_paths(&graph, start);
            for end in graph.node_ids().filter(|&e| paths.is_reachable(e)) {
                let route = paths.path_to(end).expect("reachable node has a route");
                prop_assert_eq!(route.first().copied(), Some(start));
                prop_assert_eq!(route.last().copied(), Some(end));
                let total: f64 = route
                    .windows(2)
                    .map(|pair| {
                        graph
                            .outgoing(pair[0])
                            .iter()
                            .filter(|e| e.to == pair[1])
                            .map(|e| e.weight_km)
                            .fold(f64::INFINITY, f64::min)
                    })
                    .sum();
                prop_assert!(nearly_equal(total, paths.distance(end), tol()));
            }
        }
    }

    #[test]
    fn triangle_inequality_holds(spec in network()) {
        let graph = build(&spec);
        for start in graph.node_ids() {
            let paths = shortest_paths(&graph, start);
            for edge in graph.directed_edges() {
                let du = paths.distance(edge.from);
                if du.is_finite() {
                    prop_assert!(paths.distance(edge.to) <= du + edge.weight_km + 1e-9);
                }
            }
        }
    }

    #[test]
    fn mst_weight_is_start_invariant(spec in connected_network()) {
        let graph = build(&spec);
        let (n, edges, _) = &spec;
        let reference = petgraph_mst_weight(*n, edges);
        for start in graph.node_ids() {
            let tree = minimum_spanning_tree_from(&graph, start);
            prop_assert_eq!(tree.nodes_spanned, *n);
            prop_assert_eq!(tree.edges.len(), *n - 1);
            prop_assert!(nearly_equal(tree.total_weight_km, reference, tol()));
        }
    }

    #[test]
    fn full_forest_matches_kruskal(spec in network()) {
        let graph = build(&spec);
        let (n, edges, _) = &spec;
        let forest = full_spanning_forest(&graph);
        prop_assert_eq!(forest.nodes_spanned, *n);
        prop_assert_eq!(
            forest.edges.len(),
            *n - connected_components(&graph).len()
        );
        prop_assert!(nearly_equal(forest.total_weight_km, petgraph_mst_weight(*n, edges), tol()));
    }

    #[test]
    fn components_partition_nodes(spec in network()) {
        let graph = build(&spec);
        let components = connected_components(&graph);

        let mut seen = HashSet::new();
        for component in &components {
            for &node in component {
                prop_assert!(seen.insert(node), "node placed twice");
            }
        }
        let all: HashSet<NodeId> = graph.node_ids().collect();
        prop_assert_eq!(seen, all);

        let mut owner = vec![usize::MAX; graph.node_count()];
        for (c, component) in components.iter().enumerate() {
            for &node in component {
                owner[node.idx()] = c;
            }
        }
        for edge in graph.directed_edges() {
            prop_assert_eq!(owner[edge.from.idx()], owner[edge.to.idx()]);
        }
    }

    #[test]
    fn rebuild_gives_same_fingerprint(spec in network()) {
        prop_assert_eq!(build(&spec).fingerprint(), build(&spec).fingerprint());
    }
}
