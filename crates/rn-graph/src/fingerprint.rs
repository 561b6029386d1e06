//! Content fingerprint of a built graph.
//!
//! Two graphs built from the same rows hash identically, regardless of the
//! order edges ended up in their adjacency lists.

use sha2::{Digest, Sha256};

use crate::graph::{Edge, Graph, Node};

impl Graph {
    /// SHA-256 over the sorted node set and both sorted edge multisets.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        let mut nodes: Vec<String> = self.nodes.iter().map(node_line).collect();
        nodes.sort();
        for line in &nodes {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }

        hasher.update(b"directed\n");
        for line in self.edge_lines(self.directed_edges()) {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }

        hasher.update(b"undirected\n");
        for line in self.edge_lines(self.undirected_entries()) {
            hasher.update(line.as_bytes());
            hasher.update(b"\n");
        }

        format!("{:x}", hasher.finalize())
    }

    fn edge_lines<'a>(&self, edges: impl Iterator<Item = &'a Edge>) -> Vec<String> {
        let mut lines: Vec<String> = edges
            .map(|e| {
                format!(
                    "{}>{}:{:016x}",
                    self.code(e.from),
                    self.code(e.to),
                    e.weight_km.to_bits()
                )
            })
            .collect();
        lines.sort();
        lines
    }
}

fn node_line(node: &Node) -> String {
    let services: Vec<&str> = node.services.iter().map(String::as_str).collect();
    format!(
        "{}|{}|{}|{}|{}|{:?}|{:?}|{}|{}",
        node.code,
        node.name,
        node.level.as_deref().unwrap_or(""),
        node.region.as_deref().unwrap_or(""),
        node.facility_type.as_deref().unwrap_or(""),
        node.latitude.map(f64::to_bits),
        node.longitude.map(f64::to_bits),
        services.join(","),
        node.placeholder
    )
}
