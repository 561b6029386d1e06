//! The network currently loaded by a front end.

use std::path::{Path, PathBuf};

use rn_analysis::SpanningForest;
use rn_graph::{BuildReport, Diagnostic, Graph, RawRow, build_graph};

use crate::dataset;
use crate::error::AppResult;
use crate::query::{self, ComponentReport, RouteOutcome, RouteRequest};

/// Owns one build at a time. Loading builds a complete new graph and swaps
/// it in; nothing from the previous load is merged.
#[derive(Debug, Default)]
pub struct Session {
    report: BuildReport,
    source: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current network with one built from `rows`.
    pub fn load_rows(&mut self, rows: &[RawRow]) -> &BuildReport {
        self.report = build_graph(rows);
        self.source = None;
        &self.report
    }

    /// Replace the current network with the contents of a file.
    ///
    /// On error the previous network stays loaded.
    pub fn load_file(&mut self, path: &Path) -> AppResult<&BuildReport> {
        let report = dataset::load_network(path)?;
        self.report = report;
        self.source = Some(path.to_path_buf());
        Ok(&self.report)
    }

    pub fn graph(&self) -> &Graph {
        &self.report.graph
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.report.diagnostics
    }

    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn route(&self, request: &RouteRequest) -> RouteOutcome {
        query::plan_route(self.graph(), request)
    }

    pub fn backbone(&self, all_components: bool) -> SpanningForest {
        query::spanning_backbone(self.graph(), all_components)
    }

    pub fn components(&self, region: Option<&str>) -> Vec<ComponentReport> {
        query::analyze_components(self.graph(), region)
    }
}
