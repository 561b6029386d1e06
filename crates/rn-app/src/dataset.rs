//! Row file loading.
//!
//! A dataset file is a sequence of rows in JSON or YAML. Decoding the
//! individual cells is left to the graph builder, so a file only fails to
//! load when it is unreadable or not a sequence.

use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use rn_graph::{BuildReport, RawRow, build_graph};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    Json,
    Yaml,
}

impl RowFormat {
    /// Pick a format from the file extension.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(RowFormat::Json),
            Some("yaml") | Some("yml") => Ok(RowFormat::Yaml),
            _ => Err(AppError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Parse a sequence of rows.
///
/// Each entry is decoded on its own; an entry that is not a row object is
/// kept as an empty row so the builder reports it at its position.
pub fn parse_rows(content: &str, format: RowFormat) -> AppResult<Vec<RawRow>> {
    let entries: Vec<Value> = match format {
        RowFormat::Json => serde_json::from_str(content)?,
        RowFormat::Yaml => serde_yaml::from_str(content)?,
    };
    let rows = entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value::<RawRow>(entry).unwrap_or_else(|err| {
                warn!(row = i + 1, error = %err, "entry is not a row");
                RawRow::default()
            })
        })
        .collect();
    Ok(rows)
}

pub fn load_rows(path: &Path) -> AppResult<Vec<RawRow>> {
    let format = RowFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| AppError::DatasetRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rows(&content, format)
}

/// Load a file and build its graph.
pub fn load_network(path: &Path) -> AppResult<BuildReport> {
    let rows = load_rows(path)?;
    let report = build_graph(&rows);
    info!(
        path = %path.display(),
        rows = report.rows_read,
        facilities = report.graph.node_count(),
        relations = report.graph.directed_edge_count(),
        diagnostics = report.diagnostics.len(),
        "network loaded"
    );
    Ok(report)
}
