//! Error types for the rn-app service layer.

use std::path::PathBuf;

/// Application error type. Only loading can fail; analyses report "not
/// found" conditions through their return values.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read dataset file: {path}")]
    DatasetRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported dataset format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Graph check failed: {0}")]
    Core(#[from] rn_core::RnError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for rn-app operations.
pub type AppResult<T> = Result<T, AppError>;
