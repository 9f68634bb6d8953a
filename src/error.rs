//! Errors that abort a run
//!
//! Malformed list cells and owners ranges are recovered inside the ingest
//! layer and never reach this type. Everything here is fatal for the run
//! (input boundary) or for the artifact being written (output boundary).

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a collaboration graph
#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("Missing required column '{column}' (record {record})")]
    MissingColumn { column: String, record: usize },

    #[error("Invalid record {record}: {reason}")]
    InvalidRecord { record: usize, reason: String },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {} at line {line}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to load config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for collabgraph operations
pub type UniverseResult<T> = Result<T, UniverseError>;
