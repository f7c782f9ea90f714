//! Error types for the expansion engine.

use std::path::PathBuf;

use roster_directory::DirectoryError;
use thiserror::Error;

/// Result type alias for expansion operations.
pub type ExpandResult<T> = Result<T, ExpandError>;

/// Failures that abort an expansion request.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// A foreign key has no matching record in the table responsible for it.
    #[error("could not resolve path '{path}'")]
    Unresolved { path: String },

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Failures loading the static reference datasets. Fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {dataset} dataset {path}: {source}")]
    Read {
        dataset: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed {dataset} dataset: {source}")]
    Parse {
        dataset: &'static str,
        source: serde_json::Error,
    },

    #[error("{dataset} record at index {index} has no integer id")]
    MissingId { dataset: &'static str, index: usize },
}
