//! Error types for upstream directory calls.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Failures talking to the upstream employee directory.
///
/// None of these are retried here; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("invalid directory uri: {0}")]
    InvalidUri(String),

    #[error("directory request failed: {0}")]
    Transport(String),

    #[error("directory request timed out after {0:?}")]
    Timeout(Duration),

    #[error("directory returned status {0}")]
    Status(u16),

    #[error("failed to decode directory response: {0}")]
    Decode(String),
}
