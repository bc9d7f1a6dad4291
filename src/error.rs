//! Error types for the audit pipelines
//!
//! Only failures that end a run are represented here. Per-file read failures
//! during a content scan are data (`ScanError`), not errors.

use std::path::PathBuf;

/// Fatal errors raised by pattern resolution, validation and scanning
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("root directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("root directory can't be read: {}", path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("invalid extraction regex '{pattern}': {reason}")]
    InvalidRegex { pattern: String, reason: String },

    #[error("path validation timed out after {0} ms: {1}")]
    Timeout(u64, String),

    #[error("background task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
