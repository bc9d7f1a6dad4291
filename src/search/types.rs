use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::pattern;

/// A root directory paired with one glob suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    pub root: PathBuf,
    pub pattern: String,
}

impl SearchSpec {
    pub fn new(root: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pattern: pattern.into(),
        }
    }

    /// Root and suffix joined into a single glob expression
    #[must_use]
    pub fn combined_pattern(&self) -> String {
        pattern::build_pattern(&self.root, &self.pattern)
    }
}

/// Directory walk settings shared by every pattern in a run
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    /// Descend into and match dot-files and dot-directories
    pub include_hidden: bool,
    /// Apply `.gitignore` / `.ignore` rules while walking
    pub respect_ignore: bool,
    /// Maximum depth below the walk root (None = unlimited)
    pub max_depth: Option<usize>,
    /// Follow symbolic links to directories
    pub follow_links: bool,
}

/// Result of resolving one glob pattern against the file system
#[derive(Debug, Clone, Default)]
pub struct MatchReport {
    /// Matched file paths, in traversal order (arbitrary for parallel walks)
    pub paths: Vec<PathBuf>,
    /// Non-fatal traversal errors (limited to the first 100)
    pub errors: Vec<ScanError>,
    /// Exact number of traversal errors
    pub error_count: usize,
}

/// A version string found in a file's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMatch {
    /// `MAJOR.MINOR.PATCH` text as it appears in the file
    pub version: String,
    pub path: PathBuf,
}

/// Error recorded for a single path during traversal or reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanError {
    pub path: PathBuf,
    pub message: String,

    /// Error category for filtering
    #[serde(rename = "type")]
    pub error_type: String,
}

impl ScanError {
    pub fn from_io(path: &Path, error: &std::io::Error) -> Self {
        Self {
            path: path.to_path_buf(),
            message: error.to_string(),
            error_type: categorize_io_error(error).to_string(),
        }
    }
}

/// Categorize an I/O error by kind
pub(crate) fn categorize_io_error(error: &std::io::Error) -> &'static str {
    match error.kind() {
        std::io::ErrorKind::PermissionDenied => "permission_denied",
        std::io::ErrorKind::NotFound => "not_found",
        std::io::ErrorKind::InvalidData | std::io::ErrorKind::InvalidInput => "invalid_path",
        std::io::ErrorKind::Other => "unknown",
        _ => "io_error",
    }
}

/// What happened to one file during a content scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// One or more versions were extracted (exactly one under `MatchPolicy::First`)
    Matched {
        path: PathBuf,
        matches: Vec<VersionMatch>,
    },
    /// The file was read but contains no version mention
    NoMatch { path: PathBuf },
    /// The file could not be read
    ReadError(ScanError),
}

impl ScanOutcome {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ScanOutcome::Matched { path, .. } | ScanOutcome::NoMatch { path } => path,
            ScanOutcome::ReadError(error) => &error.path,
        }
    }
}

/// Aggregate of a whole content scan, available only after every read settled
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub files_scanned: usize,
    pub files_matched: usize,
    pub files_without_match: usize,
    pub matches: Vec<VersionMatch>,
    pub errors: Vec<ScanError>,
}

impl ScanReport {
    pub(crate) fn record(&mut self, outcome: &ScanOutcome) {
        self.files_scanned += 1;
        match outcome {
            ScanOutcome::Matched { matches, .. } => {
                self.files_matched += 1;
                self.matches.extend(matches.iter().cloned());
            }
            ScanOutcome::NoMatch { .. } => self.files_without_match += 1,
            ScanOutcome::ReadError(error) => self.errors.push(error.clone()),
        }
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
