//! Run configuration for the two audit pipelines
//!
//! Built once from command line arguments and passed explicitly into
//! [`crate::list_paths::run_list`] and [`crate::scan_versions::run_scan`].

use crate::output::OutputFormat;
use crate::search::MatchPolicy;
use crate::search::manager::config::{
    DEFAULT_LIST_PATTERN, DEFAULT_MAX_CONCURRENT_READS, DEFAULT_SCAN_SUFFIXES,
};
use crate::search::sorting::SortDirection;
use crate::search::types::MatchOptions;
use std::path::PathBuf;

/// Settings for listing the files one pattern matches
#[derive(Debug, Clone)]
pub struct ListConfig {
    /// Absolute root directory
    pub root: PathBuf,
    /// Glob suffix joined onto the root
    pub pattern: String,
    pub match_options: MatchOptions,
    /// Sort paths before printing (None = traversal order)
    pub sort: Option<SortDirection>,
    pub format: OutputFormat,
}

impl ListConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pattern: DEFAULT_LIST_PATTERN.to_string(),
            match_options: MatchOptions::default(),
            sort: None,
            format: OutputFormat::Text,
        }
    }
}

/// Settings for scanning matched files for ECS versions
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Absolute root directory
    pub root: PathBuf,
    /// File-name suffixes, each enumerated separately
    pub suffixes: Vec<String>,
    pub match_options: MatchOptions,
    pub policy: MatchPolicy,
    /// Replacement extraction regex (capture group 1 is the version)
    pub regex: Option<String>,
    /// Buffer results and print them sorted by path once every read settled
    pub ordered: bool,
    /// Scan a file once even if several suffixes match it
    pub dedup: bool,
    pub max_concurrent_reads: usize,
    pub format: OutputFormat,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suffixes: DEFAULT_SCAN_SUFFIXES.iter().map(|s| (*s).to_string()).collect(),
            match_options: MatchOptions::default(),
            policy: MatchPolicy::First,
            regex: None,
            ordered: false,
            dedup: false,
            max_concurrent_reads: DEFAULT_MAX_CONCURRENT_READS,
            format: OutputFormat::Text,
        }
    }
}
