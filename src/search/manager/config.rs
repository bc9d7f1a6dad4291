//! Configuration constants for search operations
//!
//! This module contains the tuning parameters for matching, buffering and scanning.

/// Maximum number of detailed errors to track (prevents memory bloat)
pub const MAX_DETAILED_ERRORS: usize = 100;

/// Size of thread-local result buffer before flushing to shared results
/// Larger = less lock contention, more memory per thread
/// Smaller = more frequent updates, more lock ops
pub(super) const RESULT_BUFFER_SIZE: usize = 50;

/// Upper bound on file reads in flight during a content scan
/// Keeps a large sweep well under the process's open-file limit
pub const DEFAULT_MAX_CONCURRENT_READS: usize = 64;

/// Suffixes swept by a content scan when none are given
pub const DEFAULT_SCAN_SUFFIXES: [&str; 4] = ["*.ts", "*.tsx", "*.json", "*.tsx.snap"];

/// Pattern listed when none is given
pub const DEFAULT_LIST_PATTERN: &str = "**/*.ts";

/// Root validation gives up after this long (slow network mounts)
pub const PATH_VALIDATION_TIMEOUT_MS: u64 = 10_000;
