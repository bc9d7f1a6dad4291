//! Error tracking for path matching

use crate::search::manager::config::MAX_DETAILED_ERRORS;
use crate::search::types::{ScanError, categorize_io_error};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Track a directory traversal error
pub(super) fn track_error(
    error: &ignore::Error,
    error_count: &Arc<AtomicUsize>,
    errors: &Arc<Mutex<Vec<ScanError>>>,
) {
    error_count.fetch_add(1, Ordering::SeqCst);

    log::debug!("Path matching error: {error}");

    let mut errors = errors.lock();
    if errors.len() < MAX_DETAILED_ERRORS {
        errors.push(ScanError {
            path: error_path(error).unwrap_or_else(|| PathBuf::from("<unknown>")),
            message: error.to_string(),
            error_type: categorize_error(error).to_string(),
        });
    }
}

/// Dig the offending path out of a (possibly nested) walk error
fn error_path(error: &ignore::Error) -> Option<PathBuf> {
    match error {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}

/// Categorize an error by type
fn categorize_error(error: &ignore::Error) -> &'static str {
    if let Some(io) = error.io_error() {
        return categorize_io_error(io);
    }
    match error {
        ignore::Error::Loop { .. } => "symlink_loop",
        _ => "unknown",
    }
}
