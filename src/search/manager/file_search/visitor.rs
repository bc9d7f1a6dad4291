//! ParallelVisitor implementation for path matching

use super::errors;
use crate::search::manager::config::RESULT_BUFFER_SIZE;
use crate::search::types::ScanError;
use ignore::{DirEntry, ParallelVisitor, WalkState};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

/// Parallel visitor for path matching
pub(super) struct PathMatchVisitor {
    pub(super) matcher: globset::GlobMatcher,
    pub(super) results: Arc<Mutex<Vec<PathBuf>>>,
    pub(super) error_count: Arc<AtomicUsize>,
    pub(super) errors: Arc<Mutex<Vec<ScanError>>>,
    /// Thread-local buffer for batching results
    pub(super) buffer: Vec<PathBuf>,
}

impl PathMatchVisitor {
    /// Flush buffered results to shared storage
    fn flush_buffer(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        // Single lock acquisition for entire buffer
        self.results.lock().extend(self.buffer.drain(..));
    }

    /// Add result to buffer, flush if full
    fn add_result(&mut self, path: PathBuf) {
        self.buffer.push(path);

        if self.buffer.len() >= RESULT_BUFFER_SIZE {
            self.flush_buffer();
        }
    }
}

/// Directories are walked, never reported. Symlinks count as files unless
/// they resolve to a directory.
fn is_reportable(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => false,
        Some(ft) if ft.is_symlink() => !entry.path().is_dir(),
        Some(_) => true,
        None => false,
    }
}

impl ParallelVisitor for PathMatchVisitor {
    fn visit(&mut self, entry: Result<DirEntry, ignore::Error>) -> WalkState {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                errors::track_error(&err, &self.error_count, &self.errors);
                return WalkState::Continue;
            }
        };

        // The walk root itself
        if entry.depth() == 0 {
            return WalkState::Continue;
        }

        if !is_reportable(&entry) {
            return WalkState::Continue;
        }

        let path = entry.path();
        if self.matcher.is_match(path) {
            log::debug!("PathMatchVisitor: matched {}", path.display());
            self.add_result(entry.into_path());
        }

        WalkState::Continue
    }
}

impl Drop for PathMatchVisitor {
    fn drop(&mut self) {
        // Flush any remaining buffered results
        self.flush_buffer();
    }
}
