//! Parallel visitor builder for path matching

use super::visitor::PathMatchVisitor;
use crate::search::manager::config::RESULT_BUFFER_SIZE;
use crate::search::types::ScanError;
use ignore::{ParallelVisitor, ParallelVisitorBuilder};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;

/// Parallel visitor builder for path matching
pub(super) struct PathMatchBuilder {
    pub(super) matcher: globset::GlobMatcher,
    pub(super) results: Arc<Mutex<Vec<PathBuf>>>,
    pub(super) error_count: Arc<AtomicUsize>,
    pub(super) errors: Arc<Mutex<Vec<ScanError>>>,
}

impl<'s> ParallelVisitorBuilder<'s> for PathMatchBuilder {
    fn build(&mut self) -> Box<dyn ParallelVisitor + 's> {
        Box::new(PathMatchVisitor {
            matcher: self.matcher.clone(),
            results: Arc::clone(&self.results),
            error_count: Arc::clone(&self.error_count),
            errors: Arc::clone(&self.errors),
            buffer: Vec::with_capacity(RESULT_BUFFER_SIZE),
        })
    }
}
