//! Concurrent read-and-extract over matched paths
//!
//! Every path becomes a tracked task on a `JoinSet`. A semaphore bounds how
//! many reads are in flight. Outcomes come back in completion order, and
//! nothing is reported as finished until every task has settled.

use super::extractor::VersionExtractor;
use super::reader::ContentReader;
use crate::search::types::{ScanError, ScanOutcome, ScanReport};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Issues reads as tracked tasks and collects their outcomes
pub struct ContentScanner<R: ContentReader> {
    reader: Arc<R>,
    extractor: Arc<VersionExtractor>,
    permits: Arc<Semaphore>,
    tasks: JoinSet<ScanOutcome>,
    report: ScanReport,
}

impl<R: ContentReader> ContentScanner<R> {
    pub fn new(reader: R, extractor: VersionExtractor, max_concurrent_reads: usize) -> Self {
        Self {
            reader: Arc::new(reader),
            extractor: Arc::new(extractor),
            permits: Arc::new(Semaphore::new(
                max_concurrent_reads.clamp(1, Semaphore::MAX_PERMITS),
            )),
            tasks: JoinSet::new(),
            report: ScanReport::default(),
        }
    }

    /// Start scanning `paths` without waiting for any of them
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_all(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        for path in paths {
            self.tasks.spawn(scan_one(
                Arc::clone(&self.reader),
                Arc::clone(&self.extractor),
                Arc::clone(&self.permits),
                path,
            ));
        }
    }

    /// Number of reads issued but not yet collected
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Wait for the next read to finish, in whatever order they complete
    ///
    /// Returns `None` once nothing is pending. The outcome is already counted
    /// in the final report.
    pub async fn next_outcome(&mut self) -> Option<ScanOutcome> {
        let outcome = match self.tasks.join_next().await? {
            Ok(outcome) => outcome,
            Err(e) => {
                log::warn!("Scan task failed: {e}");
                ScanOutcome::ReadError(ScanError {
                    path: PathBuf::from("<unknown>"),
                    message: e.to_string(),
                    error_type: if e.is_panic() { "task_panicked" } else { "task_cancelled" }
                        .to_string(),
                })
            }
        };
        self.report.record(&outcome);
        Some(outcome)
    }

    /// Join barrier: drain every outstanding read, then hand back the report
    pub async fn finish(mut self, mut on_outcome: impl FnMut(&ScanOutcome)) -> ScanReport {
        while let Some(outcome) = self.next_outcome().await {
            on_outcome(&outcome);
        }
        log::debug!(
            "Content scan finished: {} files, {} matched, {} errors",
            self.report.files_scanned,
            self.report.files_matched,
            self.report.errors.len()
        );
        self.report
    }
}

/// Scan a fixed list of paths and wait for all of them
///
/// `on_outcome` sees each file's outcome as soon as its read completes.
pub async fn scan_paths<R: ContentReader>(
    paths: impl IntoIterator<Item = PathBuf>,
    reader: R,
    extractor: VersionExtractor,
    max_concurrent_reads: usize,
    on_outcome: impl FnMut(&ScanOutcome),
) -> ScanReport {
    let mut scanner = ContentScanner::new(reader, extractor, max_concurrent_reads);
    scanner.spawn_all(paths);
    scanner.finish(on_outcome).await
}

async fn scan_one<R: ContentReader>(
    reader: Arc<R>,
    extractor: Arc<VersionExtractor>,
    permits: Arc<Semaphore>,
    path: PathBuf,
) -> ScanOutcome {
    // The semaphore is never closed
    let _permit = permits.acquire_owned().await.ok();

    match reader.read(&path).await {
        Ok(content) => {
            let matches = extractor.extract(&content, &path);
            if matches.is_empty() {
                ScanOutcome::NoMatch { path }
            } else {
                ScanOutcome::Matched { path, matches }
            }
        }
        Err(e) => {
            log::warn!("Failed to read {}: {e}", path.display());
            ScanOutcome::ReadError(ScanError::from_io(&path, &e))
        }
    }
}
