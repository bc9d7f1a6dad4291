//! Sorting functionality for matched paths and scan outcomes
//!
//! Parallel walks and concurrent reads produce results in arbitrary order.
//! These helpers impose a deterministic path order when a caller asks for one.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use super::types::ScanOutcome;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// A-Z by path
    #[default]
    Ascending,
    /// Z-A by path
    Descending,
}

/// Sort matched paths in place
pub fn sort_paths(paths: &mut [PathBuf], direction: SortDirection) {
    paths.sort_by(|a, b| directed(compare_paths(a, b), direction));
}

/// Sort scan outcomes in place by the path they describe
pub fn sort_outcomes(outcomes: &mut [ScanOutcome], direction: SortDirection) {
    outcomes.sort_by(|a, b| directed(compare_paths(a.path(), b.path()), direction));
}

/// Compare two file paths component-wise
fn compare_paths(a: &Path, b: &Path) -> Ordering {
    a.cmp(b)
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
