//! Glob pattern construction
//!
//! Joins a root directory with a glob suffix and splits a combined pattern
//! back into the literal directory to walk from and the part that needs
//! glob matching.

use std::path::{Component, Path, PathBuf};

/// Join a root directory and a glob suffix into one glob expression
///
/// Joining goes through path components, so doubled separators and interior
/// `.` segments collapse. A leading separator on the suffix is ignored rather
/// than replacing the root.
#[must_use]
pub fn build_pattern(root: &Path, suffix: &str) -> String {
    let suffix = suffix.trim_start_matches('/');

    let mut joined = PathBuf::new();
    joined.extend(root.components());
    joined.extend(
        Path::new(suffix)
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_))),
    );
    joined.to_string_lossy().into_owned()
}

/// Expand a bare file-name suffix so it matches at any depth
///
/// `*.tsx.snap` becomes `**/*.tsx.snap`. Suffixes that already name a
/// directory structure are returned unchanged.
#[must_use]
pub fn scan_suffix_pattern(suffix: &str) -> String {
    if suffix.contains('/') {
        suffix.to_string()
    } else {
        format!("**/{suffix}")
    }
}

/// Check for glob metacharacters in a single path segment
///
/// `*` and `**` wildcards, `?`, character classes `[...]` and brace
/// alternation `{a,b}` all count.
#[must_use]
pub fn has_glob_syntax(segment: &str) -> bool {
    segment.contains(['*', '?', '[', '{'])
}

/// A combined pattern split at its first glob segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobParts {
    /// Longest leading run of literal segments; the directory to walk
    pub base: PathBuf,
    /// True when no segment contains glob syntax
    pub is_literal: bool,
}

/// Split a combined pattern into its literal base and glob remainder
#[must_use]
pub fn literal_base(pattern: &str) -> GlobParts {
    let mut base = PathBuf::new();

    for component in Path::new(pattern).components() {
        let segment = component.as_os_str().to_string_lossy();
        if has_glob_syntax(&segment) {
            return GlobParts {
                base,
                is_literal: false,
            };
        }
        base.push(component);
    }

    GlobParts {
        base,
        is_literal: true,
    }
}
