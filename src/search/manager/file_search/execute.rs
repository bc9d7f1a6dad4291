//! Execute path matching using walker with parallel directory traversal

use super::builder::PathMatchBuilder;
use crate::error::AuditError;
use crate::search::pattern::{build_pattern, literal_base};
use crate::search::types::{MatchOptions, MatchReport, SearchSpec};
use globset::GlobBuilder;
use ignore::WalkBuilder;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Resolve a search spec to the files its combined pattern matches
///
/// Blocks the calling thread for the whole walk. Async callers should use
/// [`find_matches`].
///
/// # Errors
/// Returns error if the glob is malformed or the spec's root is missing,
/// not a directory or can't be listed. Unreadable entries below the root are
/// recorded in the report instead.
pub fn execute(spec: &SearchSpec, options: &MatchOptions) -> Result<MatchReport, AuditError> {
    let pattern = spec.combined_pattern();

    // The root is matched literally even if its name contains glob syntax
    let root = PathBuf::from(build_pattern(&spec.root, ""));
    let suffix = build_pattern(Path::new(""), &spec.pattern);
    let escaped = build_pattern(Path::new(&globset::escape(&root.to_string_lossy())), &suffix);

    let glob = GlobBuilder::new(&escaped)
        .literal_separator(true)
        .build()
        .map_err(|source| AuditError::InvalidGlob {
            pattern: pattern.clone(),
            source,
        })?;

    ensure_directory(&root)?;

    let parts = literal_base(&suffix);
    let base = root.join(&parts.base);
    if parts.is_literal {
        return Ok(MatchReport {
            paths: literal_match(&base)?.into_iter().collect(),
            ..Default::default()
        });
    }

    // The glob may name directories below the root that don't exist
    match std::fs::metadata(&base) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Ok(MatchReport::default()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("Walk base {} does not exist, nothing to match", base.display());
            return Ok(MatchReport::default());
        }
        Err(e) => return Err(e.into()),
    }

    let mut walker = WalkBuilder::new(&base);
    configure_walker(&mut walker, options);

    let results = Arc::new(Mutex::new(Vec::new()));
    let error_count = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(Mutex::new(Vec::new()));

    let mut builder = PathMatchBuilder {
        matcher: glob.compile_matcher(),
        results: Arc::clone(&results),
        error_count: Arc::clone(&error_count),
        errors: Arc::clone(&errors),
    };

    // Execute parallel walk; visitors flush their buffers when dropped
    walker.build_parallel().visit(&mut builder);
    drop(builder);

    let error_count = error_count.load(Ordering::SeqCst);
    if error_count > 0 {
        log::info!(
            "Path matching completed with {} errors. Pattern: '{}'",
            error_count,
            pattern
        );
    }

    let paths = std::mem::take(&mut *results.lock());
    let errors = std::mem::take(&mut *errors.lock());
    Ok(MatchReport {
        paths,
        errors,
        error_count,
    })
}

/// Run [`execute`] on the blocking pool
///
/// # Errors
/// Same as [`execute`], plus `TaskFailed` if the walk panics.
pub async fn find_matches(
    spec: SearchSpec,
    options: MatchOptions,
) -> Result<MatchReport, AuditError> {
    tokio::task::spawn_blocking(move || execute(&spec, &options))
        .await
        .map_err(|e| AuditError::TaskFailed(e.to_string()))?
}

/// Configure `WalkBuilder` from match options
///
/// Ignore files are off unless requested, so the walk sees what a shell
/// glob would. Hidden entries follow the same rule as `*` in a shell.
fn configure_walker(walker: &mut WalkBuilder, options: &MatchOptions) {
    log::debug!(
        "configure_walker: hidden={}, respect_ignore={}, max_depth={:?}, follow_links={}",
        options.include_hidden,
        options.respect_ignore,
        options.max_depth,
        options.follow_links
    );

    walker
        .standard_filters(options.respect_ignore)
        .hidden(!options.include_hidden)
        .follow_links(options.follow_links)
        .max_depth(options.max_depth)
        .threads(0);
}

/// The root must exist, be a directory and be listable
fn ensure_directory(root: &Path) -> Result<(), AuditError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => std::fs::read_dir(root)
            .map(drop)
            .map_err(|source| AuditError::RootUnreadable {
                path: root.to_path_buf(),
                source,
            }),
        Ok(_) => Err(AuditError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AuditError::RootNotFound(root.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

/// A pattern without glob syntax names at most one file
fn literal_match(path: &Path) -> Result<Option<PathBuf>, AuditError> {
    match std::fs::metadata(path) {
        Ok(meta) if !meta.is_dir() => Ok(Some(path.to_path_buf())),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        for name in ["a.ts", "b.tsx", "c.json", "d.tsx.snap", "e.txt"] {
            fs::write(root.join(name), "content").expect("Failed to write fixture");
        }
        fs::create_dir_all(root.join("nested/deeper")).expect("Failed to create nested dirs");
        fs::write(root.join("nested/deeper/f.ts"), "content").expect("Failed to write f.ts");
        fs::write(root.join("nested/g.ts.bak"), "content").expect("Failed to write g.ts.bak");
        temp_dir
    }

    fn names(report: &MatchReport) -> Vec<String> {
        let mut names: Vec<String> = report
            .paths
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_recursive_wildcard_matches_every_depth() {
        let temp_dir = fixture();
        let spec = SearchSpec::new(temp_dir.path(), "**/*.ts");

        let report = execute(&spec, &MatchOptions::default()).expect("match failed");

        assert_eq!(names(&report), vec!["a.ts", "f.ts"]);
        assert_eq!(report.error_count, 0);
    }

    #[test]
    fn test_single_star_does_not_cross_directories() {
        let temp_dir = fixture();
        let spec = SearchSpec::new(temp_dir.path(), "*.ts");

        let report = execute(&spec, &MatchOptions::default()).expect("match failed");

        assert_eq!(names(&report), vec!["a.ts"]);
    }

    #[test]
    fn test_compound_extension() {
        let temp_dir = fixture();
        let spec = SearchSpec::new(temp_dir.path(), "**/*.tsx.snap");

        let report = execute(&spec, &MatchOptions::default()).expect("match failed");

        assert_eq!(names(&report), vec!["d.tsx.snap"]);
    }

    #[test]
    fn test_directories_are_not_reported() {
        let temp_dir = fixture();
        fs::create_dir(temp_dir.path().join("dir.ts")).expect("Failed to create dir.ts");
        let spec = SearchSpec::new(temp_dir.path(), "**/*.ts");

        let report = execute(&spec, &MatchOptions::default()).expect("match failed");

        assert_eq!(names(&report), vec!["a.ts", "f.ts"]);
    }

    #[test]
    fn test_literal_pattern() {
        let temp_dir = fixture();

        let found = execute(
            &SearchSpec::new(temp_dir.path(), "nested/deeper/f.ts"),
            &MatchOptions::default(),
        )
        .expect("match failed");
        assert_eq!(names(&found), vec!["f.ts"]);

        let missing = execute(
            &SearchSpec::new(temp_dir.path(), "nested/nope.ts"),
            &MatchOptions::default(),
        )
        .expect("match failed");
        assert!(missing.paths.is_empty());
    }

    #[test]
    fn test_missing_literal_subdirectory_is_empty() {
        let temp_dir = fixture();
        let spec = SearchSpec::new(temp_dir.path(), "absent/**/*.ts");

        let report = execute(&spec, &MatchOptions::default()).expect("match failed");

        assert!(report.paths.is_empty());
    }

    #[test]
    fn test_hidden_entries_skipped_by_default() {
        let temp_dir = fixture();
        fs::create_dir(temp_dir.path().join(".cache")).expect("Failed to create .cache");
        fs::write(temp_dir.path().join(".cache/h.ts"), "x").expect("Failed to write h.ts");

        let spec = SearchSpec::new(temp_dir.path(), "**/*.ts");
        let report = execute(&spec, &MatchOptions::default()).expect("match failed");
        assert_eq!(names(&report), vec!["a.ts", "f.ts"]);

        let options = MatchOptions {
            include_hidden: true,
            ..Default::default()
        };
        let report = execute(&spec, &options).expect("match failed");
        assert_eq!(names(&report), vec!["a.ts", "f.ts", "h.ts"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_root_is_fatal() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = fixture();
        let locked = temp_dir.path().join("locked");
        fs::create_dir(&locked).expect("Failed to create locked");
        fs::write(locked.join("a.ts"), "x").expect("Failed to write a.ts");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))
            .expect("Failed to chmod locked");

        // Privileged users can still list the directory
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))
                .expect("Failed to restore permissions");
            return;
        }

        let result = execute(&SearchSpec::new(&locked, "**/*.ts"), &MatchOptions::default());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))
            .expect("Failed to restore permissions");
        assert!(matches!(result, Err(AuditError::RootUnreadable { .. })));
    }

    #[test]
    fn test_max_depth() {
        let temp_dir = fixture();
        let spec = SearchSpec::new(temp_dir.path(), "**/*.ts");
        let options = MatchOptions {
            max_depth: Some(1),
            ..Default::default()
        };

        let report = execute(&spec, &options).expect("match failed");

        assert_eq!(names(&report), vec!["a.ts"]);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp_dir = fixture();
        let spec = SearchSpec::new(temp_dir.path().join("gone"), "**/*.ts");

        let err = execute(&spec, &MatchOptions::default()).expect_err("should fail");

        assert!(matches!(err, AuditError::RootNotFound(_)));
    }

    #[test]
    fn test_malformed_glob_is_fatal() {
        let temp_dir = fixture();
        let spec = SearchSpec::new(temp_dir.path(), "**/*.{ts,tsx");

        let err = execute(&spec, &MatchOptions::default()).expect_err("should fail");

        assert!(matches!(err, AuditError::InvalidGlob { .. }));
    }
}
