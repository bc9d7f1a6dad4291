//! Integration tests for listing files by glob pattern
//!
//! Fixture trees are built in temp directories; every test resolves patterns
//! against the real file system.

use glob_ecs_versions::search::sorting::SortDirection;
use glob_ecs_versions::search::{MatchOptions, SearchSpec, build_pattern, match_paths};
use glob_ecs_versions::{AuditError, ListConfig, OutputFormat, Printer, run_list};
use std::fs;
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .is_test(true)
            .init();
    });
}

/// Fixture with one file per swept suffix plus one that no suffix matches
fn create_fixture() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path();
    fs::write(root.join("a.ts"), "export const a = 1;").expect("Failed to write a.ts");
    fs::write(root.join("b.tsx"), "<Flyout />").expect("Failed to write b.tsx");
    fs::write(root.join("c.json"), "{}").expect("Failed to write c.json");
    fs::write(root.join("d.tsx.snap"), "exports[`x`] = ``;").expect("Failed to write d.tsx.snap");
    fs::write(root.join("e.txt"), "notes").expect("Failed to write e.txt");
    temp_dir
}

fn file_names(paths: &[std::path::PathBuf]) -> Vec<String> {
    let mut names: Vec<String> = paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_ts_pattern_matches_only_ts() {
    init_logging();
    let temp_dir = create_fixture();

    let report = match_paths(
        &SearchSpec::new(temp_dir.path(), "**/*.ts"),
        &MatchOptions::default(),
    )
    .expect("match failed");

    assert_eq!(file_names(&report.paths), vec!["a.ts"]);
}

#[test]
fn test_joined_pattern_matches_same_set_as_manual_concatenation() {
    init_logging();
    let temp_dir = create_fixture();
    let root = temp_dir.path();

    let joined = build_pattern(root, "**/*.tsx");
    let manual = format!("{}/{}", root.display(), "**/*.tsx");
    assert_eq!(joined, manual);

    // A root given with a trailing separator resolves to the same files
    let with_slash = format!("{}/", root.display());
    let a = match_paths(&SearchSpec::new(root, "**/*.tsx"), &MatchOptions::default())
        .expect("match failed");
    let b = match_paths(
        &SearchSpec::new(Path::new(&with_slash), "/**/*.tsx"),
        &MatchOptions::default(),
    )
    .expect("match failed");

    assert_eq!(file_names(&a.paths), file_names(&b.paths));
    assert_eq!(file_names(&a.paths), vec!["b.tsx"]);
}

#[test]
fn test_nested_literal_file_name() {
    init_logging();
    let temp_dir = create_fixture();
    let nested = temp_dir.path().join("apm/public/components/app");
    fs::create_dir_all(&nested).expect("Failed to create nested dirs");
    fs::write(nested.join("span_flyout.stories.tsx"), "export default {};")
        .expect("Failed to write stories");

    let report = match_paths(
        &SearchSpec::new(temp_dir.path(), "**/span_flyout.stories.tsx"),
        &MatchOptions::default(),
    )
    .expect("match failed");

    assert_eq!(report.paths.len(), 1);
    assert!(report.paths[0].ends_with("apm/public/components/app/span_flyout.stories.tsx"));
}

#[test]
fn test_no_match_is_empty_not_error() {
    init_logging();
    let temp_dir = create_fixture();

    let report = match_paths(
        &SearchSpec::new(temp_dir.path(), "**/*.rs"),
        &MatchOptions::default(),
    )
    .expect("match failed");

    assert!(report.paths.is_empty());
    assert_eq!(report.error_count, 0);
}

#[test]
fn test_ignore_files_apply_only_when_requested() {
    init_logging();
    let temp_dir = create_fixture();
    fs::write(temp_dir.path().join(".ignore"), "a.ts\n").expect("Failed to write .ignore");

    let spec = SearchSpec::new(temp_dir.path(), "**/*.ts");

    let report = match_paths(&spec, &MatchOptions::default()).expect("match failed");
    assert_eq!(file_names(&report.paths), vec!["a.ts"]);

    let options = MatchOptions {
        respect_ignore: true,
        ..Default::default()
    };
    let report = match_paths(&spec, &options).expect("match failed");
    assert!(report.paths.is_empty());
}

#[test]
fn test_missing_root_fails() {
    init_logging();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let err = match_paths(
        &SearchSpec::new(temp_dir.path().join("missing"), "**/*.ts"),
        &MatchOptions::default(),
    )
    .expect_err("should fail");

    assert!(matches!(err, AuditError::RootNotFound(_)));
}

#[tokio::test]
async fn test_run_list_text_output() {
    init_logging();
    let temp_dir = create_fixture();
    fs::create_dir(temp_dir.path().join("sub")).expect("Failed to create sub");
    fs::write(temp_dir.path().join("sub/z.ts"), "x").expect("Failed to write z.ts");

    let config = ListConfig {
        sort: Some(SortDirection::Ascending),
        ..ListConfig::new(temp_dir.path())
    };
    let mut printer = Printer::new(Vec::new(), OutputFormat::Text);

    run_list(&config, &mut printer).await.expect("list failed");

    let out = String::from_utf8(printer.into_inner()).expect("utf8 output");
    let root = temp_dir.path().display();
    assert_eq!(
        out,
        format!("looking for {root}/**/*.ts\nfound 2 files\n{root}/a.ts\n{root}/sub/z.ts\n")
    );
}

#[tokio::test]
async fn test_run_list_json_output() {
    init_logging();
    let temp_dir = create_fixture();

    let config = ListConfig {
        pattern: "*.json".to_string(),
        format: OutputFormat::Json,
        ..ListConfig::new(temp_dir.path())
    };
    let mut printer = Printer::new(Vec::new(), config.format);

    run_list(&config, &mut printer).await.expect("list failed");

    let out = String::from_utf8(printer.into_inner()).expect("utf8 output");
    let records: Vec<serde_json::Value> = out
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid json"))
        .collect();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["record"], "banner");
    assert_eq!(records[1]["record"], "found");
    assert_eq!(records[1]["count"], 1);
    assert_eq!(records[2]["record"], "path");
    assert!(
        records[2]["path"]
            .as_str()
            .is_some_and(|p| p.ends_with("c.json"))
    );
}
