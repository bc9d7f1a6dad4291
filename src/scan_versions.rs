//! Scan every file matched by a set of suffixes for ECS version mentions
//!
//! Suffix groups are enumerated one after another. Reads for a group start as
//! soon as that group is enumerated, and their results are printed while later
//! groups are still being walked. The run ends only after every read settled.

use crate::config::ScanConfig;
use crate::error::AuditError;
use crate::output::Printer;
use crate::search::manager::content_scan::{ContentReader, ContentScanner, VersionExtractor};
use crate::search::pattern::scan_suffix_pattern;
use crate::search::sorting::{SortDirection, sort_outcomes};
use crate::search::types::{ScanOutcome, ScanReport, SearchSpec};
use crate::search::find_matches;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::PathBuf;

/// Run the content scan and print matches, then a summary of read failures
///
/// # Errors
/// Returns error if a suffix can't be resolved (missing root, malformed glob),
/// the extraction regex is invalid, or output can't be written. Individual
/// unreadable files are reported in the returned `ScanReport` instead.
pub async fn run_scan<R: ContentReader, W: Write>(
    config: &ScanConfig,
    reader: R,
    printer: &mut Printer<W>,
) -> Result<ScanReport, AuditError> {
    let extractor = match &config.regex {
        Some(pattern) => VersionExtractor::with_pattern(pattern, config.policy)?,
        None => VersionExtractor::new(config.policy),
    };

    let specs: Vec<SearchSpec> = config
        .suffixes
        .iter()
        .map(|suffix| SearchSpec::new(&config.root, scan_suffix_pattern(suffix)))
        .collect();

    for spec in &specs {
        printer.banner(&spec.combined_pattern())?;
    }
    printer.flush()?;

    let mut scanner = ContentScanner::new(reader, extractor, config.max_concurrent_reads);
    let mut held = config.ordered.then(Vec::new);
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for spec in specs {
        let matching = find_matches(spec, config.match_options.clone());
        tokio::pin!(matching);

        // Report finished reads while this group is still being walked.
        // join_next is cancel safe, so losing the race drops nothing.
        let report = loop {
            tokio::select! {
                report = &mut matching => break report?,
                Some(outcome) = scanner.next_outcome(), if scanner.pending() > 0 => {
                    emit(printer, held.as_mut(), outcome)?;
                }
            }
        };

        if report.error_count > 0 {
            log::warn!(
                "{} entries could not be read while matching under {}",
                report.error_count,
                config.root.display()
            );
        }

        let paths = report
            .paths
            .into_iter()
            .filter(|path| !config.dedup || seen.insert(path.clone()));
        scanner.spawn_all(paths);
    }

    while let Some(outcome) = scanner.next_outcome().await {
        emit(printer, held.as_mut(), outcome)?;
    }
    let report = scanner.finish(|_| {}).await;

    if let Some(mut outcomes) = held {
        sort_outcomes(&mut outcomes, SortDirection::Ascending);
        for outcome in outcomes {
            emit(printer, None, outcome)?;
        }
    }

    printer.scan_summary(&report)?;
    printer.flush()?;

    Ok(report)
}

/// Print an outcome now, or hold it back for ordered output
fn emit<W: Write>(
    printer: &mut Printer<W>,
    held: Option<&mut Vec<ScanOutcome>>,
    outcome: ScanOutcome,
) -> io::Result<()> {
    if let Some(held) = held {
        held.push(outcome);
        return Ok(());
    }

    // Read errors are listed in the summary
    if let ScanOutcome::Matched { matches, .. } = &outcome {
        for found in matches {
            printer.version_match(found)?;
        }
        printer.flush()?;
    }
    Ok(())
}
