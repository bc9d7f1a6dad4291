//! List the files a single glob pattern matches

use crate::config::ListConfig;
use crate::error::AuditError;
use crate::output::Printer;
use crate::search::find_matches;
use crate::search::sorting::sort_paths;
use crate::search::types::{MatchReport, SearchSpec};
use std::io::Write;

/// Print the banner, the match count, then every matched path
///
/// # Errors
/// Returns error if the pattern can't be resolved (missing root, malformed
/// glob) or output can't be written
pub async fn run_list<W: Write>(
    config: &ListConfig,
    printer: &mut Printer<W>,
) -> Result<MatchReport, AuditError> {
    let spec = SearchSpec::new(&config.root, &config.pattern);

    printer.banner(&spec.combined_pattern())?;
    printer.flush()?;

    let mut report = find_matches(spec, config.match_options.clone()).await?;

    if let Some(direction) = config.sort {
        sort_paths(&mut report.paths, direction);
    }

    printer.found(report.paths.len())?;
    for path in &report.paths {
        printer.path(path)?;
    }
    printer.flush()?;

    if report.error_count > 0 {
        log::warn!(
            "{} entries under {} could not be read while matching",
            report.error_count,
            config.root.display()
        );
    }

    Ok(report)
}
