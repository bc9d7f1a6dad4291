//! Command line surface shared by the binary and its tests
//!
//! `list` prints the files one glob pattern matches under a root directory.
//! `scan` reads every file matched by a set of suffixes and prints the ECS
//! version each one mentions.

use crate::search::manager::config::{
    DEFAULT_LIST_PATTERN, DEFAULT_MAX_CONCURRENT_READS, DEFAULT_SCAN_SUFFIXES,
};
use crate::search::sorting::SortDirection;
use crate::search::{ContentReader, MatchOptions, MatchPolicy};
use crate::{ListConfig, OutputFormat, Printer, ScanConfig, run_list, run_scan, validate_root};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;

/// Exit status of a run that finished cleanly
pub const EXIT_SUCCESS: u8 = 0;

/// Exit status of a `--strict` scan that hit unreadable files
pub const EXIT_READ_ERRORS: u8 = 2;

#[derive(Debug, Parser)]
#[command(name = "glob-ecs-versions")]
#[command(about = "Find files by glob and audit the ECS versions they mention", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the files matching one glob pattern
    List {
        #[command(flatten)]
        common: CommonArgs,

        /// Glob suffix joined onto the root
        #[arg(short, long, env = "GLOB_ECS_PATTERN", default_value = DEFAULT_LIST_PATTERN)]
        pattern: String,

        /// Sort paths instead of printing them in traversal order
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
    },

    /// Scan matched files for ECS version strings
    Scan {
        #[command(flatten)]
        common: CommonArgs,

        /// File-name suffix to sweep (repeatable)
        #[arg(short, long = "suffix", default_values = DEFAULT_SCAN_SUFFIXES)]
        suffixes: Vec<String>,

        /// Report every version mention in a file, not just the first
        #[arg(long)]
        all_matches: bool,

        /// Print results sorted by path once every read has finished
        #[arg(long)]
        ordered: bool,

        /// Scan a file once even when several suffixes match it
        #[arg(long)]
        dedup: bool,

        /// Exit with status 2 if any file could not be read
        #[arg(long)]
        strict: bool,

        /// Upper bound on file reads in flight
        #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENT_READS)]
        max_concurrent_reads: usize,

        /// Replacement extraction regex; capture group 1 is the version
        #[arg(long)]
        regex: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Root directory to search under
    #[arg(short, long, env = "GLOB_ECS_ROOT")]
    pub root: String,

    /// Match dot-files and descend into dot-directories
    #[arg(long)]
    pub hidden: bool,

    /// Apply .gitignore and .ignore rules while walking
    #[arg(long)]
    pub respect_ignore: bool,

    /// Maximum directory depth below the walk root
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Follow symbolic links to directories
    #[arg(long)]
    pub follow: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: FormatArg,
}

impl CommonArgs {
    fn match_options(&self) -> MatchOptions {
        MatchOptions {
            include_hidden: self.hidden,
            respect_ignore: self.respect_ignore,
            max_depth: self.max_depth,
            follow_links: self.follow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortDirection {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortDirection::Ascending,
            SortArg::Desc => SortDirection::Descending,
        }
    }
}

/// Run one subcommand, writing results to `out`
///
/// Returns the process exit status. Fatal failures come back as `Err`.
///
/// # Errors
/// Returns error if the root is invalid, a pattern or regex is malformed, or
/// output can't be written
pub async fn run<R: ContentReader, W: Write>(command: Commands, reader: R, out: W) -> Result<u8> {
    match command {
        Commands::List {
            common,
            pattern,
            sort,
        } => {
            let root = validate_root(&common.root)
                .await
                .with_context(|| format!("invalid root directory '{}'", common.root))?;

            let config = ListConfig {
                root,
                pattern,
                match_options: common.match_options(),
                sort: sort.map(SortDirection::from),
                format: common.format.into(),
            };
            let mut printer = Printer::new(out, config.format);
            run_list(&config, &mut printer)
                .await
                .context("listing matched files failed")?;

            Ok(EXIT_SUCCESS)
        }
        Commands::Scan {
            common,
            suffixes,
            all_matches,
            ordered,
            dedup,
            strict,
            max_concurrent_reads,
            regex,
        } => {
            let root = validate_root(&common.root)
                .await
                .with_context(|| format!("invalid root directory '{}'", common.root))?;

            let config = ScanConfig {
                root,
                suffixes,
                match_options: common.match_options(),
                policy: if all_matches {
                    MatchPolicy::All
                } else {
                    MatchPolicy::First
                },
                regex,
                ordered,
                dedup,
                max_concurrent_reads,
                format: common.format.into(),
            };
            let mut printer = Printer::new(out, config.format);
            let report = run_scan(&config, reader, &mut printer)
                .await
                .context("scanning for ECS versions failed")?;

            if strict && report.has_errors() {
                log::error!("{} files could not be read", report.errors.len());
                return Ok(EXIT_READ_ERRORS);
            }
            Ok(EXIT_SUCCESS)
        }
    }
}
