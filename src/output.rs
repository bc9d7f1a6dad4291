//! Line-oriented result printing
//!
//! Text mode writes the plain lines a person reads in a terminal. JSON mode
//! writes one object per line for piping into other tools.

use crate::search::types::{ScanError, ScanReport, VersionMatch};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// Output format for results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(tag = "record", rename_all = "snake_case")]
enum Record<'a> {
    Banner { pattern: &'a str },
    Found { count: usize },
    Path { path: &'a Path },
    Match(&'a VersionMatch),
    Error(&'a ScanError),
    Summary {
        files_scanned: usize,
        files_matched: usize,
        files_without_match: usize,
        read_errors: usize,
    },
}

/// Writes progress and result lines to a single sink
pub struct Printer<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    /// Recover the sink, mainly for tests
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn banner(&mut self, pattern: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "looking for {pattern}"),
            OutputFormat::Json => self.json(&Record::Banner { pattern }),
        }
    }

    pub fn found(&mut self, count: usize) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "found {count} files"),
            OutputFormat::Json => self.json(&Record::Found { count }),
        }
    }

    pub fn path(&mut self, path: &Path) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.out, "{}", path.display()),
            OutputFormat::Json => self.json(&Record::Path { path }),
        }
    }

    pub fn version_match(&mut self, found: &VersionMatch) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(self.out, "{}\t{}", found.version, found.path.display())
            }
            OutputFormat::Json => self.json(&Record::Match(found)),
        }
    }

    /// Trailer for a content scan, listing every read failure
    pub fn scan_summary(&mut self, report: &ScanReport) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                writeln!(
                    self.out,
                    "scanned {} files: {} matched, {} read errors",
                    report.files_scanned,
                    report.files_matched,
                    report.errors.len()
                )?;
                for error in &report.errors {
                    writeln!(self.out, "error\t{}\t{}", error.path.display(), error.message)?;
                }
                Ok(())
            }
            OutputFormat::Json => {
                for error in &report.errors {
                    self.json(&Record::Error(error))?;
                }
                self.json(&Record::Summary {
                    files_scanned: report.files_scanned,
                    files_matched: report.files_matched,
                    files_without_match: report.files_without_match,
                    read_errors: report.errors.len(),
                })
            }
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn json(&mut self, record: &Record<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)
    }
}
