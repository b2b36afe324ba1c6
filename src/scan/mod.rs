//! Per-file identifier scanning.
//!
//! One scan reads a file, parses it, walks the tree with an
//! [`IdentifierMatcher`](crate::references::IdentifierMatcher) and returns a
//! [`ScanResult`]. Many files are scanned in parallel on a rayon pool; each
//! task owns its source, tree and result, and results come back in input
//! order.

use crate::error::Result;
use crate::ingest::detect::Language;
use crate::ingest::SourceUnit;
use crate::references::{find_references, IdentifierOccurrence};
use crate::syntax::javascript::parse;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Identifier searched for when none is configured.
pub const DEFAULT_TARGET: &str = "SharedArrayBuffer";

/// Options shared by every file of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Identifier to look for.
    pub target: String,
    /// Grammar for files whose extension is not recognised.
    pub language: Language,
    /// Worker threads; `None` uses rayon's default pool.
    pub jobs: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            language: Language::JavaScript,
            jobs: None,
        }
    }
}

/// Matches found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// File that was scanned.
    pub path: PathBuf,
    /// Matches in source order.
    pub occurrences: Vec<IdentifierOccurrence>,
}

impl ScanResult {
    /// Whether the file uses the target at least once.
    pub fn has_matches(&self) -> bool {
        !self.occurrences.is_empty()
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// Whether the file is free of the target.
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

/// Outcome of scanning one candidate file.
#[derive(Debug)]
pub struct FileReport {
    /// Candidate file.
    pub path: PathBuf,
    /// Matches, or the error that prevented the scan.
    pub outcome: Result<ScanResult>,
}

/// Scan an already-loaded source unit.
pub fn scan_source(unit: &SourceUnit, target: &str) -> Result<ScanResult> {
    let root = parse(unit.path(), unit.text(), unit.language())?;
    let occurrences = find_references(&root, target)?;

    log::debug!(
        "{}: {} occurrence(s) of {}",
        unit.path().display(),
        occurrences.len(),
        target
    );

    Ok(ScanResult {
        path: unit.path().to_path_buf(),
        occurrences,
    })
}

/// Read and scan a single file.
pub fn scan_file(path: &Path, options: &ScanOptions) -> Result<ScanResult> {
    let unit = SourceUnit::read(path, options.language)?;
    scan_source(&unit, &options.target)
}

/// Scan every file, isolating failures per file.
///
/// Reports are returned in the order of `files`. Only a failure to build
/// the worker pool is returned as an error.
pub fn scan_files(files: &[PathBuf], options: &ScanOptions) -> Result<Vec<FileReport>> {
    let run = || {
        files
            .par_iter()
            .map(|path| FileReport {
                path: path.clone(),
                outcome: scan_file(path, options),
            })
            .collect::<Vec<_>>()
    };

    let reports = match options.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()?
            .install(run),
        None => run(),
    };

    Ok(reports)
}
