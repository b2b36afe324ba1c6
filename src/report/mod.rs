//! Scan report rendering.
//!
//! Scan tasks only return values; this module is the single place that
//! writes them out, in input order, as text or JSON.

use crate::error::ScanError;
use crate::scan::{FileReport, ScanResult};
use crate::syntax::Span;
use serde::Serialize;
use std::io::{self, Write};

/// Format a span as `line:start-end`, or `line:start-line:end` when it
/// covers several lines.
pub fn format_span(span: &Span) -> String {
    if span.is_single_line() {
        format!("{}:{}-{}", span.start.line, span.start.column, span.end.column)
    } else {
        format!(
            "{}:{}-{}:{}",
            span.start.line, span.start.column, span.end.line, span.end.column
        )
    }
}

/// Format an optional span; `None` when the location is unknown.
pub fn describe_location(span: Option<&Span>) -> Option<String> {
    span.map(format_span)
}

/// Counts that decide the summary line and exit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Files with at least one match.
    pub files_using: usize,
    /// Files scanned without matches.
    pub files_free: usize,
    /// Files or paths that could not be scanned.
    pub failures: usize,
}

impl ScanSummary {
    /// Tally file reports plus enumeration failures.
    pub fn tally(reports: &[FileReport], enumeration_failures: usize) -> Self {
        let mut summary = Self {
            failures: enumeration_failures,
            ..Self::default()
        };
        for report in reports {
            match &report.outcome {
                Ok(result) if result.has_matches() => summary.files_using += 1,
                Ok(_) => summary.files_free += 1,
                Err(_) => summary.failures += 1,
            }
        }
        summary
    }

    /// Process exit status: 0 only when nothing uses the target and nothing failed.
    pub fn exit_code(&self) -> u8 {
        if self.files_using > 0 || self.failures > 0 {
            1
        } else {
            0
        }
    }
}

/// Everything produced by one run, ready to render.
#[derive(Debug)]
pub struct Report<'a> {
    target: &'a str,
    files: &'a [FileReport],
    enumeration_failures: &'a [ScanError],
}

impl<'a> Report<'a> {
    /// Bundle a run's results.
    pub fn new(
        target: &'a str,
        files: &'a [FileReport],
        enumeration_failures: &'a [ScanError],
    ) -> Self {
        Self {
            target,
            files,
            enumeration_failures,
        }
    }

    /// Summary counts for this run.
    pub fn summary(&self) -> ScanSummary {
        ScanSummary::tally(self.files, self.enumeration_failures.len())
    }

    /// Write the human-readable report.
    ///
    /// Per-file lines and the summary go to `out`, diagnostics to `err`.
    pub fn write_text<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> io::Result<ScanSummary> {
        for failure in self.enumeration_failures {
            writeln!(err, "Error: {}", failure)?;
        }

        for file in self.files {
            match &file.outcome {
                Ok(result) => self.write_result(out, result)?,
                Err(e) => writeln!(err, "Error: {}", e)?,
            }
        }

        let summary = self.summary();
        match summary.files_using {
            0 => writeln!(out, "No files use {}.", self.target)?,
            n => writeln!(out, "{} files use {}.", n, self.target)?,
        }
        if summary.failures > 0 {
            writeln!(err, "{} files could not be scanned.", summary.failures)?;
        }

        Ok(summary)
    }

    fn write_result<W: Write>(&self, out: &mut W, result: &ScanResult) -> io::Result<()> {
        let path = result.path.display();
        if !result.has_matches() {
            return writeln!(out, "{} is {}-free.", path, self.target);
        }

        writeln!(
            out,
            "{} uses {} ({} times):",
            path,
            self.target,
            result.len()
        )?;
        for (index, occurrence) in result.occurrences.iter().enumerate() {
            match describe_location(occurrence.span.as_ref()) {
                Some(range) => writeln!(out, "  [{}] {}", index + 1, range)?,
                None => log::warn!(
                    "{}: occurrence [{}] has no source location; omitted from output",
                    path,
                    index + 1
                ),
            }
        }
        Ok(())
    }

    /// Build the JSON document for this run.
    pub fn to_json(&self) -> JsonReport {
        let summary = self.summary();
        let mut failures: Vec<FailurePayload> = self
            .enumeration_failures
            .iter()
            .map(FailurePayload::from_error)
            .collect();
        let mut files = Vec::new();

        for file in self.files {
            match &file.outcome {
                Ok(result) => files.push(FilePayload::from_result(result)),
                Err(e) => failures.push(FailurePayload::from_error(e)),
            }
        }

        JsonReport {
            status: if summary.failures == 0 { "ok" } else { "error" },
            target: self.target.to_string(),
            files,
            failures,
            files_using: summary.files_using,
        }
    }
}

/// JSON document for a whole run.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// "ok" when every file was scanned, "error" otherwise.
    pub status: &'static str,
    /// Identifier searched for.
    pub target: String,
    /// Scanned files in input order.
    pub files: Vec<FilePayload>,
    /// Paths that could not be scanned.
    pub failures: Vec<FailurePayload>,
    /// Number of files using the target.
    pub files_using: usize,
}

/// JSON representation of one scanned file.
#[derive(Debug, Serialize)]
pub struct FilePayload {
    /// File path.
    pub path: String,
    /// Whether the file uses the target.
    pub uses: bool,
    /// Number of occurrences.
    pub count: usize,
    /// Occurrences in source order.
    pub occurrences: Vec<OccurrencePayload>,
}

impl FilePayload {
    fn from_result(result: &ScanResult) -> Self {
        Self {
            path: result.path.to_string_lossy().to_string(),
            uses: result.has_matches(),
            count: result.len(),
            occurrences: result
                .occurrences
                .iter()
                .map(|occurrence| OccurrencePayload {
                    name: occurrence.name.clone(),
                    range: describe_location(occurrence.span.as_ref()),
                    line: occurrence.span.map(|s| s.start.line),
                    column: occurrence.span.map(|s| s.start.column),
                    end_line: occurrence.span.map(|s| s.end.line),
                    end_column: occurrence.span.map(|s| s.end.column),
                })
                .collect(),
        }
    }
}

/// JSON representation of one occurrence.
#[derive(Debug, Serialize)]
pub struct OccurrencePayload {
    /// Identifier text.
    pub name: String,
    /// Compact range, `null` when the location is unknown.
    pub range: Option<String>,
    /// Start line (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// Start column (0-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    /// End line (1-based).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    /// End column (0-based, exclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<usize>,
}

/// JSON representation of a failed path.
#[derive(Debug, Serialize)]
pub struct FailurePayload {
    /// Error kind identifier (ParseError, FileSystemError, ...).
    pub kind: &'static str,
    /// Path the failure belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl FailurePayload {
    /// Build payload from a ScanError instance.
    pub fn from_error(error: &ScanError) -> Self {
        Self {
            kind: error.kind(),
            file: error
                .file_path()
                .map(|path| path.to_string_lossy().to_string()),
            message: error.to_string(),
        }
    }
}
