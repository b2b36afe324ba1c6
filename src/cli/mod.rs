//! Command-line interface for identscan.
//!
//! This module handles argument parsing only. Scanning lives in the library
//! modules; `main` wires the two together.

use crate::error::{Result, ScanError};
use crate::ingest::detect::{language_for_extension, Language};
use crate::ingest::discover::DiscoverOptions;
use crate::scan::{ScanOptions, DEFAULT_TARGET};
use clap::Parser;
use std::path::PathBuf;

/// identscan: report every use of a global identifier in JavaScript sources.
#[derive(Parser, Debug)]
#[command(name = "identscan")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Files or directories to scan.
    #[arg(required = true, value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Descend into directories without a depth limit.
    #[arg(short, long)]
    pub recursive: bool,

    /// Identifier to look for.
    #[arg(short, long, value_name = "NAME", default_value = DEFAULT_TARGET)]
    pub name: String,

    /// Source file extension, without the dot (js, mjs, cjs, jsx, ts, mts, cts, tsx).
    #[arg(short, long, value_name = "EXT", default_value = "js")]
    pub ext: String,

    /// Number of worker threads (defaults to one per CPU).
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,

    /// Emit a JSON report instead of text.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Grammar selected by `--ext`.
    pub fn language(&self) -> Result<Language> {
        let extension = self.ext.trim_start_matches('.');
        language_for_extension(extension)
            .ok_or_else(|| ScanError::UnsupportedExtension(self.ext.clone()))
    }

    /// Enumeration options derived from the arguments.
    pub fn discover_options(&self) -> DiscoverOptions {
        DiscoverOptions {
            recursive: self.recursive,
            extension: self.ext.trim_start_matches('.').to_string(),
        }
    }

    /// Scan options derived from the arguments.
    pub fn scan_options(&self) -> Result<ScanOptions> {
        Ok(ScanOptions {
            target: self.name.clone(),
            language: self.language()?,
            jobs: self.jobs.map(usize::from),
        })
    }
}

/// Parse command-line arguments.
///
/// Exits with a usage message on invalid input.
pub fn parse_args() -> Cli {
    Cli::parse()
}
