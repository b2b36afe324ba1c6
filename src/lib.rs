//! identscan: syntax-aware identifier usage scanner.
//!
//! This library parses JavaScript-family sources with tree-sitter, walks the
//! resulting tree, and reports every identifier reference to a target name
//! (by default `SharedArrayBuffer`) with its source range. Strings, comments
//! and property names that merely spell the target are not reported.

#![warn(missing_docs)]
// env_logger is used by src/main.rs (binary), not this library
#![expect(unused_crate_dependencies)]

pub mod cli;
pub mod error;
pub mod ingest;
pub mod references;
pub mod report;
pub mod scan;
pub mod syntax;

/// Re-export common error types for convenience.
pub use error::{Result, ScanError};

/// Re-export scan entry points for convenience.
pub use scan::{scan_file, scan_files, ScanOptions, ScanResult};

/// identscan version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
