//! identscan error types.
//!
//! All errors are typed and carry the path they relate to, so a failure in
//! one file can be reported without aborting the rest of the scan.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for identscan operations.
#[derive(Error, Debug)]
pub enum ScanError {
    /// I/O error while reading a source file or inspecting a path.
    #[error("I/O error for path {path}: {source}")]
    Io {
        /// The path that caused the I/O error.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Directory enumeration failed for an entry.
    #[error("Failed to walk {path}: {source}")]
    Walk {
        /// The path being enumerated when the error happened.
        path: PathBuf,
        /// The underlying walkdir error.
        #[source]
        source: walkdir::Error,
    },

    /// Source text is not valid in the file's grammar.
    #[error("Parse error in {file} at {line}:{column}: {message}")]
    Parse {
        /// The file that failed to parse.
        file: PathBuf,
        /// Line of the first syntax error (1-based).
        line: usize,
        /// Column of the first syntax error (0-based).
        column: usize,
        /// The parse error message.
        message: String,
    },

    /// The tree-sitter grammar could not be loaded.
    #[error("Failed to load grammar: {message}")]
    Language {
        /// Loader diagnostic.
        message: String,
    },

    /// No grammar is registered for the configured source extension.
    #[error("Unsupported source extension '{0}'")]
    UnsupportedExtension(String),

    /// The worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ScanError {
    /// Build an I/O error bound to a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable identifier of the error variant, used in JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Io { .. } => "FileSystemError",
            ScanError::Walk { .. } => "FileSystemError",
            ScanError::Parse { .. } => "ParseError",
            ScanError::Language { .. } => "LanguageError",
            ScanError::UnsupportedExtension(_) => "UsageError",
            ScanError::ThreadPool(_) => "ThreadPoolError",
        }
    }

    /// Path the error is attributed to, if any.
    pub fn file_path(&self) -> Option<&Path> {
        match self {
            ScanError::Io { path, .. } | ScanError::Walk { path, .. } => Some(path),
            ScanError::Parse { file, .. } => Some(file),
            _ => None,
        }
    }
}

/// Result type alias for identscan operations.
pub type Result<T> = std::result::Result<T, ScanError>;
