//! Filesystem → source unit pipeline.
//!
//! Turns path arguments into candidate files, picks a grammar per file, and
//! loads each file into an immutable [`SourceUnit`].

pub mod detect;
pub mod discover;

use crate::error::{Result, ScanError};
use detect::Language;
use std::path::{Path, PathBuf};

/// One input file's content and identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    path: PathBuf,
    language: Language,
    text: String,
}

impl SourceUnit {
    /// Wrap already-loaded text.
    pub fn new(path: impl Into<PathBuf>, language: Language, text: String) -> Self {
        Self {
            path: path.into(),
            language,
            text,
        }
    }

    /// Read a file from disk.
    ///
    /// The grammar comes from the file's extension, falling back to
    /// `fallback` when the extension is not recognised. Bytes that are not
    /// valid UTF-8 decode to U+FFFD.
    pub fn read(path: &Path, fallback: Language) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| ScanError::io(path, e))?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let language = detect::detect_language(path).unwrap_or(fallback);
        Ok(Self::new(path, language, text))
    }

    /// Path the unit was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Grammar used to parse the unit.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Source text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_detects_language_from_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.ts");
        fs::write(&path, "let a: number;\n").unwrap();

        let unit = SourceUnit::read(&path, Language::JavaScript).unwrap();
        assert_eq!(unit.language(), Language::TypeScript);
        assert_eq!(unit.text(), "let a: number;\n");
        assert_eq!(unit.path(), path.as_path());
    }

    #[test]
    fn test_read_replaces_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.js");
        fs::write(&path, b"// \xA9\nnew SharedArrayBuffer(1);\n").unwrap();

        let unit = SourceUnit::read(&path, Language::JavaScript).unwrap();
        assert_eq!(unit.text(), "// \u{FFFD}\nnew SharedArrayBuffer(1);\n");
    }

    #[test]
    fn test_read_missing_file_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let err = SourceUnit::read(&dir.path().join("gone.js"), Language::JavaScript).unwrap_err();
        assert_eq!(err.kind(), "FileSystemError");
    }
}
