//! Grammar detection from file extensions.
//!
//! Table-driven, case-sensitive. Unknown extensions return None, never infer
//! from content.

use std::path::Path;

/// Grammars the scanner can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// JavaScript (.js, .mjs, .cjs, .jsx)
    JavaScript,
    /// TypeScript (.ts, .mts, .cts)
    TypeScript,
    /// TypeScript with JSX (.tsx)
    Tsx,
}

impl Language {
    /// Convert language to string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
        }
    }
}

/// Look up the grammar for a bare extension (no leading dot).
pub fn language_for_extension(extension: &str) -> Option<Language> {
    let language = match extension {
        "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
        "ts" | "mts" | "cts" => Language::TypeScript,
        "tsx" => Language::Tsx,
        _ => return None,
    };

    Some(language)
}

/// Detect the grammar from a file path.
///
/// # Examples
///
/// ```
/// # use identscan::ingest::detect::{detect_language, Language};
/// # use std::path::Path;
/// assert_eq!(detect_language(Path::new("app.js")), Some(Language::JavaScript));
/// assert_eq!(detect_language(Path::new("view.tsx")), Some(Language::Tsx));
/// assert_eq!(detect_language(Path::new("notes.txt")), None);
/// ```
pub fn detect_language(path: &Path) -> Option<Language> {
    language_for_extension(path.extension()?.to_str()?)
}
