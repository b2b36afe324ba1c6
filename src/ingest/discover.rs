//! Candidate file enumeration.
//!
//! Expands path arguments into the sorted list of source files to scan.
//! Directories are descended one level by default, without limit when
//! recursive. Hidden entries and symbolic links are never included.

use crate::error::{Result, ScanError};
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Options controlling enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoverOptions {
    /// Descend into directories without a depth limit.
    pub recursive: bool,
    /// Source extension without the leading dot.
    pub extension: String,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            extension: "js".to_string(),
        }
    }
}

/// Result of enumerating the path arguments.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Absolute, deduplicated, byte-wise sorted source files.
    pub files: Vec<PathBuf>,
    /// Paths that could not be inspected.
    pub failures: Vec<ScanError>,
}

/// Expand `paths` into candidate source files.
///
/// Arguments are resolved against the current directory. Enumeration errors
/// are collected in [`Discovery::failures`] and do not stop the walk.
pub fn list_files(paths: &[PathBuf], options: &DiscoverOptions) -> Result<Discovery> {
    let cwd = std::env::current_dir().map_err(|e| ScanError::io(".", e))?;
    Ok(list_files_from(&cwd, paths, options))
}

/// Like [`list_files`], resolving relative arguments against `base`.
pub fn list_files_from(base: &Path, paths: &[PathBuf], options: &DiscoverOptions) -> Discovery {
    let suffix = format!(".{}", options.extension);
    let mut discovery = Discovery::default();

    for arg in paths {
        let root = normalize(&base.join(arg));
        log::debug!("enumerating {}", root.display());

        let mut walker = WalkDir::new(&root)
            .follow_links(false)
            .follow_root_links(false);
        if !options.recursive {
            walker = walker.max_depth(1);
        }

        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in entries {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    discovery.files.push(entry.into_path());
                }
                Ok(_) => {}
                Err(err) => {
                    let path = err.path().unwrap_or(root.as_path()).to_path_buf();
                    log::warn!("cannot enumerate {}: {}", path.display(), err);
                    discovery.failures.push(ScanError::Walk { path, source: err });
                }
            }
        }
    }

    discovery.files.retain(|path| has_suffix(path, &suffix));
    discovery
        .files
        .sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    discovery.files.dedup();

    log::debug!("{} candidate files", discovery.files.len());
    discovery
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(suffix))
        .unwrap_or(false)
}

/// Fold `.` and `..` components without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
