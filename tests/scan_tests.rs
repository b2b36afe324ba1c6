//! Integration tests for the scan pipeline.
//!
//! Exercises enumeration, parsing, matching and reporting through the
//! public library API.

use identscan::ingest::detect::Language;
use identscan::ingest::discover::{list_files_from, DiscoverOptions};
use identscan::ingest::SourceUnit;
use identscan::references::find_references;
use identscan::report::Report;
use identscan::scan::{scan_files, scan_source, ScanOptions, DEFAULT_TARGET};
use identscan::syntax::javascript::parse;
use identscan::syntax::walk::for_each_node;
use identscan::syntax::NodeKind;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED: &str = r#"
// SharedArrayBuffer in a comment
const label = "SharedArrayBuffer";
const { SharedArrayBuffer: alias } = globalThis;
function make(size) {
    if (typeof SharedArrayBuffer === "undefined") {
        return new ArrayBuffer(size);
    }
    return new SharedArrayBuffer(size);
}
export const shared = { SharedArrayBuffer, kind: `${SharedArrayBuffer.name}` };
class Pool extends SharedArrayBuffer {
    static SharedArrayBuffer = 1;
}
"#;

    fn unit(source: &str) -> SourceUnit {
        SourceUnit::new("mixed.js", Language::JavaScript, source.to_string())
    }

    #[test]
    fn test_occurrence_count_equals_identifier_nodes() {
        let root = parse(Path::new("mixed.js"), MIXED, Language::JavaScript).unwrap();

        let mut identifier_nodes = 0;
        let mut spelled_anywhere = 0;
        for_each_node(&root, |node| {
            if node.name() == Some(DEFAULT_TARGET) {
                spelled_anywhere += 1;
                if node.kind() == NodeKind::Identifier {
                    identifier_nodes += 1;
                }
            }
        });

        let found = find_references(&root, DEFAULT_TARGET).unwrap();
        assert_eq!(found.len(), identifier_nodes);
        // typeof, new, shorthand, template substitution, extends
        assert_eq!(found.len(), 5);
        // destructuring key and static field name are property keys
        assert!(spelled_anywhere > identifier_nodes);
    }

    #[test]
    fn test_occurrences_are_non_decreasing() {
        let result = scan_source(&unit(MIXED), DEFAULT_TARGET).unwrap();
        let starts: Vec<_> = result
            .occurrences
            .iter()
            .map(|o| o.span.expect("located").start)
            .collect();
        assert!(starts.windows(2).all(|pair| pair[0] <= pair[1]), "{starts:?}");
    }

    #[test]
    fn test_scan_is_idempotent() {
        let first = scan_source(&unit(MIXED), DEFAULT_TARGET).unwrap();
        let second = scan_source(&unit(MIXED), DEFAULT_TARGET).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_free_file_has_no_matches() {
        let result = scan_source(
            &unit("const s = 'SharedArrayBuffer'; // SharedArrayBuffer\n"),
            DEFAULT_TARGET,
        )
        .unwrap();
        assert!(!result.has_matches());
        assert!(result.occurrences.is_empty());
    }

    #[test]
    fn test_directory_pipeline_end_to_end() {
        let workspace = TempDir::new().unwrap();
        let root = workspace.path();
        std::fs::write(root.join("a.js"), "new SharedArrayBuffer(1);\n").unwrap();
        std::fs::write(root.join("b.js"), "'SharedArrayBuffer';\n").unwrap();
        std::fs::write(root.join("a.txt"), "SharedArrayBuffer\n").unwrap();
        std::fs::write(root.join(".c.js"), "SharedArrayBuffer;\n").unwrap();

        let discovery = list_files_from(root, &[PathBuf::from(".")], &DiscoverOptions::default());
        assert_eq!(discovery.files, vec![root.join("a.js"), root.join("b.js")]);

        let reports = scan_files(&discovery.files, &ScanOptions::default()).unwrap();
        let report = Report::new(DEFAULT_TARGET, &reports, &discovery.failures);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let summary = report.write_text(&mut out, &mut err).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(summary.files_using, 1);
        assert_eq!(summary.files_free, 1);
        assert_eq!(summary.exit_code(), 1);
        assert!(out.contains("  [1] 1:4-21\n"));
        assert!(out.ends_with("1 files use SharedArrayBuffer.\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_deeply_nested_source_scans() {
        let depth = 1_000;
        let mut source = String::new();
        for _ in 0..depth {
            source.push_str("[");
        }
        source.push_str("SharedArrayBuffer");
        for _ in 0..depth {
            source.push_str("]");
        }
        source.push_str(";\n");

        let result = scan_source(&unit(&source), DEFAULT_TARGET).unwrap();
        assert_eq!(result.len(), 1);
        let span = result.occurrences[0].span.unwrap();
        assert_eq!(span.start.column, depth);
    }
}
