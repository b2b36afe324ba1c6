//! Identifier reference finding.
//!
//! Collects identifier nodes whose name equals a target, in traversal order.
//!
//! # Key Concepts
//! - **Reference**: a node the grammar tags as an identifier (variables,
//!   parameters, shorthand properties, type references).
//! - **Not a reference**: strings, template text, regexes, comments,
//!   property names after `.`, object keys, labels, `#private` names.
//! - **Global object members**: the property in `globalThis.X`,
//!   `window.X`, `self.X` and `global.X` is a reference to the global `X`.
//! - **Shadowing**: not resolved. A local binding named like the target is
//!   reported like any other occurrence.

use crate::error::Result;
use crate::syntax::walk::{walk, Descend, Visitor};
use crate::syntax::{NodeKind, Span, SyntaxNode};
use serde::Serialize;

/// An identifier node matching the target name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifierOccurrence {
    /// Identifier text.
    pub name: String,
    /// Location of the identifier token, when known.
    pub span: Option<Span>,
}

/// Visitor recording identifiers equal to a fixed name.
#[derive(Debug, Clone)]
pub struct IdentifierMatcher {
    target: String,
    matches: Vec<IdentifierOccurrence>,
}

impl IdentifierMatcher {
    /// Create a matcher for `target` (exact, case-sensitive).
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            matches: Vec::new(),
        }
    }

    /// Name being searched for.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether `node` is an identifier reference to the target.
    pub fn is_match(&self, node: &SyntaxNode) -> bool {
        node.kind() == NodeKind::Identifier && node.name() == Some(self.target.as_str())
    }

    /// Matches recorded so far, in visitation order.
    pub fn matches(&self) -> &[IdentifierOccurrence] {
        &self.matches
    }

    /// Consume the matcher, returning its matches.
    pub fn into_matches(self) -> Vec<IdentifierOccurrence> {
        self.matches
    }
}

impl Visitor for IdentifierMatcher {
    fn enter(&mut self, node: &SyntaxNode) -> Result<Descend> {
        if self.is_match(node) {
            self.matches.push(IdentifierOccurrence {
                name: self.target.clone(),
                span: node.span().copied(),
            });
        }
        Ok(Descend::Children)
    }
}

/// Find all references to `target` under `root`, in source order.
pub fn find_references(root: &SyntaxNode, target: &str) -> Result<Vec<IdentifierOccurrence>> {
    let mut matcher = IdentifierMatcher::new(target);
    walk(root, &mut matcher)?;
    Ok(matcher.into_matches())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::detect::Language;
    use crate::syntax::javascript::parse;
    use crate::syntax::Position;
    use std::path::Path;

    const TARGET: &str = "SharedArrayBuffer";

    fn count(source: &str) -> usize {
        occurrences(source).len()
    }

    fn occurrences(source: &str) -> Vec<IdentifierOccurrence> {
        let root = parse(Path::new("test.js"), source, Language::JavaScript).unwrap();
        find_references(&root, TARGET).unwrap()
    }

    #[test]
    fn test_constructor_call_is_one_reference() {
        let found = occurrences("const x = new SharedArrayBuffer(10);\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, TARGET);
        let span = found[0].span.unwrap();
        assert_eq!(span.start, Position::new(1, 14));
        assert_eq!(span.end, Position::new(1, 31));
    }

    #[test]
    fn test_string_literal_is_not_reference() {
        assert_eq!(count("const s = \"SharedArrayBuffer\";\n"), 0);
        assert_eq!(count("const s = 'SharedArrayBuffer';\n"), 0);
    }

    #[test]
    fn test_comments_are_not_references() {
        assert_eq!(
            count("// SharedArrayBuffer\n/* SharedArrayBuffer */\nlet a;\n"),
            0
        );
    }

    #[test]
    fn test_template_text_vs_substitution() {
        assert_eq!(count("`SharedArrayBuffer`;\n"), 0);
        assert_eq!(count("String.raw`SharedArrayBuffer`;\n"), 0);
        assert_eq!(count("`size ${SharedArrayBuffer.length}`;\n"), 1);
    }

    #[test]
    fn test_regex_is_not_reference() {
        assert_eq!(count("/SharedArrayBuffer/.test(s);\n"), 0);
    }

    #[test]
    fn test_property_names_and_keys_are_not_references() {
        assert_eq!(count("obj.SharedArrayBuffer;\n"), 0);
        assert_eq!(count("obj?.SharedArrayBuffer;\n"), 0);
        assert_eq!(count("const o = { SharedArrayBuffer: 1 };\n"), 0);
        assert_eq!(count("class A { SharedArrayBuffer() {} }\n"), 0);
    }

    #[test]
    fn test_global_object_property_is_reference() {
        assert_eq!(count("globalThis.SharedArrayBuffer;\n"), 1);
        assert_eq!(count("new window.SharedArrayBuffer(8);\n"), 1);
        assert_eq!(count("self.SharedArrayBuffer.prototype;\n"), 1);
        assert_eq!(count("if (global.SharedArrayBuffer) {}\n"), 1);

        let found = occurrences("const B = globalThis.SharedArrayBuffer;\n");
        let span = found[0].span.unwrap();
        assert_eq!(span.start, Position::new(1, 21));
        assert_eq!(span.end, Position::new(1, 38));
    }

    #[test]
    fn test_shorthand_property_is_reference() {
        assert_eq!(count("const o = { SharedArrayBuffer };\n"), 1);
        assert_eq!(count("const { SharedArrayBuffer } = globalThis;\n"), 1);
    }

    #[test]
    fn test_labels_are_not_references() {
        assert_eq!(
            count("SharedArrayBuffer: for (;;) { break SharedArrayBuffer; }\n"),
            0
        );
    }

    #[test]
    fn test_match_is_exact_and_case_sensitive() {
        assert_eq!(count("sharedArrayBuffer; SharedArrayBuffers; Shared;\n"), 0);
    }

    #[test]
    fn test_shadowing_bindings_still_count() {
        let source = "function f(SharedArrayBuffer) {\n  return SharedArrayBuffer;\n}\n";
        assert_eq!(count(source), 2);
    }

    #[test]
    fn test_occurrences_are_in_source_order() {
        let source = "\
if (typeof SharedArrayBuffer !== 'undefined') {
  const a = new SharedArrayBuffer(8), b = SharedArrayBuffer.prototype;
  f(SharedArrayBuffer, [SharedArrayBuffer]);
}
";
        let found = occurrences(source);
        assert_eq!(found.len(), 5);
        let starts: Vec<_> = found.iter().map(|o| o.span.unwrap().start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
        assert_eq!(starts[0], Position::new(1, 11));
    }

    #[test]
    fn test_matcher_counts_every_target_identifier_node() {
        let source = "let a = SharedArrayBuffer; let b = other; a = SharedArrayBuffer;\n";
        let root = parse(Path::new("test.js"), source, Language::JavaScript).unwrap();

        let mut expected = 0;
        crate::syntax::walk::for_each_node(&root, |node| {
            if node.kind() == NodeKind::Identifier && node.name() == Some(TARGET) {
                expected += 1;
            }
        });

        assert_eq!(find_references(&root, TARGET).unwrap().len(), expected);
        assert_eq!(expected, 2);
    }
}
