//! JavaScript-family parsing with tree-sitter.
//!
//! Parses JavaScript, TypeScript and TSX sources with the matching
//! tree-sitter grammar and lowers the result into an owned [`SyntaxNode`]
//! tree. Lowering keeps named nodes only; punctuation and keyword tokens are
//! dropped. Positions follow JavaScript conventions: lines end at `\n`,
//! `\r\n`, `\r`, U+2028 and U+2029, columns count UTF-16 code units.
//!
//! The property of a member access on a global object (`globalThis.X`,
//! `window.X`, `self.X`, `global.X`) names the global itself, so it is
//! lowered as an identifier. Other property names stay property keys.

use crate::error::{Result, ScanError};
use crate::ingest::detect::Language;
use crate::syntax::{NodeKind, Position, Span, SyntaxNode};
use std::path::Path;

/// Parse `source` and return the root `program` node.
///
/// tree-sitter recovers from syntax errors; this function does not. Any
/// `ERROR` or `MISSING` node in the parse turns into [`ScanError::Parse`]
/// pointing at the first such node.
pub fn parse(path: &Path, source: &str, language: Language) -> Result<SyntaxNode> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&grammar(language))
        .map_err(|e| ScanError::Language {
            message: format!("Failed to set {} language: {:?}", language.as_str(), e),
        })?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ScanError::Parse {
            file: path.to_path_buf(),
            line: 1,
            column: 0,
            message: "Parse failed - no tree returned".to_string(),
        })?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(syntax_error(path, source, root));
    }

    log::trace!(
        "parsed {} as {} ({} bytes)",
        path.display(),
        language.as_str(),
        source.len()
    );

    Ok(lower(root, source))
}

fn grammar(language: Language) -> tree_sitter::Language {
    match language {
        Language::JavaScript => tree_sitter_javascript::language(),
        Language::TypeScript => tree_sitter_typescript::language_typescript(),
        Language::Tsx => tree_sitter_typescript::language_tsx(),
    }
}

/// Build a parse error for the first `ERROR` or `MISSING` node.
fn syntax_error(path: &Path, source: &str, root: tree_sitter::Node) -> ScanError {
    let (position, message) = match first_error(root) {
        Some(node) => {
            let position = LineIndex::new(source).position(node.start_byte());
            let message = if node.is_missing() {
                format!("missing `{}`", node.kind())
            } else {
                unexpected(node, source)
            };
            (position, message)
        }
        None => (Position::new(1, 0), "syntax error".to_string()),
    };

    ScanError::Parse {
        file: path.to_path_buf(),
        line: position.line,
        column: position.column,
        message,
    }
}

fn unexpected(node: tree_sitter::Node, source: &str) -> String {
    let text = node
        .utf8_text(source.as_bytes())
        .unwrap_or_default()
        .split_whitespace()
        .next()
        .unwrap_or_default();

    if text.is_empty() {
        return "unexpected end of input".to_string();
    }

    let snippet: String = text.chars().take(24).collect();
    format!("unexpected `{}`", snippet)
}

/// Pre-order search that only enters subtrees containing errors.
fn first_error(root: tree_sitter::Node) -> Option<tree_sitter::Node> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Byte offset → line/column mapping using ECMAScript line terminators.
///
/// tree-sitter rows break on `\n` only, but a lone `\r`, U+2028 and U+2029
/// also end a line in JavaScript. Columns are UTF-16 code units, the unit
/// JavaScript tooling reports.
struct LineIndex<'a> {
    source: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let mut starts = vec![0];
        let mut chars = source.char_indices().peekable();
        while let Some((offset, c)) = chars.next() {
            match c {
                '\n' | '\u{2028}' | '\u{2029}' => starts.push(offset + c.len_utf8()),
                // `\r\n` is one terminator; the `\n` records it.
                '\r' if chars.peek().map(|&(_, next)| next) != Some('\n') => {
                    starts.push(offset + 1)
                }
                _ => {}
            }
        }
        Self { source, starts }
    }

    fn position(&self, byte: usize) -> Position {
        let line = match self.starts.binary_search(&byte) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.starts.get(line).copied().unwrap_or(0);
        let column = self
            .source
            .get(line_start..byte)
            .map_or(0, |prefix| prefix.chars().map(char::len_utf16).sum());
        Position::new(line + 1, column)
    }
}

/// Receivers whose non-computed properties name globals (`globalThis.X`).
const GLOBAL_OBJECTS: &[&str] = &["globalThis", "window", "self", "global"];

/// Whether `node` is the property of a member access on a global object.
fn is_global_member_property(node: tree_sitter::Node, source: &str) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    if parent.kind() != "member_expression" {
        return false;
    }
    let is_property = parent
        .child_by_field_name("property")
        .is_some_and(|property| property.id() == node.id());
    is_property
        && parent
            .child_by_field_name("object")
            .filter(|object| object.kind() == "identifier")
            .and_then(|object| object.utf8_text(source.as_bytes()).ok())
            .is_some_and(|receiver| GLOBAL_OBJECTS.contains(&receiver))
}

/// A node whose children are still being lowered.
struct Frame {
    kind: NodeKind,
    grammar_kind: &'static str,
    span: Option<Span>,
    name: Option<String>,
    children: Vec<SyntaxNode>,
}

impl Frame {
    fn open(node: tree_sitter::Node, source: &str, lines: &LineIndex) -> Self {
        let grammar_kind = node.kind();
        let kind = match NodeKind::from_grammar(grammar_kind) {
            NodeKind::PropertyKey if is_global_member_property(node, source) => {
                NodeKind::Identifier
            }
            kind => kind,
        };
        let span = Span::new(
            lines.position(node.start_byte()),
            lines.position(node.end_byte()),
        );
        let name = if kind.is_named_leaf() {
            node.utf8_text(source.as_bytes()).ok().map(str::to_string)
        } else {
            None
        };

        Self {
            kind,
            grammar_kind,
            span,
            name,
            children: Vec::new(),
        }
    }

    fn close(self) -> SyntaxNode {
        SyntaxNode::new(
            self.kind,
            self.grammar_kind,
            self.span,
            self.name,
            self.children,
        )
    }
}

/// Lower a tree-sitter tree without recursing on the call stack.
fn lower(root: tree_sitter::Node, source: &str) -> SyntaxNode {
    let lines = LineIndex::new(source);
    let mut program = Frame::open(root, source, &lines);
    let mut open: Vec<Frame> = Vec::new();

    let mut cursor = root.walk();
    if !cursor.goto_first_child() {
        return program.close();
    }
    let mut depth = 1usize;

    loop {
        let node = cursor.node();
        if node.is_named() {
            open.push(Frame::open(node, source, &lines));
            if cursor.goto_first_child() {
                depth += 1;
                continue;
            }
            close_innermost(&mut open, &mut program);
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            cursor.goto_parent();
            depth -= 1;
            if depth == 0 {
                return program.close();
            }
            close_innermost(&mut open, &mut program);
        }
    }
}

fn close_innermost(open: &mut Vec<Frame>, program: &mut Frame) {
    if let Some(frame) = open.pop() {
        let node = frame.close();
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => program.children.push(node),
        }
    }
}
