//! Owned syntax tree produced from tree-sitter parses.
//!
//! tree-sitter trees borrow their source and discriminate nodes only by a
//! string tag. The scanner lowers them into [`SyntaxNode`], which owns its
//! children, carries a checked [`Span`], and tags every node with a closed
//! [`NodeKind`].

pub mod javascript;
pub mod walk;

use serde::Serialize;
use std::cmp::Ordering;

/// A point in source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Line number (1-based).
    pub line: usize,
    /// Column (0-based, in UTF-16 code units).
    pub column: usize,
}

impl Position {
    /// Create a position from a 1-based line and 0-based column.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.line, self.column).cmp(&(other.line, other.column))
    }
}

/// Source range of a node.
///
/// `start <= end` always holds; construct through [`Span::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// First character covered by the node.
    pub start: Position,
    /// Position just past the last character.
    pub end: Position,
}

impl Span {
    /// Create a span, or `None` if `end` precedes `start`.
    pub fn new(start: Position, end: Position) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Whether the span starts and ends on the same line.
    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }
}

/// Grammar node kinds the scanner distinguishes.
///
/// Kinds that matter only as containers fall into [`NodeKind::Other`], which
/// keeps the grammar's own tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Root of a file.
    Program,
    /// Identifier in reference or binding position, including the property
    /// of a member access on a global object.
    Identifier,
    /// Property name after `.` or as an object/class key.
    PropertyKey,
    /// Statement label (`outer:`, `break outer`).
    Label,
    /// `#private` class member name.
    PrivateName,
    /// Quoted string literal.
    String,
    /// Raw text inside a string or template.
    StringFragment,
    /// Escape sequence inside a string or template.
    EscapeSequence,
    /// Template literal.
    TemplateString,
    /// `${...}` inside a template literal.
    TemplateSubstitution,
    /// Regular expression literal.
    Regex,
    /// Numeric literal.
    Number,
    /// Line or block comment.
    Comment,
    /// `a.b`
    MemberExpression,
    /// `a[b]`
    SubscriptExpression,
    /// `f(x)`
    CallExpression,
    /// `new C(x)`
    NewExpression,
    /// Argument list of a call.
    Arguments,
    /// `a = b`
    AssignmentExpression,
    /// `a + b`
    BinaryExpression,
    /// `typeof a`, `!a`
    UnaryExpression,
    /// `(a)`
    ParenthesizedExpression,
    /// `() => x`
    ArrowFunction,
    /// `function f() {}`
    FunctionDeclaration,
    /// `function () {}` in expression position.
    FunctionExpression,
    /// `class C {}`
    ClassDeclaration,
    /// `class {}` in expression position.
    ClassExpression,
    /// Method inside a class body.
    MethodDefinition,
    /// `x = 1` inside a declaration.
    VariableDeclarator,
    /// `let` / `const` declaration.
    LexicalDeclaration,
    /// `var` declaration.
    VariableDeclaration,
    /// Object literal.
    Object,
    /// `key: value` inside an object literal.
    Pair,
    /// Array literal.
    Array,
    /// `{ ... }` block.
    StatementBlock,
    /// Expression used as a statement.
    ExpressionStatement,
    /// `import ... from ...`
    ImportStatement,
    /// `export ...`
    ExportStatement,
    /// Any other named grammar node.
    Other(&'static str),
}

impl NodeKind {
    /// Map a tree-sitter node tag to a kind.
    pub fn from_grammar(kind: &'static str) -> Self {
        match kind {
            "program" => NodeKind::Program,
            "identifier"
            | "shorthand_property_identifier"
            | "shorthand_property_identifier_pattern"
            | "type_identifier" => NodeKind::Identifier,
            "property_identifier" => NodeKind::PropertyKey,
            "statement_identifier" => NodeKind::Label,
            "private_property_identifier" => NodeKind::PrivateName,
            "string" => NodeKind::String,
            "string_fragment" => NodeKind::StringFragment,
            "escape_sequence" => NodeKind::EscapeSequence,
            "template_string" => NodeKind::TemplateString,
            "template_substitution" => NodeKind::TemplateSubstitution,
            "regex" => NodeKind::Regex,
            "number" => NodeKind::Number,
            "comment" | "html_comment" => NodeKind::Comment,
            "member_expression" => NodeKind::MemberExpression,
            "subscript_expression" => NodeKind::SubscriptExpression,
            "call_expression" => NodeKind::CallExpression,
            "new_expression" => NodeKind::NewExpression,
            "arguments" => NodeKind::Arguments,
            "assignment_expression" => NodeKind::AssignmentExpression,
            "binary_expression" => NodeKind::BinaryExpression,
            "unary_expression" => NodeKind::UnaryExpression,
            "parenthesized_expression" => NodeKind::ParenthesizedExpression,
            "arrow_function" => NodeKind::ArrowFunction,
            "function_declaration" => NodeKind::FunctionDeclaration,
            "function_expression" | "function" => NodeKind::FunctionExpression,
            "class_declaration" => NodeKind::ClassDeclaration,
            "class" => NodeKind::ClassExpression,
            "method_definition" => NodeKind::MethodDefinition,
            "variable_declarator" => NodeKind::VariableDeclarator,
            "lexical_declaration" => NodeKind::LexicalDeclaration,
            "variable_declaration" => NodeKind::VariableDeclaration,
            "object" => NodeKind::Object,
            "pair" => NodeKind::Pair,
            "array" => NodeKind::Array,
            "statement_block" => NodeKind::StatementBlock,
            "expression_statement" => NodeKind::ExpressionStatement,
            "import_statement" => NodeKind::ImportStatement,
            "export_statement" => NodeKind::ExportStatement,
            other => NodeKind::Other(other),
        }
    }

    /// Whether nodes of this kind carry their source text as a name.
    pub fn is_named_leaf(&self) -> bool {
        matches!(
            self,
            NodeKind::Identifier | NodeKind::PropertyKey | NodeKind::Label | NodeKind::PrivateName
        )
    }
}

/// A node of the owned syntax tree.
#[derive(Debug, PartialEq)]
pub struct SyntaxNode {
    kind: NodeKind,
    grammar_kind: &'static str,
    span: Option<Span>,
    name: Option<String>,
    children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    /// Create a node.
    pub fn new(
        kind: NodeKind,
        grammar_kind: &'static str,
        span: Option<Span>,
        name: Option<String>,
        children: Vec<SyntaxNode>,
    ) -> Self {
        Self {
            kind,
            grammar_kind,
            span,
            name,
            children,
        }
    }

    /// Node kind.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The tree-sitter tag the node was lowered from.
    pub fn grammar_kind(&self) -> &'static str {
        self.grammar_kind
    }

    /// Source range, if the parser produced a consistent one.
    pub fn span(&self) -> Option<&Span> {
        self.span.as_ref()
    }

    /// Source text for identifier-like leaves.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Children in source order.
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }
}

// Generated or minified sources can nest thousands of levels deep, which the
// default recursive drop glue would turn into a stack overflow.
impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
