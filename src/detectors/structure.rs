//! Structural analyzer
//!
//! Parses a file with tree-sitter and walks the tree depth-first, measuring
//! every function-like construct with a braced body: direct statement count
//! and cyclomatic complexity, each checked against a fixed threshold.
//!
//! Complexity is scored per construct. The branch walk covers the whole
//! subtree of a function but stops at nested function-like nodes; each nested
//! construct gets its own independent score when the outer traversal reaches
//! it. A file that fails to parse yields an error here so the caller can drop
//! this pass and keep the text-based detectors running.

use crate::models::Finding;
use crate::rules;
use anyhow::{bail, Context, Result};
use std::path::Path;
use tree_sitter::{Language, Node, Parser};

/// Node kinds that open a new function scope.
const FUNCTION_KINDS: &[&str] = &[
    "function_declaration",
    "generator_function_declaration",
    "function_expression",
    "generator_function",
    "arrow_function",
    "method_definition",
];

fn is_function_like(kind: &str) -> bool {
    FUNCTION_KINDS.contains(&kind)
}

/// Metrics for one function-like construct.
#[derive(Debug)]
struct FunctionMetrics {
    name: Option<String>,
    line: u32,
    column: u32,
    statements: usize,
    complexity: u32,
}

/// Analyze `source` and emit threshold findings for every function-like
/// construct. Returns an error when the content does not parse as valid
/// syntax for its extension.
pub fn analyze(path: &Path, source: &str, ext: &str) -> Result<Vec<Finding>> {
    let metrics = collect_metrics(source, ext)
        .with_context(|| format!("structural pass failed for {}", path.display()))?;

    let mut findings = Vec::new();
    for m in metrics {
        let label = m.name.as_deref().unwrap_or("<anonymous>");
        if m.statements > rules::MAX_FUNCTION_STATEMENTS {
            findings.push(
                Finding::new(
                    &rules::MAX_LINES_PER_FUNCTION,
                    path,
                    m.line,
                    format!(
                        "Function '{label}' has {} statements (max {})",
                        m.statements,
                        rules::MAX_FUNCTION_STATEMENTS
                    ),
                )
                .with_column(m.column),
            );
        }
        if m.complexity > rules::MAX_COMPLEXITY {
            findings.push(
                Finding::new(
                    &rules::CYCLOMATIC_COMPLEXITY,
                    path,
                    m.line,
                    format!(
                        "Function '{label}' has cyclomatic complexity {} (max {})",
                        m.complexity,
                        rules::MAX_COMPLEXITY
                    ),
                )
                .with_column(m.column),
            );
        }
    }
    Ok(findings)
}

/// Parse and measure every braced function-like construct in the file.
fn collect_metrics(source: &str, ext: &str) -> Result<Vec<FunctionMetrics>> {
    let language: Language = match ext {
        "ts" => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        "tsx" => tree_sitter_typescript::LANGUAGE_TSX.into(),
        _ => tree_sitter_javascript::LANGUAGE.into(),
    };

    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .context("failed to load grammar")?;

    let tree = parser.parse(source, None).context("parser produced no tree")?;
    let root = tree.root_node();
    if root.has_error() {
        bail!("content has syntax errors");
    }

    let mut metrics = Vec::new();
    visit(&root, source.as_bytes(), &mut metrics);
    Ok(metrics)
}

/// Depth-first walk over every node. Function-like nodes with a braced body
/// are measured; recursion continues regardless, so nested constructs are
/// evaluated independently.
fn visit(node: &Node, source: &[u8], metrics: &mut Vec<FunctionMetrics>) {
    if is_function_like(node.kind()) {
        if let Some(body) = node.child_by_field_name("body") {
            if body.kind() == "statement_block" {
                metrics.push(measure(node, &body, source));
            }
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit(&child, source, metrics);
    }
}

fn measure(func: &Node, body: &Node, source: &[u8]) -> FunctionMetrics {
    let mut cursor = body.walk();
    let statements = body
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .count();

    let mut complexity = 1u32;
    let mut cursor = func.walk();
    for child in func.children(&mut cursor) {
        count_branches(&child, &mut complexity);
    }

    FunctionMetrics {
        name: function_name(func, source),
        line: func.start_position().row as u32 + 1,
        column: func.start_position().column as u32 + 1,
        statements,
        complexity,
    }
}

/// Add one per branching construct in the subtree, stopping at nested
/// function scopes (those are scored on their own visit).
fn count_branches(node: &Node, complexity: &mut u32) {
    if is_function_like(node.kind()) {
        return;
    }

    match node.kind() {
        "if_statement" | "while_statement" | "do_statement" | "for_statement"
        | "for_in_statement" => {
            *complexity += 1;
        }
        "ternary_expression" => {
            *complexity += 1;
        }
        "catch_clause" => {
            *complexity += 1;
        }
        "switch_case" => {
            if non_empty_case(node) {
                *complexity += 1;
            }
        }
        "binary_expression" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if child.kind() == "&&" || child.kind() == "||" {
                    *complexity += 1;
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        count_branches(&child, complexity);
    }
}

/// A `case` clause with at least one statement in its body. Empty
/// fall-through cases add no execution path.
fn non_empty_case(case: &Node) -> bool {
    let mut cursor = case.walk();
    let has_stmt = case
        .children_by_field_name("body", &mut cursor)
        .any(|c| c.kind() != "comment");
    has_stmt
}

/// Recover a display name for the construct: the `name` field when present,
/// otherwise the variable an arrow/function expression is assigned to.
fn function_name(node: &Node, source: &[u8]) -> Option<String> {
    if let Some(name) = node.child_by_field_name("name") {
        return name.utf8_text(source).ok().map(|s| s.to_string());
    }
    let parent = node.parent()?;
    match parent.kind() {
        "variable_declarator" | "pair" | "public_field_definition" => parent
            .child_by_field_name("name")
            .or_else(|| parent.child_by_field_name("key"))
            .and_then(|n| n.utf8_text(source).ok())
            .map(|s| s.to_string()),
        _ => None,
    }
}
