//! Line-level rule scanner
//!
//! Runs a fixed, ordered set of independent per-line predicates over the
//! whole file, top to bottom. Each predicate is pure text-in/findings-out and
//! carries its own rule and severity; no predicate short-circuits another,
//! so one line can produce several findings.
//!
//! The two promise rules (`no-floating-promise`, `no-unnecessary-await`) are
//! single-line heuristics: chains split across lines are not tracked. That
//! scope limitation is intentional and pinned by tests.

use crate::models::Finding;
use crate::rules;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

static ANY_PATTERN: OnceLock<Regex> = OnceLock::new();
static NON_NULL_PATTERN: OnceLock<Regex> = OnceLock::new();
static PROMISE_CHAIN_PATTERN: OnceLock<Regex> = OnceLock::new();
static AWAIT_HEAD_PATTERN: OnceLock<Regex> = OnceLock::new();
static CONSOLE_PATTERN: OnceLock<Regex> = OnceLock::new();
static MARKER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn any_pattern() -> &'static Regex {
    ANY_PATTERN.get_or_init(|| {
        Regex::new(r":\s*any\b|\bas\s+any\b|<any>").expect("valid regex")
    })
}

fn non_null_pattern() -> &'static Regex {
    NON_NULL_PATTERN.get_or_init(|| {
        // value `!` followed by member access or a statement terminator;
        // `!=`/`!==` never match because `=` follows the bang
        Regex::new(r"[A-Za-z0-9_\)\]]!(\.|\s*;)").expect("valid regex")
    })
}

fn promise_chain_pattern() -> &'static Regex {
    PROMISE_CHAIN_PATTERN.get_or_init(|| {
        Regex::new(r"\.(then|catch|finally)\s*\(").expect("valid regex")
    })
}

fn await_head_pattern() -> &'static Regex {
    AWAIT_HEAD_PATTERN.get_or_init(|| {
        Regex::new(r"\bawait\s+([A-Za-z_$][A-Za-z0-9_$]*)").expect("valid regex")
    })
}

fn console_pattern() -> &'static Regex {
    CONSOLE_PATTERN.get_or_init(|| {
        Regex::new(r"\bconsole\.(log|warn|error|info|debug|trace)\s*\(").expect("valid regex")
    })
}

fn marker_pattern() -> &'static Regex {
    MARKER_PATTERN.get_or_init(|| Regex::new(r"\b(TODO|FIXME|HACK|XXX)\b").expect("valid regex"))
}

/// Name fragments that suggest an identifier produces a promise. An `await`
/// whose head identifier contains none of these is flagged.
const PROMISE_NAME_HINTS: &[&str] = &[
    "fetch", "get", "load", "save", "read", "write", "query", "request", "send", "find",
    "create", "update", "delete", "sync", "wait", "promise", "exec", "connect", "open",
    "invoke", "import", "then", "all",
];

/// Run every line predicate against every line of `content`.
pub fn scan(path: &Path, content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = (idx + 1) as u32;

        if any_pattern().is_match(line) {
            findings.push(Finding::new(
                &rules::NO_ANY,
                path,
                line_num,
                "Explicit `any` defeats the type checker".to_string(),
            ));
        }

        if non_null_pattern().is_match(line) {
            findings.push(Finding::new(
                &rules::NO_NON_NULL_ASSERTION,
                path,
                line_num,
                "Non-null assertion hides a possible null/undefined".to_string(),
            ));
        }

        if is_floating_promise(line) {
            findings.push(Finding::new(
                &rules::NO_FLOATING_PROMISE,
                path,
                line_num,
                "Promise chain is not awaited, returned, or voided".to_string(),
            ));
        }

        if let Some(head) = unnecessary_await_head(line) {
            findings.push(Finding::new(
                &rules::NO_UNNECESSARY_AWAIT,
                path,
                line_num,
                format!("`await {head}` does not look like it awaits a promise"),
            ));
        }

        if console_pattern().is_match(line) {
            findings.push(Finding::new(
                &rules::NO_CONSOLE,
                path,
                line_num,
                "Console statement should be removed or routed through the logger".to_string(),
            ));
        }

        if let Some(marker) = marker_in_comment(line) {
            findings.push(Finding::new(
                &rules::NO_TODO_COMMENT,
                path,
                line_num,
                format!("Unresolved {marker} comment"),
            ));
        }

        let length = line.chars().count();
        if length > rules::MAX_LINE_CHARS {
            findings.push(Finding::new(
                &rules::MAX_LINE_LENGTH,
                path,
                line_num,
                format!("Line is {length} characters (max {})", rules::MAX_LINE_CHARS),
            ));
        }

        if line.ends_with(' ') || line.ends_with('\t') {
            findings.push(Finding::new(
                &rules::NO_TRAILING_WHITESPACE,
                path,
                line_num,
                "Trailing whitespace".to_string(),
            ));
        }
    }

    findings
}

/// A `.then(`/`.catch(`/`.finally(` call with no awaiting or returning
/// context anywhere on the same line.
fn is_floating_promise(line: &str) -> bool {
    if !promise_chain_pattern().is_match(line) {
        return false;
    }
    !(line.contains("await") || line.contains("return") || line.contains("void "))
}

/// The head identifier of an `await` expression, when that identifier does
/// not textually resemble a promise-producing name.
fn unnecessary_await_head(line: &str) -> Option<String> {
    let caps = await_head_pattern().captures(line)?;
    let head = caps.get(1)?.as_str();
    if head == "Promise" {
        return None;
    }
    let lower = head.to_lowercase();
    if PROMISE_NAME_HINTS.iter().any(|hint| lower.contains(hint)) {
        None
    } else {
        Some(head.to_string())
    }
}

/// The marker token when the line carries a TODO-style marker inside a
/// comment. Markers in plain code or string literals are ignored.
fn marker_in_comment(line: &str) -> Option<&str> {
    let comment_start = match (line.find("//"), line.find("/*")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    let tail = match comment_start {
        Some(idx) => &line[idx..],
        // continuation lines of block comments
        None if line.trim_start().starts_with('*') => line,
        None => return None,
    };
    marker_pattern()
        .captures(tail)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Severity;
    use std::path::PathBuf;

    fn scan_str(content: &str) -> Vec<Finding> {
        scan(&PathBuf::from("src/app.ts"), content)
    }

    fn rules_of(findings: &[Finding]) -> Vec<&'static str> {
        findings.iter().map(|f| f.rule).collect()
    }

    #[test]
    fn test_detects_explicit_any() {
        let findings = scan_str("const x: any = 1;\n");
        assert_eq!(rules_of(&findings), vec!["no-any"]);
        assert_eq!(findings[0].severity, Severity::Error);
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn test_detects_as_any_and_generic_any() {
        assert_eq!(rules_of(&scan_str("const y = value as any;\n")), vec!["no-any"]);
        assert_eq!(rules_of(&scan_str("const z = <any>value;\n")), vec!["no-any"]);
    }

    #[test]
    fn test_anything_is_not_any() {
        assert!(scan_str("const anything = 1;\nlet company: string;\n").is_empty());
    }

    #[test]
    fn test_non_null_assertion() {
        assert_eq!(
            rules_of(&scan_str("const name = user!.name;\n")),
            vec!["no-non-null-assertion"]
        );
        assert_eq!(
            rules_of(&scan_str("const v = lookup(key)!;\n")),
            vec!["no-non-null-assertion"]
        );
    }

    #[test]
    fn test_inequality_is_not_non_null() {
        assert!(scan_str("if (a != b) { f(); }\n").is_empty());
        assert!(scan_str("if (a !== b) { f(); }\n").is_empty());
    }

    #[test]
    fn test_floating_promise() {
        let findings = scan_str("doWork().then(handle);\n");
        assert_eq!(rules_of(&findings), vec!["no-floating-promise"]);
        assert_eq!(findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_awaited_or_returned_chain_is_not_floating() {
        assert!(scan_str("return doWork().then(handle);\n").is_empty());
        assert!(scan_str("await fetchItems().catch(log);\n").is_empty());
        assert!(scan_str("void doWork().then(handle);\n").is_empty());
    }

    #[test]
    fn test_unnecessary_await() {
        let findings = scan_str("const total = await computeTotal(items);\n");
        assert_eq!(rules_of(&findings), vec!["no-unnecessary-await"]);
        assert!(findings[0].message.contains("computeTotal"));
    }

    #[test]
    fn test_await_of_promisey_name_is_fine() {
        assert!(scan_str("const user = await fetchUser(id);\n").is_empty());
        assert!(scan_str("const rows = await queryRows(db);\n").is_empty());
        assert!(scan_str("await Promise.resolve(1);\n").is_empty());
    }

    #[test]
    fn test_console_statements() {
        let findings = scan_str("console.log('a');\nconsole.warn('b');\nconsole.error('c');\n");
        assert_eq!(
            rules_of(&findings),
            vec!["no-console", "no-console", "no-console"]
        );
        assert_eq!(
            findings.iter().map(|f| f.line).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_marker_comment_includes_token() {
        let findings = scan_str("// FIXME: handle the empty case\n");
        assert_eq!(rules_of(&findings), vec!["no-todo-comment"]);
        assert!(findings[0].message.contains("FIXME"));
    }

    #[test]
    fn test_marker_outside_comment_is_ignored() {
        assert!(scan_str("const TODO = loadTasks();\n").is_empty());
    }

    #[test]
    fn test_block_comment_continuation_marker() {
        let findings = scan_str("/*\n * HACK around the flaky upstream API\n */\n");
        assert_eq!(rules_of(&findings), vec!["no-todo-comment"]);
        assert_eq!(findings[0].line, 2);
    }

    #[test]
    fn test_long_line_reports_length() {
        let long = format!("const s = \"{}\";\n", "x".repeat(130));
        let findings = scan_str(&long);
        assert_eq!(rules_of(&findings), vec!["max-line-length"]);
        assert!(findings[0].message.contains("143"));
    }

    #[test]
    fn test_trailing_whitespace() {
        assert_eq!(
            rules_of(&scan_str("const a = 1;  \n")),
            vec!["no-trailing-whitespace"]
        );
        assert!(scan_str("const a = 1;\n").is_empty());
    }

    #[test]
    fn test_predicates_do_not_short_circuit() {
        // one line can trip several rules at once
        let line = format!("console.log(x!.y as any);{}\n", " ".repeat(100));
        let findings = scan_str(&line);
        let rules = rules_of(&findings);
        assert!(rules.contains(&"no-any"));
        assert!(rules.contains(&"no-non-null-assertion"));
        assert!(rules.contains(&"no-console"));
        assert!(rules.contains(&"max-line-length"));
        assert!(rules.contains(&"no-trailing-whitespace"));
    }

    #[test]
    fn test_finding_count_matches_matching_lines() {
        let content = "console.log(1);\nconst a = 1;\nconsole.log(2);\nconsole.log(3);\n";
        let count = scan_str(content)
            .iter()
            .filter(|f| f.rule == "no-console")
            .count();
        assert_eq!(count, 3);
    }
}
