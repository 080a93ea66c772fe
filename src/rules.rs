//! The fixed rule catalogue.
//!
//! Every finding references one of these rules by identifier. The catalogue
//! is static for the lifetime of a run; thresholds are fixed constants and
//! are deliberately not configurable.

use crate::models::Severity;

/// Maximum direct statements in a function body before
/// `max-lines-per-function` fires.
pub const MAX_FUNCTION_STATEMENTS: usize = 50;

/// Maximum cyclomatic complexity before `cyclomatic-complexity` fires.
pub const MAX_COMPLEXITY: u32 = 10;

/// Maximum line length in characters before `max-line-length` fires.
pub const MAX_LINE_CHARS: usize = 120;

/// A fixed, named check with a default severity and description.
#[derive(Debug)]
pub struct Rule {
    pub id: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub description: &'static str,
}

pub static NO_ANY: Rule = Rule {
    id: "no-any",
    category: "types",
    severity: Severity::Error,
    description: "Explicit `any` annotation or assertion erases type safety",
};

pub static NO_NON_NULL_ASSERTION: Rule = Rule {
    id: "no-non-null-assertion",
    category: "types",
    severity: Severity::Warning,
    description: "Non-null assertion (`!`) bypasses null checking",
};

pub static NO_FLOATING_PROMISE: Rule = Rule {
    id: "no-floating-promise",
    category: "async",
    severity: Severity::Error,
    description: "Promise chain is neither awaited nor returned (single-line heuristic)",
};

pub static NO_UNNECESSARY_AWAIT: Rule = Rule {
    id: "no-unnecessary-await",
    category: "async",
    severity: Severity::Warning,
    description: "Awaited call does not look like it produces a promise (single-line heuristic)",
};

pub static NO_CONSOLE: Rule = Rule {
    id: "no-console",
    category: "debugging",
    severity: Severity::Warning,
    description: "Console statement left in code",
};

pub static NO_TODO_COMMENT: Rule = Rule {
    id: "no-todo-comment",
    category: "maintenance",
    severity: Severity::Info,
    description: "Unresolved TODO/FIXME/HACK/XXX marker comment",
};

pub static MAX_LINE_LENGTH: Rule = Rule {
    id: "max-line-length",
    category: "style",
    severity: Severity::Info,
    description: "Line exceeds 120 characters",
};

pub static NO_TRAILING_WHITESPACE: Rule = Rule {
    id: "no-trailing-whitespace",
    category: "style",
    severity: Severity::Info,
    description: "Line has trailing whitespace",
};

pub static MAX_LINES_PER_FUNCTION: Rule = Rule {
    id: "max-lines-per-function",
    category: "complexity",
    severity: Severity::Warning,
    description: "Function body has more than 50 direct statements",
};

pub static CYCLOMATIC_COMPLEXITY: Rule = Rule {
    id: "cyclomatic-complexity",
    category: "complexity",
    severity: Severity::Warning,
    description: "Function cyclomatic complexity exceeds 10",
};

pub static NO_DUPLICATE_IMPORTS: Rule = Rule {
    id: "no-duplicate-imports",
    category: "imports",
    severity: Severity::Warning,
    description: "Module imported more than once in the same file",
};

pub static NO_HARDCODED_TEXT: Rule = Rule {
    id: "no-hardcoded-text",
    category: "i18n",
    severity: Severity::Warning,
    description: "Literal text in JSX markup should go through the translation layer",
};

/// All rules, in catalogue order.
pub static CATALOGUE: &[&Rule] = &[
    &NO_ANY,
    &NO_NON_NULL_ASSERTION,
    &NO_FLOATING_PROMISE,
    &NO_UNNECESSARY_AWAIT,
    &NO_CONSOLE,
    &NO_TODO_COMMENT,
    &MAX_LINE_LENGTH,
    &NO_TRAILING_WHITESPACE,
    &MAX_LINES_PER_FUNCTION,
    &CYCLOMATIC_COMPLEXITY,
    &NO_DUPLICATE_IMPORTS,
    &NO_HARDCODED_TEXT,
];

/// Look up a rule by identifier.
pub fn find(id: &str) -> Option<&'static Rule> {
    CATALOGUE.iter().copied().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalogue_ids_unique() {
        let ids: HashSet<_> = CATALOGUE.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), CATALOGUE.len());
    }

    #[test]
    fn test_find_known_rule() {
        let rule = find("cyclomatic-complexity").expect("rule should exist");
        assert_eq!(rule.category, "complexity");
        assert_eq!(rule.severity, Severity::Warning);
    }

    #[test]
    fn test_find_unknown_rule() {
        assert!(find("no-such-rule").is_none());
    }

    #[test]
    fn test_default_severities() {
        assert_eq!(NO_ANY.severity, Severity::Error);
        assert_eq!(NO_FLOATING_PROMISE.severity, Severity::Error);
        assert_eq!(NO_CONSOLE.severity, Severity::Warning);
        assert_eq!(NO_TODO_COMMENT.severity, Severity::Info);
    }
}
