//! Hardcoded JSX text heuristic
//!
//! Flags literal text between JSX tags in `.tsx`/`.jsx` files that should go
//! through the translation layer. Two exemptions are kept as-is even though
//! they can over- and under-fire on text nodes with nested expressions:
//! all-caps tokens are skipped, and brace-wrapped expressions never match
//! (the scan pattern excludes `{}`).

use crate::models::Finding;
use crate::rules;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

static JSX_TEXT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn jsx_text_pattern() -> &'static Regex {
    JSX_TEXT_PATTERN.get_or_init(|| {
        Regex::new(r">([^<>{}]*[A-Za-z][^<>{}]*)<").expect("valid regex")
    })
}

/// Scan one `.tsx`/`.jsx` file for hardcoded display text.
pub fn scan(path: &Path, content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") || trimmed.starts_with('*') || trimmed.starts_with("/*") {
            continue;
        }

        for caps in jsx_text_pattern().captures_iter(line) {
            let text = caps[1].trim();
            if text.is_empty() || is_all_caps(text) {
                continue;
            }
            findings.push(Finding::new(
                &rules::NO_HARDCODED_TEXT,
                path,
                (idx + 1) as u32,
                format!("Hardcoded text \"{}\" in JSX markup", truncate(text, 40)),
            ));
        }
    }

    findings
}

/// Tokens like `OK`, `API`, or `FAQ` are treated as abbreviations, not copy.
fn is_all_caps(text: &str) -> bool {
    text.chars()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_uppercase())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}
