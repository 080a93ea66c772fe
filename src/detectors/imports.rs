//! Import duplication detector
//!
//! Text pass over the lines that begin an import declaration. The module
//! specifier is the first quoted string on the line; a specifier seen again
//! anywhere later in the file is reported exactly once, at the line of its
//! first occurrence. Multi-line import statements whose specifier sits on a
//! continuation line are not tracked.

use crate::models::Finding;
use crate::rules;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

static IMPORT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn import_pattern() -> &'static Regex {
    IMPORT_PATTERN.get_or_init(|| {
        Regex::new(r#"^\s*import\b[^'"]*['"]([^'"]+)['"]"#).expect("valid regex")
    })
}

/// Report each module specifier imported more than once, at its first
/// occurrence.
pub fn scan(path: &Path, content: &str) -> Vec<Finding> {
    let mut first_seen: HashMap<String, u32> = HashMap::new();
    let mut reported: HashSet<String> = HashSet::new();
    let mut findings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_num = (idx + 1) as u32;
        let Some(caps) = import_pattern().captures(line) else {
            continue;
        };
        let module = caps[1].to_string();

        match first_seen.get(&module) {
            None => {
                first_seen.insert(module, line_num);
            }
            Some(&first_line) => {
                if reported.insert(module.clone()) {
                    findings.push(Finding::new(
                        &rules::NO_DUPLICATE_IMPORTS,
                        path,
                        first_line,
                        format!("Module '{module}' is imported more than once"),
                    ));
                }
            }
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scan_str(content: &str) -> Vec<Finding> {
        scan(&PathBuf::from("src/app.ts"), content)
    }

    #[test]
    fn test_duplicate_reported_once_at_first_line() {
        let content = "import { a } from 'react';\nimport { b } from './util';\nimport { c } from 'react';\n";
        let findings = scan_str(content);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule, "no-duplicate-imports");
        assert_eq!(findings[0].line, 1);
        assert!(findings[0].message.contains("react"));
    }

    #[test]
    fn test_triple_import_still_one_finding() {
        let content =
            "import { a } from 'react';\nimport { b } from 'react';\nimport { c } from 'react';\n";
        assert_eq!(scan_str(content).len(), 1);
    }

    #[test]
    fn test_reordering_later_duplicates_keeps_first_line() {
        let early = "import { a } from 'lib';\nimport { b } from 'lib';\nimport { c } from './x';\n";
        let late = "import { a } from 'lib';\nimport { c } from './x';\nimport { b } from 'lib';\n";
        let f1 = scan_str(early);
        let f2 = scan_str(late);
        assert_eq!(f1.len(), 1);
        assert_eq!(f2.len(), 1);
        assert_eq!(f1[0].line, f2[0].line);
    }

    #[test]
    fn test_distinct_modules_are_fine() {
        let content = "import fs from 'fs';\nimport path from 'path';\nimport './styles.css';\n";
        assert!(scan_str(content).is_empty());
    }

    #[test]
    fn test_double_quotes_and_side_effect_imports() {
        let content = "import \"./setup\";\nimport \"./setup\";\n";
        let findings = scan_str(content);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 1);
    }

    #[test]
    fn test_non_import_lines_ignored() {
        let content = "const react = require('react');\n// import { a } from 'react';\nexport { b } from 'react';\n";
        assert!(scan_str(content).is_empty());
    }
}
