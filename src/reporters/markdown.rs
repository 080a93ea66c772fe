//! Markdown reporter — the persisted review document
//!
//! Renders the header, the per-severity summary, one section per non-empty
//! severity tier (findings grouped by file, ascending by line), and the
//! static rule catalogue.

use crate::models::{ReviewSession, Severity};
use crate::reporters::{group_by_file, SEVERITY_ORDER};
use crate::rules;
use anyhow::Result;
use chrono::Local;

/// Render the full review report.
pub fn render(session: &ReviewSession) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(session));
    md.push('\n');
    md.push_str(&render_summary(session));
    md.push('\n');
    md.push_str(&render_findings(session));
    md.push_str(&render_catalogue());

    Ok(md)
}

fn render_header(session: &ReviewSession) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    let mut header = format!(
        r#"# Code Review Report

Generated: {timestamp}
Base: `{}` (merge base `{}`)
Head: `{}` (`{}`)
Files analyzed: {}
"#,
        session.base_ref,
        session.merge_base,
        session.head_branch,
        session.head_rev,
        session.files.len()
    );

    if !session.skipped.is_empty() {
        header.push_str(&format!(
            "Skipped (missing on disk): {}\n",
            session.skipped.len()
        ));
    }
    if !session.parse_failures.is_empty() {
        header.push_str(&format!(
            "Parse failures (structural checks skipped): {}\n",
            session.parse_failures.len()
        ));
    }

    header
}

fn render_summary(session: &ReviewSession) -> String {
    let summary = session.summary();
    format!(
        r#"## Summary

| Severity | Count |
|----------|-------|
| error | {} |
| warning | {} |
| info | {} |
| **total** | **{}** |
"#,
        summary.errors, summary.warnings, summary.info, summary.total
    )
}

fn tier_title(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "Errors",
        Severity::Warning => "Warnings",
        Severity::Info => "Info",
    }
}

fn render_findings(session: &ReviewSession) -> String {
    if session.findings.is_empty() {
        return "## Findings\n\nNo issues found.\n\n".to_string();
    }

    let mut md = String::new();
    for severity in SEVERITY_ORDER {
        let groups = group_by_file(session, severity);
        if groups.is_empty() {
            continue;
        }

        let count: usize = groups.values().map(|v| v.len()).sum();
        md.push_str(&format!("## {} ({count})\n\n", tier_title(severity)));

        for (file, findings) in &groups {
            md.push_str(&format!("### `{}`\n\n", file.display()));
            for finding in findings {
                let location = match finding.column {
                    Some(col) => format!("L{}:{}", finding.line, col),
                    None => format!("L{}", finding.line),
                };
                md.push_str(&format!(
                    "- **{location}** `{}` — {}\n",
                    finding.rule, finding.message
                ));
            }
            md.push('\n');
        }
    }

    md
}

fn render_catalogue() -> String {
    let mut md = String::from(
        "## Rule Catalogue\n\n| Rule | Category | Severity | Description |\n|------|----------|----------|-------------|\n",
    );
    for rule in rules::CATALOGUE {
        md.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            rule.id, rule.category, rule.severity, rule.description
        ));
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_session;

    #[test]
    fn test_header_carries_run_metadata() {
        let md = render(&test_session()).unwrap();
        assert!(md.contains("# Code Review Report"));
        assert!(md.contains("Base: `main` (merge base `aaaa1111bbbb`)"));
        assert!(md.contains("Head: `feature/login` (`cccc2222dddd`)"));
        assert!(md.contains("Files analyzed: 2"));
    }

    #[test]
    fn test_summary_counts() {
        let md = render(&test_session()).unwrap();
        assert!(md.contains("| error | 2 |"));
        assert!(md.contains("| warning | 2 |"));
        assert!(md.contains("| info | 1 |"));
        assert!(md.contains("| **total** | **5** |"));
    }

    #[test]
    fn test_severity_major_then_file_then_line_order() {
        let md = render(&test_session()).unwrap();

        // tiers render most severe first
        let errors = md.find("## Errors").expect("errors section");
        let warnings = md.find("## Warnings").expect("warnings section");
        let info = md.find("## Info").expect("info section");
        assert!(errors < warnings && warnings < info);

        // within a tier, files are alphabetical
        let error_section = &md[errors..warnings];
        let a = error_section.find("src/a.ts").expect("a.ts in errors");
        let b = error_section.find("src/b.ts").expect("b.ts in errors");
        assert!(a < b);

        // within a file, lines ascend
        let warning_section = &md[warnings..info];
        let l1 = warning_section.find("L1").expect("line 1 finding");
        let l9 = warning_section.find("L9").expect("line 9 finding");
        assert!(l1 < l9);
    }

    #[test]
    fn test_empty_severity_tier_is_omitted() {
        let mut session = test_session();
        session.findings.retain(|f| f.severity != crate::models::Severity::Info);
        let md = render(&session).unwrap();
        assert!(!md.contains("## Info ("));
    }

    #[test]
    fn test_zero_findings_report() {
        let mut session = test_session();
        session.findings.clear();
        let md = render(&session).unwrap();
        assert!(md.contains("No issues found."));
        assert!(md.contains("| **total** | **0** |"));
    }

    #[test]
    fn test_catalogue_lists_every_rule() {
        let md = render(&test_session()).unwrap();
        assert!(md.contains("## Rule Catalogue"));
        for rule in rules::CATALOGUE {
            assert!(md.contains(rule.id), "catalogue should list {}", rule.id);
        }
    }

    #[test]
    fn test_skip_notices_render_only_when_present() {
        let mut session = test_session();
        let md = render(&session).unwrap();
        assert!(!md.contains("Skipped (missing on disk)"));

        session.skipped.push("src/gone.ts".into());
        session.parse_failures.push("src/broken.ts".into());
        let md = render(&session).unwrap();
        assert!(md.contains("Skipped (missing on disk): 1"));
        assert!(md.contains("Parse failures (structural checks skipped): 1"));
    }
}
