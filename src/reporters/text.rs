//! Text (terminal) summary with colors
//!
//! Short post-run summary for the terminal; the full report goes to the
//! markdown/json output file.

use crate::models::{ReviewSession, Severity};
use crate::reporters::SEVERITY_ORDER;
use anyhow::Result;
use std::path::Path;

/// Severity colors (ANSI escape codes)
fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31m",   // Red
        Severity::Warning => "\x1b[33m", // Yellow
        Severity::Info => "\x1b[90m",    // Gray
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Severity tag
fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "[E]",
        Severity::Warning => "[W]",
        Severity::Info => "[I]",
    }
}

/// Render the terminal summary.
pub fn render(session: &ReviewSession, report_path: &Path) -> Result<String> {
    let mut out = String::new();
    let summary = session.summary();

    out.push_str(&format!("\n{BOLD}Pre-review{RESET}  {} → {}\n", session.base_ref, session.head_branch));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Files: {}  Findings: {BOLD}{}{RESET}\n",
        session.files.len(),
        summary.total
    ));

    let mut parts = Vec::new();
    if summary.errors > 0 {
        parts.push(format!("\x1b[31m{} errors{RESET}", summary.errors));
    }
    if summary.warnings > 0 {
        parts.push(format!("\x1b[33m{} warnings{RESET}", summary.warnings));
    }
    if summary.info > 0 {
        parts.push(format!("\x1b[90m{} info{RESET}", summary.info));
    }
    if !parts.is_empty() {
        out.push_str(&format!("  {}\n", parts.join(" | ")));
    }
    if !session.skipped.is_empty() {
        out.push_str(&format!(
            "  {DIM}{} changed file(s) missing on disk, skipped{RESET}\n",
            session.skipped.len()
        ));
    }
    if !session.parse_failures.is_empty() {
        out.push_str(&format!(
            "  {DIM}{} file(s) failed to parse, structural checks skipped{RESET}\n",
            session.parse_failures.len()
        ));
    }
    out.push('\n');

    if !session.findings.is_empty() {
        out.push_str(&format!(
            "{DIM}  SEV   RULE                      LOCATION{RESET}\n"
        ));
        let mut shown = 0usize;
        for severity in SEVERITY_ORDER {
            for finding in session.by_severity(severity) {
                if shown >= 10 {
                    break;
                }
                let color = severity_color(finding.severity);
                out.push_str(&format!(
                    "  {color}{}{RESET}  {:<24}  {DIM}{}:{}{RESET}\n",
                    severity_tag(finding.severity),
                    finding.rule,
                    finding.file.display(),
                    finding.line
                ));
                shown += 1;
            }
        }
        let remaining = session.findings.len().saturating_sub(shown);
        if remaining > 0 {
            out.push_str(&format!("  {DIM}...and {} more in the report{RESET}\n", remaining));
        }
        out.push('\n');
    }

    out.push_str(&format!("Report written to {}\n", report_path.display()));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_session;
    use std::path::PathBuf;

    #[test]
    fn test_summary_mentions_counts_and_report_path() {
        let out = render(&test_session(), &PathBuf::from("code-review.md")).unwrap();
        assert!(out.contains("2 errors"));
        assert!(out.contains("2 warnings"));
        assert!(out.contains("1 info"));
        assert!(out.contains("Report written to code-review.md"));
    }

    #[test]
    fn test_errors_listed_before_info() {
        let out = render(&test_session(), &PathBuf::from("r.md")).unwrap();
        let error_pos = out.find("[E]").expect("an error row");
        let info_pos = out.find("[I]").expect("an info row");
        assert!(error_pos < info_pos);
    }
}
