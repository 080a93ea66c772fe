//! JSON reporter for scripting and CI integration

use crate::models::ReviewSession;
use crate::reporters::{group_by_file, SEVERITY_ORDER};
use anyhow::Result;
use chrono::Local;
use serde_json::json;

/// Render the session as pretty-printed JSON. Findings appear in report
/// order: severity tier, then file, then ascending line.
pub fn render(session: &ReviewSession) -> Result<String> {
    let summary = session.summary();

    let mut findings = Vec::new();
    for severity in SEVERITY_ORDER {
        for group in group_by_file(session, severity).values() {
            for finding in group {
                findings.push(serde_json::to_value(finding)?);
            }
        }
    }

    let value = json!({
        "generated": Local::now().to_rfc3339(),
        "base_ref": session.base_ref,
        "merge_base": session.merge_base,
        "head_branch": session.head_branch,
        "head_rev": session.head_rev,
        "files_analyzed": session.files.len(),
        "skipped": session.skipped,
        "parse_failures": session.parse_failures,
        "summary": {
            "error": summary.errors,
            "warning": summary.warnings,
            "info": summary.info,
            "total": summary.total,
        },
        "findings": findings,
    });

    Ok(serde_json::to_string_pretty(&value)?)
}
