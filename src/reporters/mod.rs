//! Report rendering
//!
//! The markdown reporter produces the persisted review document; the json
//! reporter mirrors it for scripting; the text reporter prints a short
//! colored summary to the terminal. Grouping and ordering (severity tier,
//! then file, then ascending line) are a contract of the markdown and json
//! output; everything else is presentation.

pub mod json;
pub mod markdown;
pub mod text;

use crate::models::{Finding, ReviewSession, Severity};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Severity tiers in render order, most severe first.
pub const SEVERITY_ORDER: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

/// Findings of one tier grouped by file (alphabetical), each group sorted by
/// line then column.
pub fn group_by_file(session: &ReviewSession, severity: Severity) -> BTreeMap<PathBuf, Vec<&Finding>> {
    let mut groups: BTreeMap<PathBuf, Vec<&Finding>> = BTreeMap::new();
    for finding in session.findings.iter().filter(|f| f.severity == severity) {
        groups.entry(finding.file.clone()).or_default().push(finding);
    }
    for findings in groups.values_mut() {
        findings.sort_by_key(|f| (f.line, f.column.unwrap_or(0)));
    }
    groups
}
