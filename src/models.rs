//! Core data models for prereview
//!
//! These models are used throughout the codebase for representing
//! findings, severity tiers, and the state of a review run.

use crate::rules::Rule;
use serde::Serialize;
use std::path::PathBuf;

/// Severity levels for findings
///
/// Ordered so that `Info < Warning < Error`; reports render tiers from
/// most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl Severity {
    /// Parse a severity name as used by `--fail-on`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(Severity::Info),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }
}

/// One reported deviation from a rule, located at a file and line.
///
/// Findings are immutable once created and are only ever constructed through
/// [`Finding::new`], which ties each one to a catalogue rule.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Repo-relative path of the file the finding is in
    pub file: PathBuf,
    /// 1-based line number
    pub line: u32,
    /// 1-based column, where the detector knows it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    pub severity: Severity,
    /// Rule identifier from the fixed catalogue
    pub rule: &'static str,
    pub message: String,
}

impl Finding {
    /// Create a finding for `rule` at `file:line`, using the rule's
    /// default severity.
    pub fn new(rule: &'static Rule, file: impl Into<PathBuf>, line: u32, message: String) -> Self {
        Self {
            file: file.into(),
            line,
            column: None,
            severity: rule.severity,
            rule: rule.id,
            message,
        }
    }

    /// Attach a 1-based column to the finding.
    pub fn with_column(mut self, column: u32) -> Self {
        self.column = Some(column);
        self
    }
}

/// Summary of findings by severity
#[derive(Debug, Clone, Default, Serialize)]
pub struct FindingsSummary {
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub total: usize,
}

impl FindingsSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self::default();
        for f in findings {
            match f.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
                Severity::Info => summary.info += 1,
            }
            summary.total += 1;
        }
        summary
    }
}

/// Run-wide accumulator for one review.
///
/// Detectors each return an owned `Vec<Finding>`; per-file results are merged
/// here at a single point, so nothing else in the run shares mutable state.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    /// Base reference the diff was taken against
    pub base_ref: String,
    /// Short id of the merge-base commit
    pub merge_base: String,
    /// Current branch name (or "HEAD" when detached)
    pub head_branch: String,
    /// Short id of the current revision
    pub head_rev: String,
    /// Eligible changed files, in changed-set order
    pub files: Vec<PathBuf>,
    /// All findings, in per-file merge order
    pub findings: Vec<Finding>,
    /// Changed files that no longer exist on disk (skipped with a notice)
    pub skipped: Vec<PathBuf>,
    /// Files whose structural pass was dropped because they did not parse
    pub parse_failures: Vec<PathBuf>,
}

impl ReviewSession {
    pub fn summary(&self) -> FindingsSummary {
        FindingsSummary::from_findings(&self.findings)
    }

    /// Findings in a given severity tier, in collection order.
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Whether any finding sits at or above `threshold`.
    pub fn has_findings_at_or_above(&self, threshold: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= threshold)
    }
}
