//! Diagnostic detectors
//!
//! Three independent passes run against every eligible changed file:
//!
//! ```text
//! changed file content
//!        │
//!        ├── line_rules  per-line pattern predicates (text only)
//!        ├── imports     duplicate module specifiers (text only)
//!        ├── jsx         hardcoded JSX text (.tsx/.jsx only, text only)
//!        └── structure   tree-sitter pass: statement count + complexity
//!        │
//!        ▼
//!   Vec<Finding> per file, merged into the ReviewSession
//! ```
//!
//! Detectors hold no state across files and are order-insensitive; each
//! returns an owned finding list. A parse failure drops only the structural
//! pass for that file, the text passes still contribute.

pub mod imports;
pub mod jsx;
pub mod line_rules;
pub mod structure;

use crate::models::Finding;
use std::path::Path;

/// File extensions eligible for review.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Path fragments that exclude a file wherever they appear.
pub const EXCLUDED_SEGMENTS: &[&str] = &["node_modules", ".next", "dist", "build", "coverage"];

/// Result of reviewing one file.
#[derive(Debug)]
pub struct FileReview {
    pub findings: Vec<Finding>,
    /// The structural pass was dropped because the content did not parse
    pub parse_failed: bool,
}

/// Whether a changed path should be analyzed at all.
pub fn is_eligible(path: &Path) -> bool {
    let ext_ok = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
        .unwrap_or(false);
    if !ext_ok {
        return false;
    }

    let path_str = path.to_string_lossy();
    !EXCLUDED_SEGMENTS.iter().any(|seg| path_str.contains(seg))
}

/// Run every detector against one file's content. `path` is the
/// repo-relative path findings should carry.
pub fn review_file(path: &Path, content: &str) -> FileReview {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    let mut findings = line_rules::scan(path, content);
    findings.extend(imports::scan(path, content));
    if matches!(ext, "tsx" | "jsx") {
        findings.extend(jsx::scan(path, content));
    }

    let parse_failed = match structure::analyze(path, content, ext) {
        Ok(structural) => {
            findings.extend(structural);
            false
        }
        Err(err) => {
            tracing::warn!(
                "{}: skipping structural checks ({err:#})",
                path.display()
            );
            true
        }
    };

    FileReview {
        findings,
        parse_failed,
    }
}
