//! Review orchestration
//!
//! Resolves the changed-file set, filters it to eligible files, fans the
//! per-file detectors out over a worker pool, merges the results into a
//! [`ReviewSession`], and writes the report. Only resolver failures abort
//! the run; per-file conditions are logged and recovered.

use crate::cli::Cli;
use crate::detectors::{self, FileReview};
use crate::git;
use crate::models::{ReviewSession, Severity};
use crate::reporters;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Outcome of one file's review.
enum FileOutcome {
    Reviewed(FileReview),
    /// Listed as changed but unreadable (deleted from the working tree)
    Missing,
}

pub fn run(cli: &Cli) -> Result<()> {
    let session = review_repo(&cli.path, &cli.base, cli.workers)?;

    let report = match cli.format.as_str() {
        "json" => reporters::json::render(&session)?,
        _ => reporters::markdown::render(&session)?,
    };
    fs::write(&cli.output, report)
        .with_context(|| format!("failed to write report to {}", cli.output.display()))?;

    print!("{}", reporters::text::render(&session, &cli.output)?);

    if let Some(threshold) = cli.fail_on.as_deref().and_then(Severity::parse) {
        if session.has_findings_at_or_above(threshold) {
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Resolve and review the repository containing `path` against `base`.
/// Resolver failures are fatal; everything per-file is recovered into the
/// returned session.
pub fn review_repo(path: &std::path::Path, base: &str, workers: usize) -> Result<ReviewSession> {
    let changes = git::resolve(path, base)
        .with_context(|| format!("cannot resolve changes against '{base}'"))?;

    let eligible: Vec<PathBuf> = changes
        .paths
        .iter()
        .filter(|p| detectors::is_eligible(p))
        .cloned()
        .collect();

    info!(
        "{} changed files, {} eligible for review",
        changes.paths.len(),
        eligible.len()
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("failed to build worker pool")?;

    let bar = ProgressBar::new(eligible.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:30.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let results: Vec<(PathBuf, FileOutcome)> = pool.install(|| {
        eligible
            .par_iter()
            .map(|rel| {
                let abs = changes.repo_root.join(rel);
                let outcome = match fs::read_to_string(&abs) {
                    Ok(content) => FileOutcome::Reviewed(detectors::review_file(rel, &content)),
                    Err(err) => {
                        warn!("skipping {}: {err}", rel.display());
                        FileOutcome::Missing
                    }
                };
                bar.inc(1);
                (rel.clone(), outcome)
            })
            .collect()
    });
    bar.finish_and_clear();

    // single merge point: detectors return owned findings, nothing else is shared
    let mut session = ReviewSession {
        base_ref: changes.base_ref.clone(),
        merge_base: changes.merge_base.clone(),
        head_branch: changes.head_branch.clone(),
        head_rev: changes.head_rev.clone(),
        files: eligible,
        findings: Vec::new(),
        skipped: Vec::new(),
        parse_failures: Vec::new(),
    };
    for (rel, outcome) in results {
        match outcome {
            FileOutcome::Reviewed(review) => {
                if review.parse_failed {
                    session.parse_failures.push(rel);
                }
                session.findings.extend(review.findings);
            }
            FileOutcome::Missing => session.skipped.push(rel),
        }
    }

    Ok(session)
}
