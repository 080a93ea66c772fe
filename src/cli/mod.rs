//! CLI definition and entry point

pub mod review;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// prereview - static checks for the files your branch touches
#[derive(Parser, Debug)]
#[command(name = "prereview")]
#[command(
    version,
    about = "Review the TypeScript/JavaScript files changed since a base branch and write a findings report",
    long_about = "prereview diffs the current revision against the merge base with a base \
reference, runs a fixed catalogue of line, structure, and import checks over every \
changed .ts/.tsx/.js/.jsx file, and writes a grouped report.\n\n\
Nothing is executed and nothing leaves your machine.",
    after_help = "\
Examples:
  prereview .                            Review changes since main
  prereview . --base origin/develop      Review against another base
  prereview . --format json -o out.json  Machine-readable output
  prereview . --fail-on warning          CI gate: exit 1 on warnings or errors

Set RUST_LOG=debug for detector logging."
)]
pub struct Cli {
    /// Path to the repository (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Base reference to diff against (branch, tag, or commit)
    #[arg(long, short = 'b', default_value = "main", env = "PREREVIEW_BASE")]
    pub base: String,

    /// Output file for the review report
    #[arg(long, short = 'o', default_value = "code-review.md")]
    pub output: PathBuf,

    /// Output format: markdown (or md), json
    #[arg(long, short = 'f', default_value = "markdown", value_parser = ["markdown", "md", "json"])]
    pub format: String,

    /// Number of parallel workers (1-64)
    #[arg(long, default_value = "8", value_parser = parse_workers)]
    pub workers: usize,

    /// Exit with code 1 if findings at this severity or higher exist
    #[arg(long, value_parser = ["error", "warning", "info"])]
    pub fail_on: Option<String>,
}

/// Run the review with the parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    review::run(&cli)
}
