//! prereview - pre-review checks for changed TypeScript/JavaScript files

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = prereview::cli::Cli::parse();
    prereview::cli::run(cli)
}
