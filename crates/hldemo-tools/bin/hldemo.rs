//! `hldemo` binary entry point.
//!
//! Thin wrapper around the hldemo-tools library that:
//! 1. Initializes logging (to stderr, so reports on stdout stay clean)
//! 2. Parses and validates command-line arguments
//! 3. Runs the selected tool

use anyhow::{Context, Result};
use hldemo_tools::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::from_args();
    cli.validate()?;

    let stdout = std::io::stdout();
    hldemo_tools::run(&cli, &mut stdout.lock()).context("hldemo failed")?;

    Ok(())
}
