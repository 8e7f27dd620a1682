//! vrepo CLI
//!
//! Command-line interface for synchronizing repositories with git, ssh and npm.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use vrepo::cli::Cli;

/// Environment variable holding the log filter
const LOG_ENV: &str = "VREPO_LOG";

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.log_level() >= 1 { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Execute the command
    cli.run()
}
