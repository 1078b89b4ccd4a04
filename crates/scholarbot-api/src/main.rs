//! Scholarbot CLI entry point.
//!
//! Binary name: `sbot`
//!
//! Parses CLI arguments, initializes tracing, then dispatches to the
//! `run` (start the pollers) or `check` (startup diagnostics) handler.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,scholarbot=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Run { config } => {
            cli::run::run(&config).await?;
        }
        Commands::Check { config } => {
            cli::check::check(&config).await?;
        }
    }

    Ok(())
}
