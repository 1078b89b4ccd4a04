//! CLI command definitions and dispatch for the `sbot` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod check;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keyword-triggered Reddit reply bot for scholarship questions.
#[derive(Parser)]
#[command(name = "sbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the pollers and run until Ctrl+C or SIGTERM.
    Run {
        /// Path to the bot config file.
        #[arg(long, default_value = "scholarbot.toml")]
        config: PathBuf,
    },

    /// Run startup diagnostics: config, credentials, Reddit login, ledger.
    Check {
        /// Path to the bot config file.
        #[arg(long, default_value = "scholarbot.toml")]
        config: PathBuf,
    },
}
