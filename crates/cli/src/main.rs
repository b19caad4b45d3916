//! Scaffolder
//!
//! Migration compiler for schema-builder migrations.
//!
//! This is the main entry point for the command-line tool.

use clap::Parser;
use scaffolder_cli::Cli;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    scaffolder_cli::run(Cli::parse())
}
