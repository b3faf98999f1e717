//! Balance tooling for the Descent rules engine
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Curve, Simulate};
use tracing_subscriber::EnvFilter;

/// Balance tools for Descent
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Balance tools for Descent", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Print defense-to-block tables for the curve families
    Curve(Curve),

    /// Run a seeded Monte-Carlo of one event choice
    Simulate(Simulate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for RUST_LOG and DESCENT_DATA_DIR)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Curve(cmd) => cmd.execute(),
        Command::Simulate(cmd) => cmd.execute(),
    }
}
