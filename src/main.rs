//! Sketch Tac Toe command-line entry point.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use sketchtoe::{run_replay_file, run_tui, AppConfig};
use std::path::Path;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config } => {
            let config = load_config(config.as_deref())?;
            run_tui(&config)
        }
        Command::Replay { script, config } => {
            // Events go to stdout, so logs go to stderr.
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .with_writer(std::io::stderr)
                .init();
            let config = load_config(config.as_deref())?;
            run_replay(&script, &config)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    AppConfig::load(path).context("Failed to load configuration")
}

#[instrument(skip(config), fields(script = %script.display()))]
fn run_replay(script: &Path, config: &AppConfig) -> Result<()> {
    let summary = run_replay_file(script, config)?;
    info!(status = ?summary.status, "Replay complete");
    Ok(())
}
