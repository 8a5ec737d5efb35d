//! Command-line interface for sketchtoe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sketch Tac Toe - two players, one board, moves drawn by hand
#[derive(Parser, Debug)]
#[command(name = "sketchtoe")]
#[command(about = "Tic-tac-toe where every move is a drawn O or X", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal, drawing with the mouse
    Play {
        /// Config file (TOML). Falls back to $SKETCHTOE_CONFIG, then defaults.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a scripted session and print events as JSON lines
    Replay {
        /// Script file (TOML) with a list of steps
        script: PathBuf,

        /// Config file (TOML). Falls back to $SKETCHTOE_CONFIG, then defaults.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
