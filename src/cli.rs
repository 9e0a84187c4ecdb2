//! Command-line arguments.
//!
//! Without a subcommand the interactive menu runs. The subcommands expose the
//! same views non-interactively.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "encore")]
#[command(about = "Play your local music library and keep track of what you play")]
#[command(version)]
pub struct Args {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "ENCORE_CONFIG_PATH", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan a music directory and print it ranked, optionally filtered
    Scan {
        /// Directory to scan; defaults to the saved library directory
        dir: Option<PathBuf>,

        /// Only show titles containing this text (case-insensitive)
        #[arg(short, long)]
        keyword: Option<String>,
    },

    /// Print the saved play history, most recent first
    History,

    /// Print the most played titles
    Top {
        /// How many titles to show; defaults to history.top_played
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Remember DIR as the offline music directory
    SetDir {
        dir: PathBuf,
    },
}
