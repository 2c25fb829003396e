pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "confluence")]
#[command(about = "Aggregate several news feeds into one list", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh on a fixed interval, printing each pass to the terminal
    Run,
    /// Run a single aggregation pass and exit
    Once {
        /// Emit the result as JSON instead of a readable list
        #[arg(long)]
        json: bool,
    },
    /// List the configured sources
    Sources,
}
