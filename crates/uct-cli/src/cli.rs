use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Unit commitment toolkit", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve a single problem directory
    Run {
        /// Problem name; results land under <output>/<name>/results
        #[arg(long)]
        name: String,
        /// Directory holding the input CSV tables
        #[arg(long)]
        input: PathBuf,
        /// Directory to write outputs into
        #[arg(long)]
        output: PathBuf,
    },
    /// Solve a long horizon day by day, carrying state across days
    Series {
        /// Problem name; per-day runs land under <output>/<name>/days
        #[arg(long)]
        name: String,
        /// Directory holding the full-horizon input CSV tables
        #[arg(long)]
        input: PathBuf,
        /// Directory to write outputs into
        #[arg(long)]
        output: PathBuf,
    },
}
