use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::config::SampleKind;

#[derive(Parser)]
#[command(name = "kb", about = concat!("kb v", env!("CARGO_PKG_VERSION"), " - a Kanban board in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Board config file (default: ./kanban.toml if present)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Starting dataset, overriding the config
    #[arg(long, global = true, value_enum)]
    pub sample: Option<SampleKind>,

    /// Task count for the large dataset
    #[arg(long, global = true)]
    pub count: Option<usize>,

    /// Seed for the large dataset
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Append logs to this file (RUST_LOG sets the level)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the board, column by column
    Board(BoardArgs),
    /// Find tasks by text, priority, assignee or tag
    Search(SearchArgs),
    /// Show per-column counts with WIP status, assignees and tags
    Stats,
    /// Verify that column membership and task status agree
    Check,
}

#[derive(Args)]
pub struct BoardArgs {
    /// Only print this column
    #[arg(long)]
    pub column: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Text to find in title or description (case-insensitive)
    #[arg(default_value = "")]
    pub query: String,
    /// low, medium, high, urgent or all
    #[arg(long)]
    pub priority: Option<String>,
    /// Exact assignee name, or all
    #[arg(long)]
    pub assignee: Option<String>,
    /// Match tasks with any of these tags (repeatable)
    #[arg(long)]
    pub tag: Vec<String>,
}
