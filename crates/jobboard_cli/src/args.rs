use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobboard_core::models::SortKey;

/// Default config path: .config/jobboard.toml (relative to current working directory)
pub const DEFAULT_CONFIG_PATH: &str = ".config/jobboard.toml";

/// Browse a recruiting job board from the terminal
#[derive(Parser, Debug)]
#[command(name = "jobboard")]
#[command(version)]
#[command(about = "Browse, filter, sort and reorder a recruiting job board", long_about = None)]
pub struct Cli {
    /// Config file (created with defaults if missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// More log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// One action against the board. Positions are 1-based, as printed.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the current page with the saved filters
    List,
    /// Filter by job name (empty string clears)
    Search { term: String },
    /// Restrict to one category ("All" clears)
    Category { name: String },
    /// Sort by dateDesc, dateAsc, nameAsc, nameDesc, categoryAsc or categoryDesc
    Sort { key: SortKey },
    /// Go to a page
    Page { number: u32 },
    /// Move the job at one position to another (category must be All)
    Move { from: usize, to: usize },
    /// Clear filters, sort and manual orders, then show page 1
    Reset,
    /// Show one job card expanded
    Show { index: usize },
    /// List the configured categories
    Categories,
    /// Interactive session
    Shell,
}
