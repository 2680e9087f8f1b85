use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fm_moneyball",
    version,
    about = "Clean scouting exports and rank players by role"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Role weight file (defaults to MONEYBALL_WEIGHTS or data/weights.json)
    #[arg(long, global = true)]
    pub weights: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score and rank the players at one position
    Rank(RankCommand),
    /// List roles, their positions and weight versions
    Roles,
    /// Write the cleaned table as CSV
    Clean(CleanCommand),
}

#[derive(Args)]
pub struct RankCommand {
    /// Scouting export (.csv or .html)
    pub data: PathBuf,
    /// Best-position label, e.g. "ST" or "D (C)"
    #[arg(short, long)]
    pub position: String,
    /// Weight version within the role
    #[arg(long = "weight-version")]
    pub weight_version: Option<String>,
    /// Budget in millions
    #[arg(long, conflicts_with = "no_budget")]
    pub max_value: Option<f64>,
    /// Keep every player regardless of value
    #[arg(long)]
    pub no_budget: bool,
    /// Rows to print
    #[arg(long)]
    pub top: Option<usize>,
    /// Write the full shortlist to .xlsx or .csv
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Args)]
pub struct CleanCommand {
    /// Scouting export (.csv or .html)
    pub data: PathBuf,
    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
