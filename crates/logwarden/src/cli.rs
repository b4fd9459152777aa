//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use logwarden_core::Level;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "logwarden")]
#[command(version, about = "Inspect, search and prune application log files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output in JSON format instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (.toml, .yaml, .yml or .json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log directory, overrides the config file
    #[arg(long, env = "LOGWARDEN_DIR", global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List log files, newest first
    List,

    /// Show the last lines of a log file
    Tail(TailArgs),

    /// Search a log file for a string (case-insensitive)
    Search(SearchArgs),

    /// Show the most recent ERROR / CRITICAL lines
    Errors(ErrorsArgs),

    /// Delete log files older than a number of days
    Purge(PurgeArgs),
}

#[derive(Args)]
pub struct TailArgs {
    /// Log file name (inside the log directory)
    pub file: String,

    /// Number of lines to show (default from config: 100)
    #[arg(short = 'n', long)]
    pub lines: Option<usize>,

    /// Keep printing lines as they are appended
    #[arg(short, long)]
    pub follow: bool,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Log file name (inside the log directory)
    pub file: String,

    /// Text to look for
    pub query: String,

    /// Maximum matches to show (most recent kept, default from config: 50)
    #[arg(long)]
    pub max: Option<usize>,
}

#[derive(Args)]
pub struct ErrorsArgs {
    /// Log file name (inside the log directory)
    pub file: String,

    /// Maximum lines to show (most recent kept, default from config: 20)
    #[arg(long)]
    pub max: Option<usize>,

    /// Only lines classified at this level: error or critical
    #[arg(long, value_parser = parse_severe_level)]
    pub level: Option<Level>,
}

#[derive(Args)]
pub struct PurgeArgs {
    /// Delete files last modified more than this many days ago (default from config: 7)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub days: Option<u32>,

    /// Only list what would be deleted
    #[arg(long)]
    pub dry_run: bool,

    /// Confirm deletion
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_severe_level(s: &str) -> Result<Level, String> {
    let level: Level = s.parse().map_err(|e: logwarden_core::Error| e.to_string())?;
    if !level.is_severe() {
        return Err(format!("Expected error or critical, got {}", s));
    }
    Ok(level)
}
