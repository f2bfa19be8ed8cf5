//! Command-line interface definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// meetingstats - How much of your year goes into meetings
#[derive(Debug, Parser)]
#[command(name = "meetingstats")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Calendar export (.ics) to analyze
    #[arg(required = true)]
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, short, env = "MEETINGSTATS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    // --- Viewer ---
    /// Your email address, as it appears in the attendee list
    #[arg(long, short, env = "MEETINGSTATS_EMAIL")]
    pub email: Option<String>,

    /// Annual salary used to price meeting time
    #[arg(long)]
    pub salary: Option<f64>,

    // --- Filters ---
    /// Skip meetings whose title looks recurring (weekly, daily, retro...)
    #[arg(long)]
    pub exclude_recurring: bool,

    /// First day to analyze (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day to analyze (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// IANA timezone used to place events (e.g. Europe/Paris)
    #[arg(long)]
    pub timezone: Option<String>,

    // --- Output ---
    /// Output the full statistics as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of colleagues in the top colleagues section
    #[arg(long)]
    pub top: Option<usize>,

    /// Maximum title length (truncated with ellipsis)
    #[arg(long)]
    pub max_title_length: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
