//! CLI argument definitions using clap

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::RiskLevel;

/// Surveillance effort planning for mango growers
#[derive(Parser, Debug)]
#[command(name = "mangosurv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Farm directory with a local .mangosurv.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub farm_dir: Option<PathBuf>,

    /// Inventory file (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub inventory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate surveillance time for a grower
    Estimate {
        /// Grower id
        grower: String,
        /// Flat 6 minutes per tree instead of the per-tree model
        #[arg(long)]
        quick: bool,
        /// Surveillance interval in days (overrides the grower's setting)
        #[arg(long)]
        frequency: Option<u32>,
        /// Print the estimate as TOML
        #[arg(long)]
        toml: bool,
    },

    /// Classify stocking density per location
    Stocking {
        /// Grower id
        grower: String,
    },

    /// List tree inspections for a session
    Plan {
        /// Grower id
        grower: String,
        /// Locations to include (default: all)
        #[arg(short, long = "location")]
        locations: Vec<String>,
    },

    /// Compare a recorded session with its estimate
    Session {
        /// Grower id
        grower: String,
        /// Location surveyed
        location: String,
        /// Start time (HH:MM or HH:MM:SS)
        #[arg(long, value_parser = parse_clock_time)]
        start: NaiveTime,
        /// End time (HH:MM or HH:MM:SS)
        #[arg(long, value_parser = parse_clock_time)]
        end: NaiveTime,
        /// Session date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Check a grower's inventory for data problems
    Check {
        /// Grower id
        grower: String,
    },

    /// List growers in the inventory
    Growers,

    /// List the pest and disease catalogue
    Threats,

    /// Assess the risk of an inspection finding
    Risk {
        /// Catalogue threat (slug or name)
        #[arg(short, long)]
        threat: Option<String>,
        /// Legacy pest finding risk
        #[arg(long)]
        pest: Option<RiskLevel>,
        /// Legacy disease finding risk
        #[arg(long)]
        disease: Option<RiskLevel>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}

/// Accept `HH:MM` as well as `HH:MM:SS`.
fn parse_clock_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| format!("invalid time '{s}': {e}"))
}
