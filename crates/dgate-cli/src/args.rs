//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use crate::commands::Command;

/// dgate - domain admission lists for DNS filtering
///
/// Builds a whitelist and a blocklist from flags, list files and a TOML
/// configuration, then checks domains against them or regenerates the
/// arguments a worker process needs to rebuild the same lists.
#[derive(Parser, Debug)]
#[command(name = "dgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Whitelist a domain (exact match, repeatable)
    #[arg(long = "whitelist", value_name = "DOMAIN")]
    pub whitelist: Vec<String>,

    /// Blocklist a domain and its subdomains (repeatable)
    #[arg(long = "blocklist", value_name = "DOMAIN")]
    pub blocklist: Vec<String>,

    /// Load whitelisted domains from a file (repeatable)
    #[arg(long = "whitelist-file", value_name = "FILE")]
    pub whitelist_file: Vec<String>,

    /// Load blocklisted domains from a file (repeatable)
    #[arg(long = "blocklist-file", value_name = "FILE")]
    pub blocklist_file: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", env = "DGATE_CONFIG")]
    pub config: Option<String>,

    /// Worker id; 0 is the primary process
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub id: u32,

    /// Only match blocklist entries on a label boundary
    #[arg(long)]
    pub strict_blocklist: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format for logs
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Log file path
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<String>,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Log output format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// Compact format
    Compact,
}
