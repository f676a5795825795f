//! CLI commands

pub mod check;
pub mod config;
pub mod export;
pub mod list;

use anyhow::{Context, Result};
use clap::Subcommand;
use dgate_core::{Config, DomainLists, MatchPolicy, Role};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::args::Args;

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check domains against the lists
    Check(check::CheckArgs),

    /// Print list entries
    List(list::ListArgs),

    /// Print the arguments that rebuild these lists in a worker process
    Args(export::ExportArgs),

    /// Configuration management
    Config(config::ConfigArgs),
}

/// Resolve the configuration: explicit path, discovered file, or defaults
pub fn load_config(args: &Args) -> Result<Config> {
    let path = match args.config {
        Some(ref path) => Some(PathBuf::from(path)),
        None => config::find_config_file(),
    };

    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config = Config::load(&path)
        .with_context(|| format!("Failed to load config from {:?}", path))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration in {:?}", path))?;
    debug!("Using configuration {:?}", path);
    Ok(config)
}

/// Build both lists from the configuration followed by command-line sources
pub fn load_lists(args: &Args, config: &Config) -> Result<DomainLists> {
    let role = Role::from_id(args.id);
    let mut lists = DomainLists::from_config(config, role)?;
    if args.strict_blocklist {
        lists = lists.with_policy(MatchPolicy::LabelBoundary);
    }

    for domain in &args.whitelist {
        lists.add_to_whitelist(domain);
    }
    for domain in &args.blocklist {
        lists.add_to_blocklist(domain);
    }
    for path in &args.whitelist_file {
        lists.load_whitelist_file(path)?;
    }
    for path in &args.blocklist_file {
        lists.load_blocklist_file(path)?;
    }

    info!(
        whitelist = lists.whitelist_count(),
        blocklist = lists.blocklist_count(),
        policy = ?lists.policy(),
        "Domain lists ready"
    );
    Ok(lists)
}

/// Default action: load everything and report what is active
pub fn summary(lists: &DomainLists) -> Result<()> {
    use colored::Colorize;

    let state = |active: bool| if active { "active".green() } else { "inactive".dimmed() };

    println!(
        "whitelist: {} ({} domains)",
        state(lists.is_whitelist_active()),
        lists.whitelist_count()
    );
    println!(
        "blocklist: {} ({} domains)",
        state(lists.is_blocklist_active()),
        lists.blocklist_count()
    );
    Ok(())
}
