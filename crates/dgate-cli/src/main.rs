//! dgate CLI
//!
//! Command-line front end for the domain admission lists.

mod args;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use dgate_core::DomainLists;
use tracing::{error, Level};

use args::Args;
use commands::Command;

fn main() -> Result<()> {
    // Parse command line arguments
    let mut args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    match args.command.take() {
        // Config management does not need the lists, or a valid config
        Some(Command::Config(config_args)) => {
            logging::init(&args, Level::INFO)?;
            commands::config::execute(config_args)
        }
        Some(Command::Check(check_args)) => {
            with_lists(&args, |lists| commands::check::execute(check_args, lists))
        }
        Some(Command::List(list_args)) => {
            with_lists(&args, |lists| commands::list::execute(list_args, lists))
        }
        Some(Command::Args(export_args)) => {
            with_lists(&args, |lists| commands::export::execute(export_args, lists))
        }
        None => with_lists(&args, commands::summary),
    }
}

/// Resolve the config, start logging, build the lists and hand them to `run`.
fn with_lists<F>(args: &Args, run: F) -> Result<()>
where
    F: FnOnce(&DomainLists) -> Result<()>,
{
    let config = commands::load_config(args)?;
    logging::init(args, logging::parse_level(&config.logging.level))?;

    let result = commands::load_lists(args, &config).and_then(|lists| run(&lists));

    if let Err(ref e) = result {
        error!("Fatal error: {:#}", e);
    }

    result
}
