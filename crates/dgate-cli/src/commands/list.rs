//! List command - show registered domains

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use dgate_core::{DomainLists, ListKind};

/// List command arguments
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Which list to print
    #[arg(short, long, value_enum, default_value = "all")]
    pub which: Which,

    /// Print bare domains only, one per line
    #[arg(long)]
    pub plain: bool,
}

/// List selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Which {
    /// Whitelist only
    Whitelist,
    /// Blocklist only
    Blocklist,
    /// Both lists
    All,
}

impl Which {
    fn kinds(self) -> &'static [ListKind] {
        match self {
            Self::Whitelist => &[ListKind::Whitelist],
            Self::Blocklist => &[ListKind::Blocklist],
            Self::All => &[ListKind::Whitelist, ListKind::Blocklist],
        }
    }
}

/// Execute list command
pub fn execute(args: ListArgs, lists: &DomainLists) -> Result<()> {
    for &kind in args.which.kinds() {
        let registry = lists.registry(kind);

        if args.plain {
            for entry in registry.iter() {
                println!("{}", entry);
            }
            continue;
        }

        println!("{}", "═".repeat(50).bright_blue());
        println!(" {} ({} domains)", kind.name().bright_white().bold(), registry.len().to_string().green());
        println!("{}", "─".repeat(50).bright_black());

        if registry.is_empty() {
            println!("{}", "  (empty)".dimmed());
        } else {
            for entry in registry.iter() {
                println!("  {} {}", "●".green(), entry);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_which_kinds() {
        assert_eq!(Which::Whitelist.kinds(), &[ListKind::Whitelist]);
        assert_eq!(Which::All.kinds().len(), 2);
    }
}
