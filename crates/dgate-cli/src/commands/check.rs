//! Check command - run domains through the request-path decision

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dgate_core::{DomainLists, Verdict};
use serde::Serialize;

/// Check command arguments
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Domains to check
    #[arg(required = true, value_name = "DOMAIN")]
    pub domains: Vec<String>,

    /// Print one JSON object per domain
    #[arg(long)]
    pub json: bool,
}

/// Outcome for one domain
#[derive(Debug, Serialize)]
pub struct CheckReport<'a> {
    /// Domain as given on the command line
    pub domain: &'a str,
    /// Combined decision
    pub verdict: Verdict,
    /// Whether the whitelist names this domain exactly
    pub whitelisted: bool,
    /// Blocklist entry that matched, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_by: Option<&'a str>,
}

impl<'a> CheckReport<'a> {
    /// Evaluate a domain
    pub fn new(lists: &'a DomainLists, domain: &'a str) -> Self {
        Self {
            domain,
            verdict: lists.verdict(domain),
            whitelisted: !lists.whitelist_blocked(domain),
            blocked_by: lists
                .blocklist()
                .find_suffix(domain, lists.policy())
                .map(|entry| entry.value()),
        }
    }
}

/// Execute check command
pub fn execute(args: CheckArgs, lists: &DomainLists) -> Result<()> {
    for domain in &args.domains {
        let report = CheckReport::new(lists, domain);

        if args.json {
            let line = serde_json::to_string(&report).context("Failed to serialize report")?;
            println!("{}", line);
            continue;
        }

        let verdict = match report.verdict {
            Verdict::Allowed => report.verdict.to_string().green(),
            Verdict::Blocked => report.verdict.to_string().red(),
            Verdict::NotWhitelisted => report.verdict.to_string().yellow(),
        };
        match report.blocked_by {
            Some(entry) => println!("{} {} (by {})", domain, verdict, entry.cyan()),
            None => println!("{} {}", domain, verdict),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report() {
        let mut lists = DomainLists::default();
        lists.add_to_blocklist("gentoo.org");
        lists.add_to_whitelist("example.org");

        let report = CheckReport::new(&lists, "www.security.gentoo.org");
        assert_eq!(report.verdict, Verdict::Blocked);
        assert_eq!(report.blocked_by, Some("gentoo.org"));
        assert!(!report.whitelisted);

        let report = CheckReport::new(&lists, "www.example.org");
        assert_eq!(report.verdict, Verdict::Allowed);
        assert!(report.whitelisted);
        assert!(report.blocked_by.is_none());
    }

    #[test]
    fn test_report_json() {
        let mut lists = DomainLists::default();
        lists.add_to_whitelist("example.org");

        let report = CheckReport::new(&lists, "other.org");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["verdict"], "not_whitelisted");
        assert_eq!(json["whitelisted"], false);
        assert!(json.get("blocked_by").is_none());
    }
}
