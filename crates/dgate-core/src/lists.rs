//! Whitelist and blocklist pair used on the request path
//!
//! [`DomainLists`] owns both registries for one process. It is built during
//! startup (inline flags, list files, configuration), queried read-only while
//! requests are served, and serialized when a worker process is launched.

use std::fmt;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::matcher::MatchPolicy;
use crate::registry::{ListKind, Registry};

/// Role of the process owning the lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// The supervising process (worker id 0); announces new entries
    #[default]
    Primary,
    /// A delegate process started with a non-zero id; stays quiet
    Worker(u32),
}

impl Role {
    /// Map a worker id to a role, 0 being the primary process
    pub fn from_id(id: u32) -> Self {
        if id == 0 {
            Self::Primary
        } else {
            Self::Worker(id)
        }
    }

    /// Whether this is the primary process
    pub fn is_primary(self) -> bool {
        matches!(self, Self::Primary)
    }
}

/// Combined request-path decision for one domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Nothing prevents resolution
    Allowed,
    /// Matched by the blocklist
    Blocked,
    /// A whitelist is configured and the domain is not on it
    NotWhitelisted,
}

impl Verdict {
    /// Whether the domain may be resolved
    pub fn is_allowed(self) -> bool {
        self == Self::Allowed
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Allowed => "allowed",
            Self::Blocked => "blocked",
            Self::NotWhitelisted => "not whitelisted",
        })
    }
}

/// The two admission lists of one process
#[derive(Debug, Clone)]
pub struct DomainLists {
    whitelist: Registry,
    blocklist: Registry,
    policy: MatchPolicy,
    role: Role,
}

impl Default for DomainLists {
    fn default() -> Self {
        Self::new(Role::Primary)
    }
}

impl DomainLists {
    /// Create empty lists
    pub fn new(role: Role) -> Self {
        Self {
            whitelist: Registry::new(ListKind::Whitelist),
            blocklist: Registry::new(ListKind::Blocklist),
            policy: MatchPolicy::default(),
            role,
        }
    }

    /// Build lists from configuration: inline domains first, then files
    pub fn from_config(config: &Config, role: Role) -> Result<Self> {
        let mut lists = Self::new(role).with_policy(config.match_policy());

        for domain in &config.lists.whitelist {
            lists.add_to_whitelist(domain.trim());
        }
        for domain in &config.lists.blocklist {
            lists.add_to_blocklist(domain.trim());
        }
        for path in &config.lists.whitelist_files {
            lists.load_whitelist_file(path)?;
        }
        for path in &config.lists.blocklist_files {
            lists.load_blocklist_file(path)?;
        }

        Ok(lists)
    }

    /// Replace the blocklist match policy
    #[must_use]
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current blocklist match policy
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Role these lists were created for
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whitelist registry
    pub fn whitelist(&self) -> &Registry {
        &self.whitelist
    }

    /// Blocklist registry
    pub fn blocklist(&self) -> &Registry {
        &self.blocklist
    }

    /// Registry backing the given list
    pub fn registry(&self, kind: ListKind) -> &Registry {
        match kind {
            ListKind::Whitelist => &self.whitelist,
            ListKind::Blocklist => &self.blocklist,
        }
    }

    /// True when at least one domain is whitelisted
    pub fn is_whitelist_active(&self) -> bool {
        !self.whitelist.is_empty()
    }

    /// True when at least one domain is blocklisted
    pub fn is_blocklist_active(&self) -> bool {
        !self.blocklist.is_empty()
    }

    /// Number of whitelisted domains
    pub fn whitelist_count(&self) -> usize {
        self.whitelist.len()
    }

    /// Number of blocklisted domains
    pub fn blocklist_count(&self) -> usize {
        self.blocklist.len()
    }

    /// Add a domain to the whitelist; `true` if it was not there yet
    pub fn add_to_whitelist(&mut self, domain: &str) -> bool {
        let added = self.whitelist.insert(domain);
        self.announce(ListKind::Whitelist, domain, added);
        added
    }

    /// Add a domain to the blocklist; `true` if it was not there yet
    pub fn add_to_blocklist(&mut self, domain: &str) -> bool {
        let added = self.blocklist.insert(domain);
        self.announce(ListKind::Blocklist, domain, added);
        added
    }

    /// Bulk-load the whitelist from a file
    pub fn load_whitelist_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        self.whitelist.load_file(path)
    }

    /// Bulk-load the blocklist from a file
    pub fn load_blocklist_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        self.blocklist.load_file(path)
    }

    /// `true` when the domain is NOT on the whitelist.
    ///
    /// Full-name matching after `www.` stripping; an empty whitelist
    /// reports every domain. Pair with [`DomainLists::is_whitelist_active`]
    /// to tell "no whitelist" from "not whitelisted".
    pub fn whitelist_blocked(&self, domain: &str) -> bool {
        self.whitelist.find_exact(domain).is_none()
    }

    /// `true` when the domain or one of its parents is blocklisted
    pub fn blocklist_blocked(&self, domain: &str) -> bool {
        match self.blocklist.find_suffix(domain, self.policy) {
            Some(entry) => {
                debug!(domain, entry = entry.value(), "Blocklist hit");
                true
            }
            None => false,
        }
    }

    /// Decide a domain the way the request path does
    pub fn verdict(&self, domain: &str) -> Verdict {
        if self.blocklist_blocked(domain) {
            Verdict::Blocked
        } else if self.is_whitelist_active() && self.whitelist_blocked(domain) {
            Verdict::NotWhitelisted
        } else {
            Verdict::Allowed
        }
    }

    /// Fill slots with `--whitelist=` tokens; see [`Registry::write_command_args`]
    pub fn serialize_whitelist(&self, slots: &mut [String]) -> Result<usize> {
        self.whitelist.write_command_args(slots)
    }

    /// Fill slots with `--blocklist=` tokens; see [`Registry::write_command_args`]
    pub fn serialize_blocklist(&self, slots: &mut [String]) -> Result<usize> {
        self.blocklist.write_command_args(slots)
    }

    /// `--whitelist=` tokens, newest first
    pub fn whitelist_command(&self) -> Vec<String> {
        self.whitelist.command_args()
    }

    /// `--blocklist=` tokens, newest first
    pub fn blocklist_command(&self) -> Vec<String> {
        self.blocklist.command_args()
    }

    /// Arguments recreating both lists in a worker process
    pub fn command_line(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.whitelist_count() + self.blocklist_count());
        args.extend(self.whitelist_command());
        args.extend(self.blocklist_command());
        args
    }

    /// Notice for a newly stored entry, primary role only.
    ///
    /// The line goes out as an `info` event with target `dgate::lists`, so it
    /// follows the log subscriber: it lands on stderr, takes the configured
    /// log format, and is silenced by `-q` or a `RUST_LOG` filter below `info`.
    fn announce(&self, kind: ListKind, domain: &str, added: bool) {
        if added && self.role.is_primary() {
            info!(target: "dgate::lists", "{} {}", kind, domain);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lists() {
        let lists = DomainLists::default();
        assert!(!lists.is_whitelist_active());
        assert!(!lists.is_blocklist_active());
        assert!(lists.whitelist_blocked("example.org"));
        assert!(!lists.blocklist_blocked("example.org"));
        assert_eq!(lists.verdict("example.org"), Verdict::Allowed);
        assert!(lists.command_line().is_empty());
    }

    #[test]
    fn test_whitelist_exact_match() {
        let mut lists = DomainLists::default();
        assert!(lists.add_to_whitelist("example.org"));
        assert!(lists.is_whitelist_active());
        assert!(!lists.whitelist_blocked("example.org"));
        assert!(lists.whitelist_blocked("sub.example.org"));
        assert!(!lists.whitelist_blocked("www.example.org"));
    }

    #[test]
    fn test_blocklist_suffix_match() {
        let mut lists = DomainLists::default();
        assert!(lists.add_to_blocklist("gentoo.org"));
        assert!(lists.blocklist_blocked("gentoo.org"));
        assert!(lists.blocklist_blocked("security.gentoo.org"));
        assert!(lists.blocklist_blocked("www.gentoo.org"));
        assert!(!lists.blocklist_blocked("gentoo.org.evil.com"));
        assert!(lists.blocklist_blocked("fakegentoo.org"));
    }

    #[test]
    fn test_blocklist_label_boundary() {
        let mut lists = DomainLists::default().with_policy(MatchPolicy::LabelBoundary);
        lists.add_to_blocklist("gentoo.org");
        assert!(lists.blocklist_blocked("security.gentoo.org"));
        assert!(!lists.blocklist_blocked("fakegentoo.org"));
    }

    #[test]
    fn test_lists_are_independent() {
        let mut lists = DomainLists::default();
        lists.add_to_blocklist("example.org");
        assert!(!lists.is_whitelist_active());
        assert!(lists.whitelist_blocked("example.org"));
        assert!(lists.add_to_whitelist("example.org"));
        assert_eq!(lists.whitelist_count(), 1);
        assert_eq!(lists.blocklist_count(), 1);
    }

    #[test]
    fn test_verdict() {
        let mut lists = DomainLists::default();
        lists.add_to_blocklist("ads.example.org");
        assert_eq!(lists.verdict("x.ads.example.org"), Verdict::Blocked);
        assert_eq!(lists.verdict("example.org"), Verdict::Allowed);

        lists.add_to_whitelist("example.org");
        assert_eq!(lists.verdict("example.org"), Verdict::Allowed);
        assert_eq!(lists.verdict("other.org"), Verdict::NotWhitelisted);
        assert!(!lists.verdict("other.org").is_allowed());
        // Blocklist wins over whitelist
        lists.add_to_whitelist("ads.example.org");
        assert_eq!(lists.verdict("ads.example.org"), Verdict::Blocked);
    }

    #[test]
    fn test_command_line_order() {
        let mut lists = DomainLists::new(Role::Worker(2));
        lists.add_to_whitelist("a.org");
        lists.add_to_whitelist("b.org");
        lists.add_to_blocklist("c.org");
        assert_eq!(
            lists.command_line(),
            ["--whitelist=b.org", "--whitelist=a.org", "--blocklist=c.org"]
        );
    }

    #[test]
    fn test_serialize_slots() {
        let mut lists = DomainLists::default();
        lists.add_to_blocklist("a.org");
        let mut slots = vec![String::new(); lists.blocklist_count()];
        assert_eq!(lists.serialize_blocklist(&mut slots).unwrap(), 1);
        assert_eq!(slots, ["--blocklist=a.org"]);

        let mut none: Vec<String> = Vec::new();
        assert_eq!(lists.serialize_whitelist(&mut none).unwrap(), 0);
    }

    #[test]
    fn test_role() {
        assert_eq!(Role::from_id(0), Role::Primary);
        assert_eq!(Role::from_id(3), Role::Worker(3));
        assert!(Role::Primary.is_primary());
        assert!(!Role::Worker(1).is_primary());
    }

    #[test]
    fn test_from_config_inline() {
        let mut config = Config::default();
        config.lists.whitelist = vec![" example.org ".to_string(), "www.example.org".to_string()];
        config.lists.blocklist = vec!["gentoo.org".to_string()];
        config.matching.label_boundary = true;

        let lists = DomainLists::from_config(&config, Role::Primary).unwrap();
        assert_eq!(lists.whitelist_count(), 1);
        assert_eq!(lists.blocklist_count(), 1);
        assert_eq!(lists.policy(), MatchPolicy::LabelBoundary);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::NotWhitelisted.to_string(), "not whitelisted");
        assert_eq!(Verdict::Blocked.to_string(), "blocked");
    }
}
