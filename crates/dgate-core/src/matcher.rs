//! Match semantics layered over a registry
//!
//! Whitelist entries match by full-name equality. Blocklist entries match
//! the tail of the queried name; how strictly that tail is anchored is
//! decided by [`MatchPolicy`].

use crate::registry::Entry;

/// How a blocklist entry is compared against a queried name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// The first occurrence of the entry inside the name must run to the end
    /// of the name. No label boundary is required, so `gentoo.org` also
    /// catches `fakegentoo.org`.
    #[default]
    Substring,
    /// The name must equal the entry or end with `.` followed by the entry.
    LabelBoundary,
}

impl MatchPolicy {
    /// Build from the `label_boundary` configuration switch
    pub fn from_label_boundary(strict: bool) -> Self {
        if strict {
            Self::LabelBoundary
        } else {
            Self::Substring
        }
    }

    /// Check a normalized name against one blocklist entry
    pub fn suffix_matches(self, entry: &Entry, name: &str) -> bool {
        match self {
            Self::Substring => match name.find(entry.value()) {
                Some(pos) => name.len() - pos == entry.len(),
                None => false,
            },
            Self::LabelBoundary => {
                if !name.ends_with(entry.value()) {
                    return false;
                }
                let start = name.len() - entry.len();
                start == 0 || name.as_bytes()[start - 1] == b'.'
            }
        }
    }
}

/// Check a normalized name against one whitelist entry
pub fn exact_matches(entry: &Entry, name: &str) -> bool {
    entry.len() == name.len() && entry.value() == name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(value: &str) -> Entry {
        Entry::new(value)
    }

    #[test]
    fn test_exact() {
        let e = entry("example.org");
        assert!(exact_matches(&e, "example.org"));
        assert!(!exact_matches(&e, "sub.example.org"));
        assert!(!exact_matches(&e, "example.org.evil.com"));
        assert!(!exact_matches(&e, "Example.org"));
    }

    #[test]
    fn test_substring_policy() {
        let e = entry("gentoo.org");
        let policy = MatchPolicy::Substring;
        assert!(policy.suffix_matches(&e, "gentoo.org"));
        assert!(policy.suffix_matches(&e, "security.gentoo.org"));
        assert!(policy.suffix_matches(&e, "a.b.gentoo.org"));
        assert!(!policy.suffix_matches(&e, "gentoo.org.evil.com"));
        assert!(!policy.suffix_matches(&e, "gentoo.net"));
        // No label boundary in this mode
        assert!(policy.suffix_matches(&e, "fakegentoo.org"));
    }

    #[test]
    fn test_substring_policy_uses_first_occurrence() {
        let e = entry("gentoo.org");
        // The first hit is not at the tail, so the later one is never tried
        assert!(!MatchPolicy::Substring.suffix_matches(&e, "gentoo.org.gentoo.org"));
        assert!(MatchPolicy::LabelBoundary.suffix_matches(&e, "gentoo.org.gentoo.org"));
    }

    #[test]
    fn test_label_boundary_policy() {
        let e = entry("gentoo.org");
        let policy = MatchPolicy::LabelBoundary;
        assert!(policy.suffix_matches(&e, "gentoo.org"));
        assert!(policy.suffix_matches(&e, "security.gentoo.org"));
        assert!(!policy.suffix_matches(&e, "fakegentoo.org"));
        assert!(!policy.suffix_matches(&e, "gentoo.org.evil.com"));
        assert!(!policy.suffix_matches(&e, "org"));
    }

    #[test]
    fn test_from_label_boundary() {
        assert_eq!(MatchPolicy::from_label_boundary(false), MatchPolicy::Substring);
        assert_eq!(MatchPolicy::from_label_boundary(true), MatchPolicy::LabelBoundary);
        assert_eq!(MatchPolicy::default(), MatchPolicy::Substring);
    }
}
