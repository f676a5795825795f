//! Domain registry
//!
//! An insertion-tracked, duplicate-free collection of normalized domain
//! names. Entries are never removed or rewritten; the registry only grows
//! until it is dropped.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::DEFAULT_CONFIG_DIR;
use crate::domain::{clean_line, normalize};
use crate::error::{Error, Result};
use crate::matcher::{exact_matches, MatchPolicy};

/// Which of the two lists a registry backs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Explicitly allowed domains, matched exactly
    Whitelist,
    /// Explicitly denied domains and their subdomains, matched by suffix
    Blocklist,
}

impl ListKind {
    /// Lowercase list name, also used in notice lines
    pub fn name(self) -> &'static str {
        match self {
            Self::Whitelist => "whitelist",
            Self::Blocklist => "blocklist",
        }
    }

    /// Command-line flag that recreates one entry of this list
    pub fn flag(self) -> &'static str {
        match self {
            Self::Whitelist => "--whitelist",
            Self::Blocklist => "--blocklist",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single registered domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    value: Box<str>,
    len: usize,
}

impl Entry {
    pub(crate) fn new(value: &str) -> Self {
        Self {
            value: value.into(),
            len: value.len(),
        }
    }

    /// Normalized domain name
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Byte length of [`Entry::value`]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Ordered, duplicate-free set of normalized domains
#[derive(Debug, Clone)]
pub struct Registry {
    kind: ListKind,
    /// Oldest first
    entries: Vec<Entry>,
    index: HashSet<String>,
}

impl Registry {
    /// Create an empty registry
    pub fn new(kind: ListKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashSet::new(),
        }
    }

    /// List this registry backs
    pub fn kind(&self) -> ListKind {
        self.kind
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, most recently inserted first
    pub fn iter(&self) -> impl Iterator<Item = &Entry> + '_ {
        self.entries.iter().rev()
    }

    /// Insert a domain.
    ///
    /// The name is normalized first. Returns `true` only when a new entry
    /// was created; repeated insertion of an equivalent name is a no-op.
    pub fn insert(&mut self, domain: &str) -> bool {
        let name = normalize(domain);
        if name.is_empty() {
            warn!(list = %self.kind, raw = domain, "Ignoring empty domain");
            return false;
        }
        if self.index.contains(name) {
            return false;
        }

        self.index.insert(name.to_owned());
        self.entries.push(Entry::new(name));
        debug!(list = %self.kind, domain = name, "Registered domain");
        true
    }

    /// Entry equal to the normalized name, if any
    pub fn find_exact(&self, domain: &str) -> Option<&Entry> {
        let name = normalize(domain);
        if !self.index.contains(name) {
            return None;
        }
        self.iter().find(|entry| exact_matches(entry, name))
    }

    /// First entry, newest first, that covers the normalized name by suffix
    pub fn find_suffix(&self, domain: &str, policy: MatchPolicy) -> Option<&Entry> {
        let name = normalize(domain);
        self.iter().find(|entry| policy.suffix_matches(entry, name))
    }

    /// Load entries from a list file.
    ///
    /// Returns the number of newly added entries. A file that cannot be
    /// opened yields [`Error::ListFile`], which names the directory a
    /// confinement profile would let the process read from.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::list_file(path, DEFAULT_CONFIG_DIR, e))?;
        let added = self.load_reader(BufReader::new(file), path)?;
        info!("Loaded {} {} domains from {}", added, self.kind, path.display());
        Ok(added)
    }

    /// Load entries from any buffered reader.
    ///
    /// `origin` only labels read errors.
    pub fn load_reader<R: BufRead, P: AsRef<Path>>(&mut self, mut reader: R, origin: P) -> Result<usize> {
        let mut added = 0;
        let mut line = Vec::new();
        let mut line_no = 0;
        let read_error = |at: usize, source: io::Error| Error::ListRead {
            path: origin.as_ref().to_path_buf(),
            line: at,
            source,
        };

        loop {
            line.clear();
            line_no += 1;
            let read = reader
                .read_until(b'\n', &mut line)
                .map_err(|source| read_error(line_no, source))?;
            if read == 0 {
                break;
            }
            let Some(token) = clean_line(&line) else {
                continue;
            };
            let token = std::str::from_utf8(token)
                .map_err(|e| read_error(line_no, io::Error::new(io::ErrorKind::InvalidData, e)))?;
            if self.insert(token) {
                added += 1;
            }
        }

        Ok(added)
    }

    /// Command-line tokens recreating every entry, newest first
    pub fn command_args(&self) -> Vec<String> {
        self.iter().map(|entry| self.format_arg(entry)).collect()
    }

    /// Write the command-line tokens into caller-provided slots.
    ///
    /// `slots` must hold at least [`Registry::len`] strings; the number of
    /// slots written is returned. Slots past that count are left untouched.
    pub fn write_command_args(&self, slots: &mut [String]) -> Result<usize> {
        if slots.len() < self.len() {
            return Err(Error::SlotsTooSmall {
                needed: self.len(),
                available: slots.len(),
            });
        }

        for (slot, entry) in slots.iter_mut().zip(self.iter()) {
            *slot = self.format_arg(entry);
        }
        Ok(self.len())
    }

    fn format_arg(&self, entry: &Entry) -> String {
        format!("{}={}", self.kind.flag(), entry.value())
    }
}
