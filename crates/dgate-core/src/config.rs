//! Configuration management for dgate
//!
//! Strongly-typed TOML configuration naming inline domains, list files and
//! the blocklist match policy.

use crate::domain::normalize;
use crate::error::{Error, Result};
use crate::matcher::MatchPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// System configuration directory.
///
/// List files placed here are readable under the shipped confinement
/// profile. Packagers can relocate it with `DGATE_SYSCONFDIR` at build time.
pub const DEFAULT_CONFIG_DIR: &str = match option_env!("DGATE_SYSCONFDIR") {
    Some(dir) => dir,
    None => "/etc/dgate",
};

/// Log levels accepted in `[logging] level`
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inline domains and list files
    pub lists: ListsConfig,

    /// Matching behavior
    pub matching: MatchingConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::ConfigNotFound {
                path: path.display().to_string(),
            },
            _ => Error::Io(e),
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(Error::from)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (key, domains) in [
            ("lists.whitelist", &self.lists.whitelist),
            ("lists.blocklist", &self.lists.blocklist),
        ] {
            if let Some(bad) = domains.iter().find(|d| normalize(d.trim()).is_empty()) {
                return Err(Error::config_value(key, format!("empty domain entry {bad:?}")));
            }
        }

        for (key, files) in [
            ("lists.whitelist_files", &self.lists.whitelist_files),
            ("lists.blocklist_files", &self.lists.blocklist_files),
        ] {
            if files.iter().any(|f| f.as_os_str().is_empty()) {
                return Err(Error::config_value(key, "empty file path"));
            }
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::config_value(
                "logging.level",
                format!("unknown level '{}', expected one of {}", self.logging.level, LOG_LEVELS.join(", ")),
            ));
        }

        Ok(())
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Blocklist match policy selected by `[matching]`
    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy::from_label_boundary(self.matching.label_boundary)
    }

    /// Starter configuration pointing at the system list files
    pub fn sample() -> Self {
        let dir = Path::new(DEFAULT_CONFIG_DIR);
        Self {
            lists: ListsConfig {
                whitelist: Vec::new(),
                blocklist: Vec::new(),
                whitelist_files: vec![dir.join("whitelist.txt")],
                blocklist_files: vec![dir.join("blocklist.txt")],
            },
            ..Self::default()
        }
    }
}

/// Domain sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    /// Domains allowed by exact name
    pub whitelist: Vec<String>,
    /// Domains denied together with their subdomains
    pub blocklist: Vec<String>,
    /// Whitelist files, one domain per line
    pub whitelist_files: Vec<PathBuf>,
    /// Blocklist files, one domain per line
    pub blocklist_files: Vec<PathBuf>,
}

/// Matching behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Require blocklist hits to start on a label boundary
    pub label_boundary: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when neither `RUST_LOG` nor `-v`/`-q` say otherwise
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
