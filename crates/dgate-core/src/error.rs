//! Error types for dgate-core
//!
//! Centralized error handling using `thiserror` for ergonomic error definitions.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for dgate-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// A domain list file could not be opened
    #[error(
        "cannot open {}: {source}\nIf AppArmor is enabled, please place the file in {config_dir} directory",
        path.display()
    )]
    ListFile {
        /// Path of the list file
        path: PathBuf,
        /// Directory the confinement profile allows reading from
        config_dir: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A domain list file was opened but reading it failed
    #[error("failed to read {} at line {line}: {source}", path.display())]
    ListRead {
        /// Path of the list file
        path: PathBuf,
        /// 1-based line number where reading stopped
        line: usize,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Destination slots cannot hold every serialized entry
    #[error("need {needed} argument slots, only {available} provided")]
    SlotsTooSmall {
        /// Number of entries in the registry
        needed: usize,
        /// Number of slots handed in by the caller
        available: usize,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// Path to the missing config file
        path: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    ConfigValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a list-file open error carrying the confinement hint
    pub fn list_file(path: impl AsRef<Path>, config_dir: impl Into<String>, source: std::io::Error) -> Self {
        Self::ListFile {
            path: path.as_ref().to_path_buf(),
            config_dir: config_dir.into(),
            source,
        }
    }

    /// Create a config value error
    pub fn config_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_list_file_display() {
        let err = Error::list_file(
            "/tmp/missing.txt",
            "/etc/dgate",
            io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        );
        let text = err.to_string();
        assert!(text.contains("cannot open /tmp/missing.txt"));
        assert!(text.contains("AppArmor"));
        assert!(text.contains("/etc/dgate directory"));
    }

    #[test]
    fn test_slots_display() {
        let err = Error::SlotsTooSmall { needed: 3, available: 1 };
        assert_eq!(err.to_string(), "need 3 argument slots, only 1 provided");
    }

    #[test]
    fn test_config_value() {
        let err = Error::config_value("lists.whitelist", "empty domain");
        match err {
            Error::ConfigValue { key, .. } => assert_eq!(key, "lists.whitelist"),
            _ => panic!("Wrong error type"),
        }
    }
}
