//! # dgate core
//!
//! Domain admission lists for a DNS filtering proxy.
//!
//! ## Architecture
//!
//! This crate provides:
//! - **Normalization** - `www.` stripping applied to every stored and queried name
//! - **Registries** - insertion-tracked, duplicate-free domain collections
//! - **Matching** - exact (whitelist) and suffix (blocklist) queries
//! - **Loading and serialization** - plain-text list files in, worker arguments out
//! - **Configuration** - TOML configuration for inline domains and list files
//!
//! ## Example
//!
//! ```rust,no_run
//! use dgate_core::{DomainLists, Role};
//!
//! let mut lists = DomainLists::new(Role::Primary);
//! lists.add_to_blocklist("gentoo.org");
//! lists.load_whitelist_file("/etc/dgate/whitelist.txt")?;
//!
//! assert!(lists.blocklist_blocked("security.gentoo.org"));
//!
//! // Rebuild the arguments for a worker process
//! let argv = lists.command_line();
//! # Ok::<(), dgate_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod domain;
pub mod error;
pub mod lists;
pub mod matcher;
pub mod registry;

// Re-exports for convenience
pub use config::Config;
pub use domain::normalize;
pub use error::{Error, Result};
pub use lists::{DomainLists, Role, Verdict};
pub use matcher::MatchPolicy;
pub use registry::{Entry, ListKind, Registry};
