//! oops - Pre-flight diagnostics for project environments.
//!
//! The network check probes the git hosts, package indexes, mirrors and
//! proxies a project depends on, all at once, and reduces the outcome to a
//! verdict with human-readable fix suggestions.
//!
//! # Modules
//!
//! - [`catalog`] - Which endpoints to probe, merged from defaults and project config
//! - [`check`] - The end-to-end network check
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and parsing
//! - [`error`] - Error types and result aliases
//! - [`probe`] - Concurrent git and HTTP probing
//! - [`report`] - Verdict, summary text and fix suggestions
//! - [`resolver`] - Dynamic GitHub proxy discovery
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use oops::catalog::CatalogBuilder;
//! use oops::config::{parse_project_config, NetworkDefaults};
//! use std::path::Path;
//!
//! let yaml = r#"
//! checks:
//!   network:
//!     enabled: true
//!     disable_defaults: [pypi_sources]
//!     git_repos: ["https://gitee.com/org/repo.git"]
//! "#;
//! let project = parse_project_config(yaml, Path::new("oops.yaml")).unwrap();
//! let defaults = NetworkDefaults::builtin();
//!
//! let catalog = CatalogBuilder::new(&defaults).build(&project);
//! let urls: Vec<_> = catalog.targets().iter().map(|t| t.url.as_str()).collect();
//! assert_eq!(urls, ["https://github.com", "https://gitee.com/org/repo.git"]);
//! ```

pub mod catalog;
pub mod check;
pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod report;
pub mod resolver;
pub mod ui;

pub use check::NetworkCheck;
pub use error::{OopsError, Result};
