//! Configuration loading and parsing for oops.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File loading and defaults memoization in [`loader`]
//!
//! # Example
//!
//! ```
//! use oops::config::load_project_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("oops.yaml");
//! fs::write(&path, "checks:\n  network:\n    enabled: true\n").unwrap();
//!
//! let config = load_project_config(&path).unwrap();
//! assert!(config.checks.network.enabled);
//! ```
//!
//! # Configuration Files
//!
//! - Project config (`oops.yaml`): `checks.network` section
//! - Defaults (`configs/defaults.yaml`): `network_defaults` section,
//!   falling back to built-in defaults when absent

pub mod loader;
pub mod schema;

// Schema re-exports
pub use schema::{
    ChecksConfig, DefaultsFile, EntryRecord, NetworkDefaults, NetworkSection, ProjectConfig,
    RawEntry,
};

// Loader re-exports
pub use loader::{
    load_defaults_file, load_project_config, parse_project_config, project_config_path,
    DefaultsLoader, DEFAULTS_CONFIG_FILE, PROJECT_CONFIG_FILE,
};
