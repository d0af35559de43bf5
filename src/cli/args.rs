//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// oops - Pre-flight diagnostics for project environments.
#[derive(Debug, Parser)]
#[command(name = "oops")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project config (overrides ./oops.yaml)
    #[arg(short, long, global = true, env = "OOPS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the network defaults file (overrides ./configs/defaults.yaml)
    #[arg(long, global = true, env = "OOPS_DEFAULTS")]
    pub defaults: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// List every probe attempt
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check network reachability (default if no command specified)
    Network(NetworkArgs),

    /// List the endpoints that would be probed
    Targets(TargetsArgs),
}

/// Report format for the `network` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `network` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NetworkArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Per-probe timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip dynamic GitHub proxy discovery
    #[arg(long)]
    pub no_dynamic: bool,
}

/// Arguments for the `targets` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TargetsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
