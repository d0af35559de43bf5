//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations:
//! - `oops network` runs the reachability check
//! - `oops targets` lists the merged catalog

pub mod dispatcher;
pub mod network;
pub mod targets;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult};
