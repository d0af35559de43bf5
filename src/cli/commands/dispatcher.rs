//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the paths every command reads
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, NetworkArgs};
use crate::config::{
    load_project_config, project_config_path, DefaultsLoader, ProjectConfig, DEFAULTS_CONFIG_FILE,
};
use crate::error::Result;
use crate::ui::UserInterface;

use super::network::NetworkCommand;
use super::targets::TargetsCommand;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Resolved file locations for a command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    project_root: PathBuf,
    config_path: PathBuf,
    defaults_path: PathBuf,
}

impl CommandContext {
    /// Use `oops.yaml` and `configs/defaults.yaml` under `project_root`.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path: project_config_path(project_root, None),
            defaults_path: project_root.join(DEFAULTS_CONFIG_FILE),
        }
    }

    /// Override the project config location.
    pub fn with_config(mut self, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            self.config_path = project_config_path(&self.project_root, Some(path));
        }
        self
    }

    /// Override the defaults file location.
    pub fn with_defaults(mut self, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            self.defaults_path = path.to_path_buf();
        }
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn defaults_path(&self) -> &Path {
        &self.defaults_path
    }

    /// Load the project config.
    pub fn load_project(&self) -> Result<ProjectConfig> {
        load_project_config(&self.config_path)
    }

    /// A loader over the configured defaults file.
    pub fn defaults_loader(&self) -> DefaultsLoader {
        DefaultsLoader::new(&self.defaults_path)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher over the given context.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &CommandContext {
        &self.context
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Network(args)) => {
                let cmd = NetworkCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Targets(args)) => {
                let cmd = TargetsCommand::new(self.context.clone(), args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to the network check with default args
                let cmd = NetworkCommand::new(self.context.clone(), NetworkArgs::default());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn context_uses_default_locations() {
        let context = CommandContext::new(Path::new("/project"));
        assert_eq!(context.config_path(), Path::new("/project/oops.yaml"));
        assert_eq!(
            context.defaults_path(),
            Path::new("/project/configs/defaults.yaml")
        );
    }

    #[test]
    fn context_applies_overrides() {
        let context = CommandContext::new(Path::new("/project"))
            .with_config(Some(Path::new("/etc/oops.yaml")))
            .with_defaults(Some(Path::new("/etc/defaults.yaml")))
            .with_defaults(None);
        assert_eq!(context.config_path(), Path::new("/etc/oops.yaml"));
        assert_eq!(context.defaults_path(), Path::new("/etc/defaults.yaml"));
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(CommandContext::new(Path::new("/test")));
        assert_eq!(dispatcher.context().project_root(), Path::new("/test"));
    }
}
