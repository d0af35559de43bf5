//! Targets command implementation.
//!
//! The `oops targets` command prints the merged endpoint catalog without
//! touching the network.

use crate::catalog::{Catalog, CatalogBuilder, ProbeTarget};
use crate::cli::args::TargetsArgs;
use crate::error::{OopsError, Result};
use crate::report::DISABLED_MESSAGE;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The targets command implementation.
pub struct TargetsCommand {
    context: CommandContext,
    args: TargetsArgs,
}

impl TargetsCommand {
    /// Create a new targets command.
    pub fn new(context: CommandContext, args: TargetsArgs) -> Self {
        Self { context, args }
    }
}

impl Command for TargetsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = match self.context.load_project() {
            Ok(project) => project,
            Err(OopsError::ConfigNotFound { path }) => {
                ui.error(&format!("No configuration found at {}", path.display()));
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let defaults = self.context.defaults_loader();
        let catalog = CatalogBuilder::new(defaults.get()).build(&project);

        if self.args.json {
            let json = serde_json::to_string_pretty(catalog.targets())
                .map_err(|e| OopsError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        match catalog {
            Catalog::Disabled => ui.message(DISABLED_MESSAGE),
            Catalog::Targets(targets) if targets.is_empty() => {
                ui.warning("No network targets configured")
            }
            Catalog::Targets(targets) => {
                for target in &targets {
                    ui.message(&format_target(target));
                }
                ui.message("");
                ui.message(&format!("{} target(s)", targets.len()));
            }
        }

        Ok(CommandResult::success())
    }
}

fn format_target(target: &ProbeTarget) -> String {
    let url = if target.dynamic && target.url.is_empty() {
        "(dynamic)"
    } else {
        target.url.as_str()
    };
    format!(
        "  {:<12} {:<16} {}",
        target.kind.display_name(),
        target.display_name,
        url
    )
}
