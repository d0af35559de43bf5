//! Network command implementation.
//!
//! The `oops network` command runs the reachability check and prints the
//! summary, or the full report as JSON.

use std::time::Duration;

use crate::check::NetworkCheck;
use crate::cli::args::{NetworkArgs, ReportFormat};
use crate::error::{OopsError, Result};
use crate::probe::{ProbeSettings, DEFAULT_PROBE_TIMEOUT};
use crate::report::{get_fix_suggestion, NetworkCheckReport, OverallStatus, ReportOutput};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The network command implementation.
pub struct NetworkCommand {
    context: CommandContext,
    args: NetworkArgs,
}

impl NetworkCommand {
    /// Create a new network command.
    pub fn new(context: CommandContext, args: NetworkArgs) -> Self {
        Self { context, args }
    }

    fn settings(&self) -> ProbeSettings {
        ProbeSettings {
            timeout: self
                .args
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_PROBE_TIMEOUT),
            ..Default::default()
        }
    }

    fn check(&self) -> NetworkCheck {
        let check = NetworkCheck::new(self.context.defaults_loader()).with_settings(self.settings());
        if self.args.no_dynamic {
            check.without_dynamic()
        } else {
            check
        }
    }
}

impl Command for NetworkCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.args.timeout == Some(0) {
            return Err(OopsError::ConfigValidationError {
                message: "--timeout must be at least 1 second".to_string(),
            });
        }

        let project = match self.context.load_project() {
            Ok(project) => project,
            Err(OopsError::ConfigNotFound { path }) => {
                ui.error(&format!("No configuration found at {}", path.display()));
                ui.show_hint("Create an oops.yaml with a checks.network section, or pass --config");
                return Ok(CommandResult::failure(2));
            }
            Err(e) => return Err(e),
        };

        let check = self.check();
        let report = match self.args.format {
            ReportFormat::Json => {
                let report = check.run_blocking(&project);
                let json = ReportOutput::from(&report)
                    .to_json()
                    .map_err(|e| OopsError::Other(e.into()))?;
                ui.message(&json);
                report
            }
            ReportFormat::Text => {
                ui.show_header("网络检测");
                let mut spinner = ui.start_spinner("Probing network targets...");
                let report = check.run_blocking(&project);
                match report.overall_status {
                    OverallStatus::Skipped => spinner.finish_skipped(&report.message),
                    OverallStatus::Error => spinner.finish_error("Network check finished with errors"),
                    _ => spinner.finish_success("Network check finished"),
                }
                render_text(&report, ui);
                report
            }
        };

        if report.overall_status.is_error() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

/// Print a report as text.
pub fn render_text(report: &NetworkCheckReport, ui: &mut dyn UserInterface) {
    let mode = ui.output_mode();

    if mode.shows_status() {
        for line in report.message.lines() {
            ui.message(line);
        }
    }

    if mode.shows_details() && !report.raw_results.is_empty() {
        ui.message("");
        let details: Vec<String> = report
            .raw_results
            .iter()
            .map(|(key, result)| {
                let theme = ui.theme();
                let mut line = format!(
                    "  {} {} {}",
                    theme.probe_icon(result.status),
                    key,
                    theme.duration.apply_to(format!("{:.0}ms", result.latency_ms))
                );
                if let Some(error) = &result.error_text {
                    line.push_str(&format!(" {}", theme.dim.apply_to(error)));
                }
                line
            })
            .collect();
        for line in details {
            ui.message(&line);
        }
    }

    let verdict = format!("Status: {}", ui.theme().format_verdict(report.overall_status));
    match report.overall_status {
        OverallStatus::Success => ui.success(&verdict),
        OverallStatus::Warning => ui.warning(&verdict),
        OverallStatus::Error => ui.error(&verdict),
        OverallStatus::Skipped => ui.message(&verdict),
    }

    let suggestion = get_fix_suggestion(report);
    if !suggestion.is_empty() {
        ui.show_hint(&suggestion);
    }
}
