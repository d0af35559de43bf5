//! Visual theme and styling.

use console::Style;

use crate::probe::ProbeStatus;
use crate::report::OverallStatus;

/// The oops visual theme.
#[derive(Debug, Clone)]
pub struct OopsTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for informational elements (cyan).
    pub info: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for contextual hints (cyan dim).
    pub hint: Style,
    /// Style for latencies (dim).
    pub duration: Style,
}

impl Default for OopsTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl OopsTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            info: Style::new().cyan(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            hint: Style::new().cyan().dim(),
            duration: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            hint: Style::new(),
            duration: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("◆"),
            self.highlight.apply_to(title)
        )
    }

    /// Style a verdict label.
    pub fn format_verdict(&self, status: OverallStatus) -> String {
        let style = match status {
            OverallStatus::Success => &self.success,
            OverallStatus::Warning => &self.warning,
            OverallStatus::Error => &self.error,
            OverallStatus::Skipped => &self.dim,
        };
        style.apply_to(status.as_str()).to_string()
    }

    /// Icon for a single probe attempt.
    pub fn probe_icon(&self, status: ProbeStatus) -> String {
        match status {
            ProbeStatus::Success => self.success.apply_to("✓").to_string(),
            ProbeStatus::Failure => self.error.apply_to("✗").to_string(),
            ProbeStatus::Timeout => self.warning.apply_to("⧗").to_string(),
            ProbeStatus::Error => self.error.apply_to("!").to_string(),
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = OopsTheme::plain().format_success("Complete");
        assert_eq!(msg, "✓ Complete");
    }

    #[test]
    fn theme_formats_warning() {
        let msg = OopsTheme::plain().format_warning("Caution");
        assert_eq!(msg, "⚠ Caution");
    }

    #[test]
    fn theme_formats_error() {
        let msg = OopsTheme::plain().format_error("Failed");
        assert_eq!(msg, "✗ Failed");
    }

    #[test]
    fn theme_formats_skipped() {
        let msg = OopsTheme::plain().format_skipped("Skipped");
        assert_eq!(msg, "○ Skipped");
    }

    #[test]
    fn theme_formats_header() {
        let msg = OopsTheme::plain().format_header("Network");
        assert!(msg.contains("Network"));
        assert!(msg.contains("◆"));
    }

    #[test]
    fn plain_verdict_is_bare_label() {
        let theme = OopsTheme::plain();
        assert_eq!(theme.format_verdict(OverallStatus::Warning), "warning");
        assert_eq!(theme.format_verdict(OverallStatus::Skipped), "skipped");
    }

    #[test]
    fn probe_icons_are_distinct() {
        let theme = OopsTheme::plain();
        let icons: Vec<_> = [
            ProbeStatus::Success,
            ProbeStatus::Failure,
            ProbeStatus::Timeout,
            ProbeStatus::Error,
        ]
        .into_iter()
        .map(|s| theme.probe_icon(s))
        .collect();
        assert_eq!(icons, vec!["✓", "✗", "⧗", "!"]);
    }

    #[test]
    fn default_impl_matches_new() {
        let default = OopsTheme::default();
        let new = OopsTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
