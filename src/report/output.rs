//! Serializable report shape for renderers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::catalog::target::TargetKind;
use crate::probe::types::{ProbePathResult, ProbeStatus};
use crate::report::aggregate::{NetworkCheckReport, OverallStatus};
use crate::report::suggest::get_fix_suggestion;

/// The report as handed to renderers and printed by `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub status: OverallStatus,
    pub message: String,
    pub details: BTreeMap<String, DetailOutput>,
    pub fix_suggestion: String,
    pub checked_at: DateTime<Utc>,
}

/// One attempt in [`ReportOutput::details`].
#[derive(Debug, Clone, Serialize)]
pub struct DetailOutput {
    pub status: ProbeStatus,
    pub response_time_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub kind: TargetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<bool>,
}

impl From<&ProbePathResult> for DetailOutput {
    fn from(result: &ProbePathResult) -> Self {
        Self {
            status: result.status,
            response_time_ms: result.latency_ms,
            status_code: result.status_code,
            content_length: result.content_length,
            error: result.error_text.clone(),
            kind: result.kind(),
            proxy: result.path_mode.uses_proxy(),
        }
    }
}

impl From<&NetworkCheckReport> for ReportOutput {
    fn from(report: &NetworkCheckReport) -> Self {
        Self {
            status: report.overall_status,
            message: report.message.clone(),
            details: report
                .raw_results
                .iter()
                .map(|(key, result)| (key.clone(), DetailOutput::from(result)))
                .collect(),
            fix_suggestion: get_fix_suggestion(report),
            checked_at: report.checked_at,
        }
    }
}

impl ReportOutput {
    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
