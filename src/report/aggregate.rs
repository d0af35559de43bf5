//! Status aggregation.
//!
//! Reduces the settled probe results into a [`NetworkCheckReport`]: results
//! grouped by kind, an overall verdict, summary lines and fix suggestions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::target::{Criticality, TargetKind};
use crate::probe::types::{PathMode, ProbePathResult};
use crate::report::suggest;
use crate::report::summary;

/// Message carried by a report when the feature is turned off.
pub const DISABLED_MESSAGE: &str = "网络检测已禁用";

/// Message carried by a report when the feature is on but nothing is configured.
pub const EMPTY_CATALOG_MESSAGE: &str = "网络检测配置为空";

/// The verdict of a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Success,
    Warning,
    Error,
    Skipped,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Success => "success",
            OverallStatus::Warning => "warning",
            OverallStatus::Error => "error",
            OverallStatus::Skipped => "skipped",
        }
    }

    /// Whether this verdict blocks the project.
    pub fn is_error(&self) -> bool {
        matches!(self, OverallStatus::Error)
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All results of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeGroup {
    pub kind: TargetKind,
    pub criticality: Criticality,
    pub results: Vec<ProbePathResult>,
}

impl TypeGroup {
    pub fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            criticality: kind.criticality(),
            results: Vec::new(),
        }
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.total_count() - self.success_count()
    }

    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    pub fn is_critical(&self) -> bool {
        self.criticality == Criticality::Critical
    }

    /// Non-empty with no successful attempt.
    pub fn is_total_failure(&self) -> bool {
        self.total_count() > 0 && self.success_count() == 0
    }

    /// At least one success and at least one failure.
    pub fn is_partial_failure(&self) -> bool {
        self.success_count() > 0 && self.failure_count() > 0
    }
}

/// Apply the verdict rules to a set of groups.
///
/// A fully failed critical group is an error; a fully failed optional
/// group is a warning. Empty groups never count.
pub fn verdict<'a>(groups: impl IntoIterator<Item = &'a TypeGroup>) -> OverallStatus {
    let mut status = OverallStatus::Success;
    for group in groups {
        if !group.is_total_failure() {
            continue;
        }
        if group.is_critical() {
            return OverallStatus::Error;
        }
        status = OverallStatus::Warning;
    }
    status
}

/// The final output of a network check.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkCheckReport {
    pub overall_status: OverallStatus,
    /// Groups in kind order; only kinds with results are present.
    pub groups: BTreeMap<TargetKind, TypeGroup>,
    /// Every attempt, keyed by URL plus path suffix.
    pub raw_results: BTreeMap<String, ProbePathResult>,
    /// Header line followed by one line per group.
    pub summary_text: Vec<String>,
    pub fix_suggestions: Vec<String>,
    /// Distinct targets probed.
    pub target_count: usize,
    /// Multi-line message for renderers.
    pub message: String,
    pub checked_at: DateTime<Utc>,
}

impl NetworkCheckReport {
    /// Aggregate settled results.
    pub fn from_results(results: Vec<ProbePathResult>) -> Self {
        let target_count = results
            .iter()
            .filter(|r| matches!(r.path_mode, PathMode::Single | PathMode::Direct))
            .count();
        let attempt_count = results.len();

        let mut groups: BTreeMap<TargetKind, TypeGroup> = BTreeMap::new();
        let mut raw_results = BTreeMap::new();
        for result in results {
            raw_results.insert(result.key(), result.clone());
            groups
                .entry(result.kind())
                .or_insert_with(|| TypeGroup::new(result.kind()))
                .results
                .push(result);
        }

        let overall_status = verdict(groups.values());
        let summary_text = summary::summarize(groups.values(), target_count, attempt_count);
        let fix_suggestions = suggest::synthesize(overall_status, groups.values());

        tracing::info!(
            "Network check verdict: {} ({} target(s), {} attempt(s))",
            overall_status,
            target_count,
            attempt_count
        );

        Self {
            overall_status,
            groups,
            raw_results,
            message: summary_text.join("\n"),
            summary_text,
            fix_suggestions,
            target_count,
            checked_at: Utc::now(),
        }
    }

    /// A report for a run that did not probe anything.
    pub fn skipped(message: impl Into<String>) -> Self {
        Self::empty(OverallStatus::Skipped, message.into())
    }

    /// A report for a run that failed outright.
    pub fn failed(error: impl fmt::Display) -> Self {
        Self::empty(
            OverallStatus::Error,
            format!("网络检测执行失败: {}", error),
        )
    }

    fn empty(overall_status: OverallStatus, message: String) -> Self {
        Self {
            overall_status,
            groups: BTreeMap::new(),
            raw_results: BTreeMap::new(),
            summary_text: Vec::new(),
            fix_suggestions: Vec::new(),
            target_count: 0,
            message,
            checked_at: Utc::now(),
        }
    }

    /// Number of probe attempts recorded.
    pub fn attempt_count(&self) -> usize {
        self.groups.values().map(TypeGroup::total_count).sum()
    }

    pub fn group(&self, kind: TargetKind) -> Option<&TypeGroup> {
        self.groups.get(&kind)
    }
}
