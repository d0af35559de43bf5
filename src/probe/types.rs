//! Probe result types.
//!
//! Each network attempt produces one [`ProbePathResult`]. Failures are
//! recorded here as data; nothing past the probe engine sees an `Err`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::catalog::target::{ProbeTarget, TargetKind};

/// Which network path an attempt took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// The only attempt for a git target.
    Single,
    /// Bypassing the ambient proxy configuration.
    Direct,
    /// Honoring the ambient proxy configuration.
    Proxied,
}

impl PathMode {
    /// Suffix appended to the target URL to form the result key.
    pub fn key_suffix(&self) -> &'static str {
        match self {
            PathMode::Single => "",
            PathMode::Direct => "_(direct)",
            PathMode::Proxied => "_(proxy)",
        }
    }

    /// Whether this attempt went through the ambient proxy, for HTTP paths.
    pub fn uses_proxy(&self) -> Option<bool> {
        match self {
            PathMode::Single => None,
            PathMode::Direct => Some(false),
            PathMode::Proxied => Some(true),
        }
    }
}

/// Outcome of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Success,
    /// The remote answered negatively (non-2xx, non-zero exit).
    Failure,
    Timeout,
    /// Transport-level exception (DNS, socket, process launch).
    Error,
}

impl ProbeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeStatus::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStatus::Success => "success",
            ProbeStatus::Failure => "failure",
            ProbeStatus::Timeout => "timeout",
            ProbeStatus::Error => "error",
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed attempt, before it is flattened into a [`ProbePathResult`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProbeError {
    #[error("检测超时 ({}秒)", .0.as_secs())]
    Timeout(Duration),

    /// The remote responded, but negatively.
    #[error("{}", connection_failure_text(.status_code, .message))]
    ConnectionFailure {
        status_code: Option<u16>,
        message: Option<String>,
    },

    #[error("{0}")]
    Transport(String),
}

fn connection_failure_text(status_code: &Option<u16>, message: &Option<String>) -> String {
    match (status_code, message) {
        (_, Some(message)) => message.to_string(),
        (Some(code), None) => format!("HTTP {}", code),
        (None, None) => "connection refused by remote".to_string(),
    }
}

impl ProbeError {
    /// The status this error is recorded as.
    pub fn status(&self) -> ProbeStatus {
        match self {
            ProbeError::Timeout(_) => ProbeStatus::Timeout,
            ProbeError::ConnectionFailure { .. } => ProbeStatus::Failure,
            ProbeError::Transport(_) => ProbeStatus::Error,
        }
    }
}

/// What a successful attempt reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeSuccess {
    pub status_code: Option<u16>,
    pub content_length: Option<u64>,
}

/// Outcome of a single attempt, as produced by a probe.
pub type ProbeOutcome = std::result::Result<ProbeSuccess, ProbeError>;

/// The recorded outcome of one network attempt against one target.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbePathResult {
    /// Shared with every other attempt against the same target.
    pub target: Arc<ProbeTarget>,
    pub path_mode: PathMode,
    pub status: ProbeStatus,
    pub latency_ms: f64,
    pub status_code: Option<u16>,
    pub content_length: Option<u64>,
    pub error_text: Option<String>,
}

impl ProbePathResult {
    /// Flatten a probe outcome into a result record.
    pub fn from_outcome(
        target: Arc<ProbeTarget>,
        path_mode: PathMode,
        elapsed: Duration,
        outcome: ProbeOutcome,
    ) -> Self {
        let latency_ms = elapsed.as_secs_f64() * 1000.0;
        match outcome {
            Ok(success) => Self {
                target,
                path_mode,
                status: ProbeStatus::Success,
                latency_ms,
                status_code: success.status_code,
                content_length: success.content_length,
                error_text: None,
            },
            Err(error) => {
                let status_code = match &error {
                    ProbeError::ConnectionFailure { status_code, .. } => *status_code,
                    _ => None,
                };
                Self {
                    target,
                    path_mode,
                    status: error.status(),
                    latency_ms,
                    status_code,
                    content_length: None,
                    error_text: Some(error.to_string()),
                }
            }
        }
    }

    /// Key in the report's raw results: the URL plus a path suffix.
    pub fn key(&self) -> String {
        format!("{}{}", self.target.url, self.path_mode.key_suffix())
    }

    pub fn kind(&self) -> TargetKind {
        self.target.kind
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
