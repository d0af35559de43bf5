//! Git repository probing via `git ls-remote`.

use std::ffi::OsString;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::target::ProbeTarget;
use crate::probe::types::{PathMode, ProbeError, ProbeOutcome, ProbePathResult, ProbeSuccess};

/// Probes a repository by listing its remote refs.
#[derive(Debug, Clone)]
pub struct GitProbe {
    program: OsString,
    timeout: Duration,
}

impl GitProbe {
    /// Probe with a specific git executable.
    pub fn with_program(program: impl Into<OsString>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Run one `ls-remote` attempt against the target.
    pub async fn probe(&self, target: Arc<ProbeTarget>) -> ProbePathResult {
        let start = Instant::now();
        let outcome = match tokio::time::timeout(self.timeout, self.ls_remote(&target.url)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        };
        let elapsed = start.elapsed();

        tracing::debug!(
            "git {} -> {}",
            target.url,
            match &outcome {
                Ok(_) => "ok".to_string(),
                Err(e) => e.to_string(),
            }
        );
        ProbePathResult::from_outcome(target, PathMode::Single, elapsed, outcome)
    }

    async fn ls_remote(&self, url: &str) -> ProbeOutcome {
        let output = tokio::process::Command::new(&self.program)
            .arg("ls-remote")
            .arg(url)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ProbeError::Transport(format!(
                    "Failed to run {}: {}",
                    self.program.to_string_lossy(),
                    e
                ))
            })?;

        if output.status.success() {
            return Ok(ProbeSuccess::default());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            match output.status.code() {
                Some(code) => format!("git ls-remote exited with code {}", code),
                None => "git ls-remote terminated by signal".to_string(),
            }
        } else {
            stderr
        };

        Err(ProbeError::ConnectionFailure {
            status_code: None,
            message: Some(message),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::catalog::target::TargetKind;
    use crate::probe::types::ProbeStatus;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn repo() -> Arc<ProbeTarget> {
        Arc::new(ProbeTarget::new(
            "https://github.com/LmeSzinc/AzurLaneAutoScript",
            "GitHub",
            TargetKind::GitRepo,
        ))
    }

    fn script(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("fake-git");
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn zero_exit_is_success() {
        let probe = GitProbe::with_program("true", Duration::from_secs(5));
        let result = probe.probe(repo()).await;

        assert_eq!(result.status, ProbeStatus::Success);
        assert_eq!(result.path_mode, PathMode::Single);
        assert_eq!(result.key(), "https://github.com/LmeSzinc/AzurLaneAutoScript");
        assert!(result.error_text.is_none());
    }

    #[tokio::test]
    async fn nonzero_exit_is_failure() {
        let probe = GitProbe::with_program("false", Duration::from_secs(5));
        let result = probe.probe(repo()).await;

        assert_eq!(result.status, ProbeStatus::Failure);
        assert_eq!(
            result.error_text.as_deref(),
            Some("git ls-remote exited with code 1")
        );
    }

    #[tokio::test]
    async fn stderr_becomes_error_text() {
        let dir = TempDir::new().unwrap();
        let git = script(&dir, "echo 'fatal: repository not found' >&2\nexit 128");

        let result = GitProbe::with_program(git, Duration::from_secs(5))
            .probe(repo())
            .await;

        assert_eq!(result.status, ProbeStatus::Failure);
        assert_eq!(result.error_text.as_deref(), Some("fatal: repository not found"));
    }

    #[tokio::test]
    async fn slow_remote_times_out() {
        let dir = TempDir::new().unwrap();
        let git = script(&dir, "sleep 5");

        let result = GitProbe::with_program(git, Duration::from_millis(200))
            .probe(repo())
            .await;

        assert_eq!(result.status, ProbeStatus::Timeout);
        assert!(result.latency_ms < 5000.0);
    }

    #[tokio::test]
    async fn missing_program_is_transport_error() {
        let probe = GitProbe::with_program("/nonexistent/git-binary", Duration::from_secs(5));
        let result = probe.probe(repo()).await;

        assert_eq!(result.status, ProbeStatus::Error);
        assert!(result.error_text.unwrap().contains("Failed to run"));
    }
}
