//! Concurrent fan-out over the catalog.

use futures::future::{join_all, BoxFuture, FutureExt};
use std::ffi::OsString;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::target::{ProbeStyle, ProbeTarget};
use crate::error::Result;
use crate::probe::git::GitProbe;
use crate::probe::http::HttpProbe;
use crate::probe::types::{PathMode, ProbePathResult};

/// Per-operation budget for every probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Paths attempted for each probe style.
const PATH_TABLE: [(ProbeStyle, &[PathMode]); 2] = [
    (ProbeStyle::Git, &[PathMode::Single]),
    (ProbeStyle::Http, &[PathMode::Direct, PathMode::Proxied]),
];

/// The path modes attempted for a probe style.
pub fn paths_for(style: ProbeStyle) -> &'static [PathMode] {
    PATH_TABLE
        .iter()
        .find(|(s, _)| *s == style)
        .map(|(_, paths)| *paths)
        .unwrap_or(&[])
}

/// Tunables for a probe run.
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Budget for each individual attempt.
    pub timeout: Duration,
    /// Executable used for `ls-remote`.
    pub git_program: OsString,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            git_program: OsString::from("git"),
        }
    }
}

/// Runs every probe for a catalog concurrently.
///
/// Failures never escape: each attempt yields exactly one
/// [`ProbePathResult`], whatever happened on the wire.
pub struct ProbeEngine {
    git: GitProbe,
    http: HttpProbe,
}

impl ProbeEngine {
    /// Create an engine, building the HTTP clients up front.
    pub fn new(settings: &ProbeSettings) -> Result<Self> {
        Ok(Self {
            git: GitProbe::with_program(settings.git_program.clone(), settings.timeout),
            http: HttpProbe::new(settings.timeout)?,
        })
    }

    /// Probe all targets and wait for every attempt to settle.
    ///
    /// Results come back in issuance order: target order, then path order.
    pub async fn run(&self, targets: &[ProbeTarget]) -> Vec<ProbePathResult> {
        let mut operations: Vec<BoxFuture<'_, ProbePathResult>> = Vec::new();

        for target in targets {
            if target.url.is_empty() {
                tracing::warn!("Skipping target without url: {}", target.display_name);
                continue;
            }

            let target = Arc::new(target.clone());
            for &mode in paths_for(target.kind.probe_style()) {
                operations.push(self.operation(Arc::clone(&target), mode));
            }
        }

        tracing::info!(
            "Probing {} target(s) with {} operation(s)",
            targets.len(),
            operations.len()
        );
        let start = Instant::now();
        let results = join_all(operations).await;
        tracing::debug!("Probe batch settled in {:?}", start.elapsed());

        results
    }

    fn operation(&self, target: Arc<ProbeTarget>, mode: PathMode) -> BoxFuture<'_, ProbePathResult> {
        match mode {
            PathMode::Single => self.git.probe(target).boxed(),
            PathMode::Direct | PathMode::Proxied => self.http.probe(target, mode).boxed(),
        }
    }
}
