//! HTTP reachability probing.
//!
//! Every HTTP-style target is requested twice: once through a client that
//! honors the ambient proxy environment and once through a client that
//! bypasses it with connection reuse disabled.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::target::{ProbeTarget, TargetKind};
use crate::error::{OopsError, Result};
use crate::probe::types::{PathMode, ProbeError, ProbeOutcome, ProbePathResult, ProbeSuccess};

/// Probes HTTP endpoints over the direct and proxied paths.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    proxied: reqwest::Client,
    direct: reqwest::Client,
    timeout: Duration,
}

impl HttpProbe {
    /// Build both clients with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let proxied = Self::builder(timeout).build().map_err(client_error)?;
        let direct = Self::builder(timeout)
            .no_proxy()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(client_error)?;

        Ok(Self {
            proxied,
            direct,
            timeout,
        })
    }

    fn builder(timeout: Duration) -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .user_agent(concat!("oops/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
    }

    /// Run one attempt over the given path.
    pub async fn probe(&self, target: Arc<ProbeTarget>, mode: PathMode) -> ProbePathResult {
        let client = match mode {
            PathMode::Proxied => &self.proxied,
            _ => &self.direct,
        };
        let url = request_url(&target);

        let start = Instant::now();
        let outcome = match tokio::time::timeout(self.timeout, self.get(client, &url)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        };
        let elapsed = start.elapsed();

        match &outcome {
            Ok(success) => tracing::debug!("GET {} [{:?}] -> {:?}", url, mode, success.status_code),
            Err(e) => tracing::debug!("GET {} [{:?}] failed: {}", url, mode, e),
        }
        ProbePathResult::from_outcome(target, mode, elapsed, outcome)
    }

    async fn get(&self, client: &reqwest::Client, url: &str) -> ProbeOutcome {
        let response = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout(self.timeout)
            } else {
                ProbeError::Transport(error_text(&e))
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(ProbeSuccess {
                status_code: Some(status.as_u16()),
                content_length: response.content_length(),
            })
        } else {
            Err(ProbeError::ConnectionFailure {
                status_code: Some(status.as_u16()),
                message: None,
            })
        }
    }
}

/// The URL actually requested for a target.
///
/// Package indexes are checked at the page of a known package (`<source>/pip/`).
pub fn request_url(target: &ProbeTarget) -> String {
    match target.kind {
        TargetKind::PypiSource => {
            let base = target.url.trim_end_matches('/');
            format!("{}/pip/", base)
        }
        _ => target.url.clone(),
    }
}

fn client_error(e: reqwest::Error) -> OopsError {
    OopsError::HttpClient {
        message: e.to_string(),
    }
}

// reqwest's top-level message is generic; the cause chain carries the detail.
fn error_text(e: &reqwest::Error) -> String {
    let mut text = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::types::ProbeStatus;
    use httpmock::prelude::*;

    fn target(url: String, kind: TargetKind) -> Arc<ProbeTarget> {
        Arc::new(ProbeTarget::new(url, "mock", kind))
    }

    #[test]
    fn pypi_sources_probe_the_pip_page() {
        let with_slash = ProbeTarget::new("https://pypi.org/simple/", "PyPI", TargetKind::PypiSource);
        let without = ProbeTarget::new("https://pypi.org/simple", "PyPI", TargetKind::PypiSource);
        assert_eq!(request_url(&with_slash), "https://pypi.org/simple/pip/");
        assert_eq!(request_url(&without), "https://pypi.org/simple/pip/");
    }

    #[test]
    fn other_kinds_probe_the_url_itself() {
        let site = ProbeTarget::new("https://mirrors.ustc.edu.cn", "USTC", TargetKind::MirrorSite);
        assert_eq!(request_url(&site), "https://mirrors.ustc.edu.cn");
    }

    #[tokio::test]
    async fn ok_response_is_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).body("hello");
            })
            .await;

        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        let result = probe
            .probe(target(server.url("/"), TargetKind::MirrorSite), PathMode::Direct)
            .await;

        assert_eq!(result.status, ProbeStatus::Success);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.content_length, Some(5));
        assert!(result.key().ends_with("_(direct)"));
    }

    #[tokio::test]
    async fn pypi_probe_hits_pip_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/simple/pip/");
                then.status(200);
            })
            .await;

        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        let result = probe
            .probe(target(server.url("/simple"), TargetKind::PypiSource), PathMode::Direct)
            .await;

        assert!(result.is_success());
        assert_eq!(result.key(), format!("{}_(direct)", server.url("/simple")));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn error_status_is_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(404);
            })
            .await;

        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        let result = probe
            .probe(target(server.url("/"), TargetKind::ProjectWebsite), PathMode::Direct)
            .await;

        assert_eq!(result.status, ProbeStatus::Failure);
        assert_eq!(result.status_code, Some(404));
        assert_eq!(result.error_text.as_deref(), Some("HTTP 404"));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/");
                then.status(200).delay(Duration::from_secs(3));
            })
            .await;

        let probe = HttpProbe::new(Duration::from_millis(200)).unwrap();
        let result = probe
            .probe(target(server.url("/"), TargetKind::GithubProxy), PathMode::Direct)
            .await;

        assert_eq!(result.status, ProbeStatus::Timeout);
        assert!(result.error_text.unwrap().contains("检测超时"));
    }

    #[tokio::test]
    async fn refused_connection_is_transport_error() {
        // Port 1 is reserved and nothing listens on it.
        let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
        let result = probe
            .probe(
                target("http://127.0.0.1:1/".to_string(), TargetKind::MihoyoApi),
                PathMode::Direct,
            )
            .await;

        assert_eq!(result.status, ProbeStatus::Error);
        assert!(result.error_text.is_some());
    }
}
