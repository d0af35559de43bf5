//! Dynamic GitHub proxy discovery.
//!
//! Some proxy front-ends rotate their domain. A `github_proxies` entry marked
//! `dynamic: true` is a placeholder: before probing, a known script resource
//! is fetched and the current proxy address is extracted from it.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;
use thiserror::Error;

use crate::catalog::target::{ProbeTarget, TargetKind};
use crate::error::{OopsError, Result};

/// Script that embeds the currently live proxy address.
pub const DYNAMIC_PROXY_SOURCE: &str = "https://ghproxy.link/js/src_views_home_HomeView_vue.js";

/// Timeout for fetching [`DYNAMIC_PROXY_SOURCE`].
pub const DYNAMIC_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Display name given to a discovered proxy.
pub const DYNAMIC_PROXY_NAME: &str = "动态代理";

// The anchor is embedded in a JS string literal, so its quotes arrive escaped
// (`href=\"...\"`, sometimes doubly).
static ANCHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+href=\\+"(https://[^"\\]+)\\+".*?target="#)
        .expect("anchor pattern is valid")
});

static PROXY_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("proxy URL pattern is valid")
});

/// Why no proxy could be discovered.
#[derive(Debug, Error, PartialEq)]
pub enum ResolveError {
    /// Transport failure or timeout.
    #[error("Failed to fetch proxy source: {0}")]
    Fetch(String),

    /// Non-2xx response.
    #[error("Proxy source returned HTTP {0}")]
    Status(u16),

    /// No anchor in the fetched text.
    #[error("No proxy address found in source")]
    NoMatch,

    /// A candidate was found but isn't a bare `https://host.tld` URL.
    #[error("Rejected proxy candidate: {0}")]
    Rejected(String),
}

/// Whether `candidate` is `https://` followed by a bare host with a TLD-like suffix.
pub fn is_valid_proxy_url(candidate: &str) -> bool {
    PROXY_URL_REGEX.is_match(candidate)
}

/// Extract and validate the proxy address from fetched script text.
pub fn extract_proxy_url(text: &str) -> std::result::Result<String, ResolveError> {
    let candidate = ANCHOR_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(ResolveError::NoMatch)?;

    if is_valid_proxy_url(candidate) {
        Ok(candidate.to_string())
    } else {
        Err(ResolveError::Rejected(candidate.to_string()))
    }
}

/// Replace dynamic placeholders with the discovered proxy.
///
/// The first placeholder becomes a concrete `github_proxy` target; any
/// further placeholders are dropped. With no discovery, every placeholder
/// is dropped. Static targets are untouched.
pub fn substitute(targets: Vec<ProbeTarget>, discovered: Option<&str>) -> Vec<ProbeTarget> {
    let mut replacement =
        discovered.map(|url| ProbeTarget::new(url, DYNAMIC_PROXY_NAME, TargetKind::GithubProxy));

    targets
        .into_iter()
        .filter_map(|target| {
            if is_placeholder(&target) {
                replacement.take()
            } else {
                Some(target)
            }
        })
        .collect()
}

fn is_placeholder(target: &ProbeTarget) -> bool {
    target.dynamic && target.kind == TargetKind::GithubProxy
}

/// Fetches the proxy source and substitutes dynamic placeholders.
///
/// # Example
///
/// ```no_run
/// use oops::resolver::DynamicResolver;
///
/// # async fn run() -> oops::Result<()> {
/// let resolver = DynamicResolver::new()?;
/// match resolver.discover().await {
///     Ok(url) => println!("live proxy: {}", url),
///     Err(e) => println!("no proxy: {}", e),
/// }
/// # Ok(())
/// # }
/// ```
pub struct DynamicResolver {
    client: reqwest::Client,
    source_url: String,
}

impl DynamicResolver {
    /// Create a resolver for [`DYNAMIC_PROXY_SOURCE`].
    pub fn new() -> Result<Self> {
        Self::with_source(DYNAMIC_PROXY_SOURCE, DYNAMIC_FETCH_TIMEOUT)
    }

    /// Create a resolver for a custom source URL.
    pub fn with_source(source_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("oops/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| OopsError::HttpClient {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            source_url: source_url.into(),
        })
    }

    /// Fetch the source once and extract the live proxy address.
    pub async fn discover(&self) -> std::result::Result<String, ResolveError> {
        let response = self
            .client
            .get(&self.source_url)
            .send()
            .await
            .map_err(|e| ResolveError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ResolveError::Fetch(e.to_string()))?;

        extract_proxy_url(&text)
    }

    /// Substitute dynamic placeholders in `targets`.
    ///
    /// The source is only fetched when at least one placeholder exists.
    /// Discovery failures are logged and degrade to the static list.
    pub async fn resolve(&self, targets: Vec<ProbeTarget>) -> Vec<ProbeTarget> {
        if !targets.iter().any(is_placeholder) {
            return targets;
        }

        let discovered = match self.discover().await {
            Ok(url) => {
                tracing::info!("Discovered dynamic GitHub proxy: {}", url);
                Some(url)
            }
            Err(e) => {
                tracing::warn!("Dynamic proxy discovery failed: {}", e);
                None
            }
        };

        substitute(targets, discovered.as_deref())
    }
}
