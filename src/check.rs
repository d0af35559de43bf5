//! The network check pipeline.
//!
//! Builds the catalog, resolves dynamic proxies, probes everything and
//! aggregates the outcome. Whatever happens, callers get a well-formed
//! [`NetworkCheckReport`].

use crate::catalog::{Catalog, CatalogBuilder};
use crate::config::{DefaultsLoader, ProjectConfig};
use crate::error::Result;
use crate::probe::{ProbeEngine, ProbeSettings};
use crate::report::{NetworkCheckReport, DISABLED_MESSAGE, EMPTY_CATALOG_MESSAGE};
use crate::resolver::{substitute, DynamicResolver, DYNAMIC_FETCH_TIMEOUT, DYNAMIC_PROXY_SOURCE};

/// Runs network checks for project configurations.
///
/// # Example
///
/// ```
/// use oops::check::NetworkCheck;
/// use oops::config::{DefaultsLoader, ProjectConfig};
/// use oops::report::OverallStatus;
///
/// let check = NetworkCheck::new(DefaultsLoader::builtin());
/// let report = check.run_blocking(&ProjectConfig::default());
/// assert_eq!(report.overall_status, OverallStatus::Skipped);
/// ```
pub struct NetworkCheck {
    defaults: DefaultsLoader,
    settings: ProbeSettings,
    dynamic_source: Option<String>,
}

impl NetworkCheck {
    /// Create a check with default probe settings and dynamic discovery on.
    pub fn new(defaults: DefaultsLoader) -> Self {
        Self {
            defaults,
            settings: ProbeSettings::default(),
            dynamic_source: Some(DYNAMIC_PROXY_SOURCE.to_string()),
        }
    }

    pub fn with_settings(mut self, settings: ProbeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Discover dynamic proxies from a different source.
    pub fn with_dynamic_source(mut self, url: impl Into<String>) -> Self {
        self.dynamic_source = Some(url.into());
        self
    }

    /// Skip discovery; dynamic placeholders are dropped.
    pub fn without_dynamic(mut self) -> Self {
        self.dynamic_source = None;
        self
    }

    pub fn settings(&self) -> &ProbeSettings {
        &self.settings
    }

    /// The merged catalog for a project, before dynamic resolution.
    pub fn catalog(&self, project: &ProjectConfig) -> Catalog {
        CatalogBuilder::new(self.defaults.get()).build(project)
    }

    /// Run the full pipeline.
    pub async fn run(&self, project: &ProjectConfig) -> NetworkCheckReport {
        match self.try_run(project).await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Network check failed: {}", e);
                NetworkCheckReport::failed(e)
            }
        }
    }

    /// Run the full pipeline on a fresh runtime.
    pub fn run_blocking(&self, project: &ProjectConfig) -> NetworkCheckReport {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!("Failed to start async runtime: {}", e);
                return NetworkCheckReport::failed(e);
            }
        };
        runtime.block_on(self.run(project))
    }

    async fn try_run(&self, project: &ProjectConfig) -> Result<NetworkCheckReport> {
        let targets = match self.catalog(project) {
            Catalog::Disabled => return Ok(NetworkCheckReport::skipped(DISABLED_MESSAGE)),
            Catalog::Targets(targets) => targets,
        };
        if targets.is_empty() {
            return Ok(NetworkCheckReport::skipped(EMPTY_CATALOG_MESSAGE));
        }

        let targets = match &self.dynamic_source {
            Some(source) => {
                DynamicResolver::with_source(source.as_str(), DYNAMIC_FETCH_TIMEOUT)?
                    .resolve(targets)
                    .await
            }
            None => substitute(targets, None),
        };
        if targets.is_empty() {
            return Ok(NetworkCheckReport::skipped(EMPTY_CATALOG_MESSAGE));
        }

        let engine = ProbeEngine::new(&self.settings)?;
        let results = engine.run(&targets).await;
        Ok(NetworkCheckReport::from_results(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TargetKind;
    use crate::config::NetworkDefaults;
    use crate::report::OverallStatus;
    use httpmock::prelude::*;
    use std::ffi::OsString;
    use std::time::Duration;

    fn project(yaml: &str) -> ProjectConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn empty_defaults() -> DefaultsLoader {
        DefaultsLoader::with_defaults(NetworkDefaults::default())
    }

    fn settings(git_program: &str) -> ProbeSettings {
        ProbeSettings {
            timeout: Duration::from_secs(5),
            git_program: OsString::from(git_program),
        }
    }

    #[tokio::test]
    async fn disabled_feature_is_skipped() {
        let check = NetworkCheck::new(empty_defaults());
        let report = check.run(&project("checks:\n  network:\n    enabled: false\n")).await;
        assert_eq!(report.overall_status, OverallStatus::Skipped);
        assert_eq!(report.message, DISABLED_MESSAGE);
        assert!(report.raw_results.is_empty());
    }

    #[tokio::test]
    async fn enabled_without_targets_is_skipped() {
        let check = NetworkCheck::new(empty_defaults());
        let report = check.run(&project("checks:\n  network:\n    enabled: true\n")).await;
        assert_eq!(report.overall_status, OverallStatus::Skipped);
        assert_eq!(report.message, EMPTY_CATALOG_MESSAGE);
    }

    #[tokio::test]
    async fn only_unresolvable_placeholder_is_skipped() {
        let check = NetworkCheck::new(empty_defaults()).without_dynamic();
        let report = check
            .run(&project(
                "checks:\n  network:\n    enabled: true\n    github_proxies: [{url: '', dynamic: true}]\n",
            ))
            .await;
        assert_eq!(report.overall_status, OverallStatus::Skipped);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn healthy_network_is_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200);
            })
            .await;

        let yaml = format!(
            "checks:\n  network:\n    enabled: true\n    git_repos: ['https://github.com/a/b']\n    pypi_sources: ['{}']\n",
            server.url("/simple/")
        );
        let check = NetworkCheck::new(empty_defaults())
            .with_settings(settings("true"))
            .without_dynamic();
        let report = check.run(&project(&yaml)).await;

        assert_eq!(report.raw_results.len(), 3);
        assert_eq!(report.target_count, 2);
        let git = report.group(TargetKind::GitRepo).unwrap();
        assert_eq!(git.success_count(), 1);
        // The proxied path depends on the environment; the direct one does not.
        let direct = &report.raw_results[&format!("{}_(direct)", server.url("/simple/"))];
        assert!(direct.is_success());
        assert_eq!(report.overall_status, OverallStatus::Success);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn unreachable_git_repo_is_error() {
        let check = NetworkCheck::new(empty_defaults())
            .with_settings(settings("false"))
            .without_dynamic();
        let report = check
            .run(&project(
                "checks:\n  network:\n    enabled: true\n    git_repos: ['https://github.com/a/b']\n",
            ))
            .await;

        assert_eq!(report.overall_status, OverallStatus::Error);
        assert_eq!(report.summary_text[1], "Git仓库: ❌ 全部失败 (1个)");
    }

    #[tokio::test]
    async fn discovered_proxy_is_probed() {
        let server = MockServer::start_async().await;
        let source = server
            .mock_async(|when, then| {
                when.method(GET).path("/home.js");
                then.status(200)
                    .body(r#"x="<a href=\"https://ghfast.top\" target=\"_blank\">""#);
            })
            .await;

        let check = NetworkCheck::new(empty_defaults())
            .with_settings(ProbeSettings {
                timeout: Duration::from_millis(300),
                ..Default::default()
            })
            .with_dynamic_source(server.url("/home.js"));
        let report = check
            .run(&project(
                "checks:\n  network:\n    enabled: true\n    github_proxies: [{url: '', dynamic: true}]\n",
            ))
            .await;

        source.assert_async().await;
        assert!(report.raw_results.contains_key("https://ghfast.top_(direct)"));
        assert!(report.raw_results.contains_key("https://ghfast.top_(proxy)"));
        let proxies = report.group(TargetKind::GithubProxy).unwrap();
        assert_eq!(proxies.results[0].target.display_name, "动态代理");
    }

    #[test]
    fn blocking_run_matches_async_run() {
        let check = NetworkCheck::new(empty_defaults());
        let report = check.run_blocking(&ProjectConfig::default());
        assert_eq!(report.overall_status, OverallStatus::Skipped);
    }
}
