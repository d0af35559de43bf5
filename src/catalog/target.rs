//! Probe target types.
//!
//! A [`ProbeTarget`] is one endpoint to test. Its [`TargetKind`] decides how
//! it is probed and whether total failure blocks the project.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of network resource a target represents.
///
/// Declaration order is the catalog's category order and the order in
/// which groups are reported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    GitRepo,
    PypiSource,
    MirrorSite,
    GithubProxy,
    ProjectWebsite,
    MihoyoApi,
}

impl TargetKind {
    /// All kinds in report order.
    pub const ALL: [TargetKind; 6] = [
        TargetKind::GitRepo,
        TargetKind::PypiSource,
        TargetKind::MirrorSite,
        TargetKind::GithubProxy,
        TargetKind::ProjectWebsite,
        TargetKind::MihoyoApi,
    ];

    /// The config/wire name (`git_repo`, `pypi_source`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetKind::GitRepo => "git_repo",
            TargetKind::PypiSource => "pypi_source",
            TargetKind::MirrorSite => "mirror_site",
            TargetKind::GithubProxy => "github_proxy",
            TargetKind::ProjectWebsite => "project_website",
            TargetKind::MihoyoApi => "mihoyo_api",
        }
    }

    /// Human-readable group name used in summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetKind::GitRepo => "Git仓库",
            TargetKind::PypiSource => "PyPI源",
            TargetKind::MirrorSite => "镜像站点",
            TargetKind::GithubProxy => "GitHub代理",
            TargetKind::ProjectWebsite => "项目官网",
            TargetKind::MihoyoApi => "米哈游API",
        }
    }

    /// Whether total unavailability of this kind blocks the project.
    pub fn criticality(&self) -> Criticality {
        match self {
            TargetKind::GitRepo | TargetKind::PypiSource => Criticality::Critical,
            _ => Criticality::Optional,
        }
    }

    /// How targets of this kind are probed.
    pub fn probe_style(&self) -> ProbeStyle {
        match self {
            TargetKind::GitRepo => ProbeStyle::Git,
            _ => ProbeStyle::Http,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown target type: {}", s))
    }
}

/// Whether a kind's total failure is an error or only a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    Critical,
    Optional,
}

/// The probing mechanism for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeStyle {
    /// `git ls-remote` against the URL.
    Git,
    /// GET requests, once direct and once through the ambient proxy.
    Http,
}

/// A configuration category (a list key under `checks.network`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    GitRepos,
    PypiSources,
    MirrorSites,
    GithubProxies,
    ProjectWebsites,
    MihoyoApi,
}

impl Category {
    /// All categories in catalog order.
    pub const ALL: [Category; 6] = [
        Category::GitRepos,
        Category::PypiSources,
        Category::MirrorSites,
        Category::GithubProxies,
        Category::ProjectWebsites,
        Category::MihoyoApi,
    ];

    /// The YAML key for this category.
    pub fn key(&self) -> &'static str {
        match self {
            Category::GitRepos => "git_repos",
            Category::PypiSources => "pypi_sources",
            Category::MirrorSites => "mirror_sites",
            Category::GithubProxies => "github_proxies",
            Category::ProjectWebsites => "project_websites",
            Category::MihoyoApi => "mihoyo_api",
        }
    }

    /// Parse a YAML key. `mihoyo_apis` is accepted as an alias.
    pub fn from_key(key: &str) -> Option<Self> {
        if key == "mihoyo_apis" {
            return Some(Category::MihoyoApi);
        }
        Category::ALL.into_iter().find(|c| c.key() == key)
    }

    /// The kind assigned to entries that don't declare a `type`.
    pub fn default_kind(&self) -> TargetKind {
        match self {
            Category::GitRepos => TargetKind::GitRepo,
            Category::PypiSources => TargetKind::PypiSource,
            Category::MirrorSites => TargetKind::MirrorSite,
            Category::GithubProxies => TargetKind::GithubProxy,
            Category::ProjectWebsites => TargetKind::ProjectWebsite,
            Category::MihoyoApi => TargetKind::MihoyoApi,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One network endpoint to test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeTarget {
    /// Canonical address. Empty only for unresolved dynamic placeholders.
    pub url: String,
    /// Label shown to users; defaults to the URL's host.
    pub display_name: String,
    pub kind: TargetKind,
    /// Placeholder awaiting live proxy discovery.
    pub dynamic: bool,
}

impl ProbeTarget {
    /// Create a static target.
    pub fn new(url: impl Into<String>, display_name: impl Into<String>, kind: TargetKind) -> Self {
        Self {
            url: url.into(),
            display_name: display_name.into(),
            kind,
            dynamic: false,
        }
    }

    /// Host segment of the URL.
    pub fn host(&self) -> &str {
        crate::catalog::normalize::extract_host(&self.url)
    }
}
