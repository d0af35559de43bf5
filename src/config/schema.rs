//! Configuration schema definitions for oops.
//!
//! This module contains the struct definitions that map to the project
//! configuration file (`checks.network`) and the defaults file
//! (`network_defaults`).

use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// Root of a project configuration file.
///
/// Only the `checks.network` section is interpreted here; other check
/// sections are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Per-check configuration
    pub checks: ChecksConfig,
}

/// The `checks:` section of a project configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Network reachability check
    pub network: NetworkSection,
}

/// The `checks.network:` section of a project configuration.
///
/// Each category list is optional: `None` means "not specified, use the
/// defaults", while `Some(vec![])` is an explicit empty list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSection {
    /// Whether the network check runs at all
    pub enabled: bool,

    /// Category names whose built-in defaults are excluded
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub disable_defaults: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_repos: Option<Vec<RawEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pypi_sources: Option<Vec<RawEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_sites: Option<Vec<RawEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_proxies: Option<Vec<RawEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_websites: Option<Vec<RawEntry>>,

    #[serde(alias = "mihoyo_apis", skip_serializing_if = "Option::is_none")]
    pub mihoyo_api: Option<Vec<RawEntry>>,
}

impl NetworkSection {
    /// The project's entries for a category, if the category was specified.
    pub fn entries(&self, category: Category) -> Option<&[RawEntry]> {
        let list = match category {
            Category::GitRepos => &self.git_repos,
            Category::PypiSources => &self.pypi_sources,
            Category::MirrorSites => &self.mirror_sites,
            Category::GithubProxies => &self.github_proxies,
            Category::ProjectWebsites => &self.project_websites,
            Category::MihoyoApi => &self.mihoyo_api,
        };
        list.as_deref()
    }

    /// Categories listed under `disable_defaults`.
    ///
    /// Unknown names are logged and ignored.
    pub fn disabled_categories(&self) -> Vec<Category> {
        self.disable_defaults
            .iter()
            .filter_map(|name| {
                let category = Category::from_key(name);
                if category.is_none() {
                    tracing::warn!("Ignoring unknown category in disable_defaults: {}", name);
                }
                category
            })
            .collect()
    }
}

/// Root of a defaults file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsFile {
    /// Baseline endpoint lists
    pub network_defaults: NetworkDefaults,
}

/// Baseline endpoint lists shared by every project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkDefaults {
    pub git_repos: Vec<RawEntry>,
    pub pypi_sources: Vec<RawEntry>,
    pub mirror_sites: Vec<RawEntry>,
    pub github_proxies: Vec<RawEntry>,
    pub project_websites: Vec<RawEntry>,
    #[serde(alias = "mihoyo_apis")]
    pub mihoyo_api: Vec<RawEntry>,
}

impl NetworkDefaults {
    /// The default entries for a category.
    pub fn entries(&self, category: Category) -> &[RawEntry] {
        match category {
            Category::GitRepos => &self.git_repos,
            Category::PypiSources => &self.pypi_sources,
            Category::MirrorSites => &self.mirror_sites,
            Category::GithubProxies => &self.github_proxies,
            Category::ProjectWebsites => &self.project_websites,
            Category::MihoyoApi => &self.mihoyo_api,
        }
    }

    /// Defaults compiled into the binary, used when no defaults file exists.
    pub fn builtin() -> Self {
        Self {
            git_repos: vec![RawEntry::record("https://github.com", "GitHub", "git_repo")],
            pypi_sources: vec![
                RawEntry::record("https://pypi.org/simple/", "PyPI官方", "pypi_source"),
                RawEntry::record(
                    "https://pypi.tuna.tsinghua.edu.cn/simple/",
                    "清华镜像",
                    "pypi_source",
                ),
            ],
            ..Default::default()
        }
    }
}

/// One entry of a category list, as written in YAML.
///
/// Entries are either a bare URL string or a record. Anything else is kept
/// as `Malformed` so a single bad entry never fails the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "serde_yaml::Value")]
pub enum RawEntry {
    /// `- https://example.com`
    Url(String),
    /// `- {url: ..., name: ..., type: ...}`
    Record(EntryRecord),
    /// Sequences, numbers, booleans, nulls, and mappings that are not records.
    Malformed(serde_yaml::Value),
}

impl From<serde_yaml::Value> for RawEntry {
    fn from(value: serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::String(url) => RawEntry::Url(url),
            serde_yaml::Value::Mapping(_) => match serde_yaml::from_value(value.clone()) {
                Ok(record) => RawEntry::Record(record),
                Err(_) => RawEntry::Malformed(value),
            },
            other => RawEntry::Malformed(other),
        }
    }
}

impl RawEntry {
    /// Build a fully specified record entry.
    pub fn record(url: &str, name: &str, kind: &str) -> Self {
        RawEntry::Record(EntryRecord {
            url: Some(url.to_string()),
            name: Some(name.to_string()),
            kind: Some(kind.to_string()),
            dynamic: false,
        })
    }
}

/// The record form of a category entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Target kind override (`git_repo`, `pypi_source`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Placeholder to be replaced by a proxy discovered at run time
    #[serde(skip_serializing_if = "is_false")]
    pub dynamic: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}
