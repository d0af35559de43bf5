//! Catalog construction.
//!
//! Merges default and project entry lists category by category and
//! normalizes the result into an ordered list of targets.

use crate::catalog::normalize::normalize_entry;
use crate::catalog::policy::effective_policy;
use crate::catalog::target::{Category, ProbeTarget};
use crate::config::schema::{NetworkDefaults, ProjectConfig};

/// The outcome of building a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum Catalog {
    /// The network check is turned off in the project config.
    Disabled,
    /// Targets to probe, in category order.
    Targets(Vec<ProbeTarget>),
}

impl Catalog {
    /// Whether the network check is turned off.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Catalog::Disabled)
    }

    /// The targets, empty when disabled.
    pub fn targets(&self) -> &[ProbeTarget] {
        match self {
            Catalog::Disabled => &[],
            Catalog::Targets(targets) => targets,
        }
    }

    /// Consume the catalog, returning its targets.
    pub fn into_targets(self) -> Vec<ProbeTarget> {
        match self {
            Catalog::Disabled => Vec::new(),
            Catalog::Targets(targets) => targets,
        }
    }
}

/// Builds the probe catalog from project config and defaults.
///
/// # Example
///
/// ```
/// use oops::catalog::CatalogBuilder;
/// use oops::config::{NetworkDefaults, ProjectConfig};
///
/// let defaults = NetworkDefaults::builtin();
/// let project: ProjectConfig =
///     serde_yaml::from_str("checks:\n  network:\n    enabled: true\n").unwrap();
///
/// let catalog = CatalogBuilder::new(&defaults).build(&project);
/// assert_eq!(catalog.targets().len(), 3);
/// ```
pub struct CatalogBuilder<'a> {
    defaults: &'a NetworkDefaults,
}

impl<'a> CatalogBuilder<'a> {
    /// Create a builder over the given defaults.
    pub fn new(defaults: &'a NetworkDefaults) -> Self {
        Self { defaults }
    }

    /// Build the catalog for a project.
    ///
    /// Malformed entries are skipped; they never fail the build.
    pub fn build(&self, project: &ProjectConfig) -> Catalog {
        let network = &project.checks.network;
        if !network.enabled {
            tracing::debug!("Network check disabled in project config");
            return Catalog::Disabled;
        }

        let disabled = network.disabled_categories();
        let mut targets = Vec::new();

        for category in Category::ALL {
            let policy = effective_policy(category, &disabled);
            let entries = policy.merge(self.defaults.entries(category), network.entries(category));

            let before = targets.len();
            for entry in entries {
                match normalize_entry(entry, category) {
                    Ok(target) => targets.push(target),
                    Err(e) => tracing::debug!("Skipping entry: {}", e),
                }
            }
            tracing::debug!(
                "{}: {} target(s) ({:?})",
                category,
                targets.len() - before,
                policy
            );
        }

        Catalog::Targets(targets)
    }
}
