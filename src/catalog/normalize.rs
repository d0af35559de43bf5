//! Entry normalization.
//!
//! Turns heterogeneous YAML entries (bare URLs, records) into typed
//! [`ProbeTarget`]s.

use thiserror::Error;

use crate::catalog::target::{Category, ProbeTarget, TargetKind};
use crate::config::schema::RawEntry;
use crate::resolver::DYNAMIC_PROXY_NAME;

/// Why an entry was left out of the catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The entry is neither a string nor a record.
    #[error("Malformed entry in {category}: {found}")]
    MalformedEntry { category: Category, found: String },

    /// A non-dynamic record without a usable `url`.
    #[error("Entry in {category} has no url")]
    MissingUrl { category: Category },
}

/// Extract the host segment of a URL: scheme stripped, text up to the first `/`.
pub fn extract_host(url: &str) -> &str {
    let rest = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => url,
    };
    rest.split('/').next().unwrap_or(rest)
}

/// Normalize one raw entry from `category` into a target.
pub fn normalize_entry(entry: &RawEntry, category: Category) -> Result<ProbeTarget, CatalogError> {
    match entry {
        RawEntry::Url(url) => {
            let url = url.trim();
            if url.is_empty() {
                return Err(CatalogError::MissingUrl { category });
            }
            Ok(ProbeTarget::new(
                url,
                extract_host(url),
                category.default_kind(),
            ))
        }
        RawEntry::Record(record) => {
            let url = record.url.as_deref().map(str::trim).unwrap_or_default();
            let kind = resolve_kind(record.kind.as_deref(), category);
            let dynamic = record.dynamic && kind == TargetKind::GithubProxy;

            if url.is_empty() && !dynamic {
                return Err(CatalogError::MissingUrl { category });
            }

            let display_name = match &record.name {
                Some(name) => name.clone(),
                None if dynamic && url.is_empty() => DYNAMIC_PROXY_NAME.to_string(),
                None => extract_host(url).to_string(),
            };

            Ok(ProbeTarget {
                url: url.to_string(),
                display_name,
                kind,
                dynamic,
            })
        }
        RawEntry::Malformed(value) => Err(CatalogError::MalformedEntry {
            category,
            found: serde_yaml::to_string(value)
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|_| format!("{:?}", value)),
        }),
    }
}

fn resolve_kind(declared: Option<&str>, category: Category) -> TargetKind {
    match declared {
        None => category.default_kind(),
        Some(name) => name.parse().unwrap_or_else(|_| {
            tracing::debug!(
                "Unknown type '{}' in {}, using {}",
                name,
                category,
                category.default_kind()
            );
            category.default_kind()
        }),
    }
}
