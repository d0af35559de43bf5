//! Target catalog: what to probe.
//!
//! - Target and kind types in [`target`]
//! - The per-category merge policy table in [`policy`]
//! - Entry normalization in [`normalize`]
//! - The builder that ties them together in [`builder`]

pub mod builder;
pub mod normalize;
pub mod policy;
pub mod target;

pub use builder::{Catalog, CatalogBuilder};
pub use normalize::{extract_host, normalize_entry, CatalogError};
pub use policy::{base_policy, effective_policy, MergePolicy};
pub use target::{Category, Criticality, ProbeStyle, ProbeTarget, TargetKind};
