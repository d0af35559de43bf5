//! Probe engine: one attempt per target path, all in flight at once.
//!
//! - Result types in [`types`]
//! - `git ls-remote` probing in [`git`]
//! - Direct and proxied HTTP probing in [`http`]
//! - The fan-out in [`engine`]

pub mod engine;
pub mod git;
pub mod http;
pub mod types;

pub use engine::{paths_for, ProbeEngine, ProbeSettings, DEFAULT_PROBE_TIMEOUT};
pub use git::GitProbe;
pub use http::{request_url, HttpProbe};
pub use types::{PathMode, ProbeError, ProbeOutcome, ProbePathResult, ProbeStatus, ProbeSuccess};
