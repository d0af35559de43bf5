//! Reporting: verdict, summary text and fix suggestions.
//!
//! - Grouping and the verdict rules in [`aggregate`]
//! - Summary lines in [`summary`]
//! - Fix suggestions in [`suggest`]
//! - The serializable renderer shape in [`output`]

pub mod aggregate;
pub mod output;
pub mod suggest;
pub mod summary;

pub use aggregate::{
    verdict, NetworkCheckReport, OverallStatus, TypeGroup, DISABLED_MESSAGE,
    EMPTY_CATALOG_MESSAGE,
};
pub use output::{DetailOutput, ReportOutput};
pub use suggest::{get_fix_suggestion, synthesize, ERROR_FALLBACK, WARNING_FALLBACK};
pub use summary::{group_line, header, summarize};
