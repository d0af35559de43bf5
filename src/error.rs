//! Error types for oops operations.
//!
//! This module defines [`OopsError`], the error type for failures that abort
//! a diagnostic run, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Unreachable endpoints are data, not errors: probe outcomes are recorded
//!   as [`ProbeStatus`](crate::probe::ProbeStatus) values
//! - Use `OopsError` for configuration and setup failures
//! - Use `anyhow::Error` (via `OopsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for oops operations.
#[derive(Debug, Error)]
pub enum OopsError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {message}")]
    HttpClient { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for oops operations.
pub type Result<T> = std::result::Result<T, OopsError>;
