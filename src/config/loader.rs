//! Configuration file discovery and loading.
//!
//! Project configuration is loaded once per run. The defaults file is read
//! lazily on first use and memoized by the [`DefaultsLoader`] that owns it.

use crate::config::schema::{DefaultsFile, NetworkDefaults, ProjectConfig};
use crate::error::{OopsError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Default project config file name, relative to the working directory.
pub const PROJECT_CONFIG_FILE: &str = "oops.yaml";

/// Default location of the defaults file, relative to the working directory.
pub const DEFAULTS_CONFIG_FILE: &str = "configs/defaults.yaml";

/// Locate the project config: an explicit override, or `oops.yaml` under `root`.
pub fn project_config_path(root: &Path, config_override: Option<&Path>) -> PathBuf {
    match config_override {
        Some(path) => path.to_path_buf(),
        None => root.join(PROJECT_CONFIG_FILE),
    }
}

/// Load and parse a project config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    let content = read_config(path)?;
    parse_project_config(&content, path)
}

/// Parse YAML content into a [`ProjectConfig`].
///
/// An empty document yields the default (disabled) configuration.
pub fn parse_project_config(content: &str, source_path: &Path) -> Result<ProjectConfig> {
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| OopsError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and parse a defaults file.
pub fn load_defaults_file(path: &Path) -> Result<NetworkDefaults> {
    let content = read_config(path)?;
    if content.trim().is_empty() {
        return Ok(NetworkDefaults::default());
    }

    let file: DefaultsFile =
        serde_yaml::from_str(&content).map_err(|e| OopsError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    Ok(file.network_defaults)
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            OopsError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            OopsError::Io(e)
        }
    })
}

/// Lazily loads and memoizes the baseline endpoint lists.
///
/// The file is read at most once per loader. A missing or unreadable file
/// falls back to [`NetworkDefaults::builtin`].
///
/// # Example
///
/// ```
/// use oops::config::{DefaultsLoader, NetworkDefaults};
///
/// let loader = DefaultsLoader::with_defaults(NetworkDefaults::default());
/// assert!(loader.get().git_repos.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct DefaultsLoader {
    path: Option<PathBuf>,
    defaults: OnceLock<NetworkDefaults>,
}

impl DefaultsLoader {
    /// Create a loader that reads `path` on first use.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            defaults: OnceLock::new(),
        }
    }

    /// Create a loader that only ever yields the built-in defaults.
    pub fn builtin() -> Self {
        Self::with_defaults(NetworkDefaults::builtin())
    }

    /// Create a loader pre-populated with the given defaults.
    pub fn with_defaults(defaults: NetworkDefaults) -> Self {
        Self {
            path: None,
            defaults: OnceLock::from(defaults),
        }
    }

    /// The path this loader reads from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the defaults, loading them on first call.
    pub fn get(&self) -> &NetworkDefaults {
        self.defaults.get_or_init(|| self.load())
    }

    fn load(&self) -> NetworkDefaults {
        let Some(path) = &self.path else {
            return NetworkDefaults::builtin();
        };

        match load_defaults_file(path) {
            Ok(defaults) => {
                tracing::info!("Loaded network defaults from {}", path.display());
                defaults
            }
            Err(OopsError::ConfigNotFound { .. }) => {
                tracing::info!(
                    "No defaults file at {}, using built-in defaults",
                    path.display()
                );
                NetworkDefaults::builtin()
            }
            Err(e) => {
                tracing::warn!("Failed to load defaults ({}), using built-in defaults", e);
                NetworkDefaults::builtin()
            }
        }
    }
}
