//! Application settings and paths.
//!
//! Settings are optional: a missing file at the default location means
//! built-in defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{RetryPolicy, ScanConfig};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/portscan)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the configuration directory without creating it.
    pub fn new() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "portscan", "portscan")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Persistent scan defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default comma-separated target list.
    pub targets: String,
    /// Default number of workers.
    pub workers: usize,
    /// Default connect timeout in seconds.
    pub timeout_secs: u64,
    /// Default dial attempts per port.
    pub retries: u32,
    /// Default backoff unit in milliseconds.
    pub backoff_ms: u64,
    /// Sort results by target and port.
    pub sort_results: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            targets: "scanme.nmap.org".to_string(),
            workers: ScanConfig::DEFAULT_WORKERS,
            timeout_secs: ScanConfig::DEFAULT_TIMEOUT.as_secs(),
            retries: RetryPolicy::DEFAULT_ATTEMPTS,
            backoff_ms: RetryPolicy::DEFAULT_BACKOFF.as_millis() as u64,
            sort_results: false,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults.
    pub fn load() -> ConfigResult<Self> {
        let file = match Paths::new() {
            Ok(paths) => paths.settings_file(),
            Err(e) => {
                tracing::warn!(error = %e, "using default settings");
                return Ok(Self::default());
            }
        };

        if !file.exists() {
            tracing::debug!(path = %file.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file, which must exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}
