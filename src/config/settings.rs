//! Application settings and paths.
//!
//! Settings are read from an XDG-compliant location when present and are
//! never written by the tool itself.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/tlsping)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Locate the application directories.
    pub fn new() -> ConfigResult<Self> {
        let project =
            ProjectDirs::from("com", "tlsping", "tlsping").ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Number of connections when `--count` is not given.
    pub default_count: usize,
    /// Timeout of each timed connection in milliseconds.
    pub connect_timeout_ms: u64,
    /// Timeout of each reachability probe in milliseconds.
    pub probe_timeout_ms: u64,
    /// Emit JSON by default.
    pub json: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_count: 10,
            connect_timeout_ms: 5000,
            probe_timeout_ms: 3000,
            json: false,
        }
    }
}

impl AppSettings {
    /// Load settings from `path` if given, otherwise from the default
    /// location, falling back to defaults when no file exists there.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = path {
            return Self::load_from(path);
        }

        let file = match Paths::new() {
            Ok(paths) => paths.settings_file(),
            Err(_) => return Ok(Self::default()),
        };

        if !file.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}
