//! User settings for the default port range and command timeouts.
//!
//! Settings are read from `~/.portdestroyer/config.json` when it exists.
//! The file is never written by this crate; a missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::domain::{PortRange, DEFAULT_END_PORT, DEFAULT_START_PORT};
use crate::error::{Error, Result};

/// Settings stored in JSON format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// First port of the default range.
    #[serde(default = "default_start_port")]
    pub start_port: u16,

    /// Last port of the default range.
    #[serde(default = "default_end_port")]
    pub end_port: u16,

    /// Timeout for every system command, in milliseconds.
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,

    /// Poll interval of the watch loop, in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_start_port() -> u16 {
    DEFAULT_START_PORT
}

fn default_end_port() -> u16 {
    DEFAULT_END_PORT
}

fn default_command_timeout_ms() -> u64 {
    5000
}

fn default_poll_interval_ms() -> u64 {
    1500
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_port: default_start_port(),
            end_port: default_end_port(),
            command_timeout_ms: default_command_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Settings {
    /// The configured default range.
    pub fn range(&self) -> Result<PortRange> {
        PortRange::new(self.start_port, self.end_port)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_millis(self.command_timeout_ms.max(1))
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

/// Read-only access to the settings file.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// Create a store with the default path.
    ///
    /// Default path: `~/.portdestroyer/config.json`
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

        Ok(Self {
            path: home.join(".portdestroyer").join("config.json"),
        })
    }

    /// Create a store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings from disk.
    ///
    /// Returns defaults if the file doesn't exist.
    pub async fn load(&self) -> Result<Settings> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            debug!(path = %self.path.display(), "No settings file, using defaults");
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read settings: {}", e)))?;

        let settings: Settings = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))?;

        // Reject a bad range here rather than on first use.
        settings.range()?;
        Ok(settings)
    }
}
