//! Engine configuration.
//!
//! Configuration is read from a TOML file (by default
//! `~/.config/siteforge/config.toml`), with environment variables taking
//! precedence over file values. Every field has a working local default
//! so a missing file is not an error.

use serde::{Deserialize, Serialize};
use siteforge_core::error::{Result, SiteforgeError};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_AI_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_WORKSPACE_BASE_URL: &str = "http://localhost:8787";
const DEFAULT_PROJECT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_SAVE_QUIET_MS: u64 = 1500;

/// Engine configuration: collaborator base URLs and persistence tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the AI generation service.
    pub ai_base_url: String,
    /// Base URL of the Workspace backend.
    pub workspace_base_url: String,
    /// Base URL of the Project backend.
    pub project_base_url: String,
    /// Quiet period the debounced persister waits for, in milliseconds.
    pub save_quiet_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ai_base_url: DEFAULT_AI_BASE_URL.to_string(),
            workspace_base_url: DEFAULT_WORKSPACE_BASE_URL.to_string(),
            project_base_url: DEFAULT_PROJECT_BASE_URL.to_string(),
            save_quiet_ms: DEFAULT_SAVE_QUIET_MS,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from the default location, falling back to
    /// defaults when no file exists, then applies environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SiteforgeError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&text)?;
        Ok(config)
    }

    /// The debounce quiet window as a `Duration`.
    pub fn save_quiet_period(&self) -> Duration {
        Duration::from_millis(self.save_quiet_ms)
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("siteforge").join("config.toml"))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SITEFORGE_AI_URL") {
            self.ai_base_url = url;
        }
        if let Ok(url) = std::env::var("SITEFORGE_WORKSPACE_URL") {
            self.workspace_base_url = url;
        }
        if let Ok(url) = std::env::var("SITEFORGE_PROJECT_URL") {
            self.project_base_url = url;
        }
        if let Ok(ms) = std::env::var("SITEFORGE_SAVE_QUIET_MS") {
            if let Ok(parsed) = ms.parse() {
                self.save_quiet_ms = parsed;
            }
        }
    }
}
