//! Portal configuration: one TOML file with a section per search component.
//!
//! ```toml
//! [aggregator]
//! provider_timeout_ms = 5000
//!
//! [providers]
//! enabled = ["official", "social", "reference"]
//! simulated_latency_ms = [50, 300]
//!
//! [live_api]
//! engine_id = "0123456789abcdef"
//! ```
//!
//! Live-API credentials can also come from `CIVIC_SEARCH_API_KEY` and
//! `CIVIC_SEARCH_ENGINE_ID`, which win over the file.

use std::path::{Path, PathBuf};

use civic_search::{AggregatorConfig, LiveApiConfig, ProviderSettings};
use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};

/// Environment variable holding the live search API key.
pub const API_KEY_ENV: &str = "CIVIC_SEARCH_API_KEY";

/// Environment variable holding the live search engine id.
pub const ENGINE_ID_ENV: &str = "CIVIC_SEARCH_ENGINE_ID";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "CIVIC_PORTAL_CONFIG_DIR";

/// Top-level portal configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    pub aggregator: AggregatorConfig,
    pub providers: ProviderSettings,
    pub live_api: LiveApiConfig,
}

impl PortalConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| PortalError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| PortalError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/civic-portal/config.toml`.
    ///
    /// The directory can be overridden with `CIVIC_PORTAL_CONFIG_DIR`.
    pub fn default_config_path() -> PathBuf {
        let dir = if let Some(override_dir) = std::env::var_os(CONFIG_DIR_ENV) {
            PathBuf::from(override_dir)
        } else {
            dirs::config_dir()
                .map(|d| d.join("civic-portal"))
                .unwrap_or_else(|| PathBuf::from("/tmp/civic-portal-config"))
        };
        dir.join("config.toml")
    }

    /// Load from `path`, or from the default path when it exists, or fall
    /// back to defaults. Environment overrides are applied, then the result
    /// is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or malformed, or the
    /// merged configuration is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    tracing::debug!(path = %default_path.display(), "loading default config");
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Overlay credentials from the environment. `lookup` returns the value
    /// of a variable, if set; blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(key) = present(API_KEY_ENV) {
            self.live_api.api_key = Some(key);
        }
        if let Some(engine) = present(ENGINE_ID_ENV) {
            self.live_api.engine_id = Some(engine);
        }
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Search`] wrapping the first section error.
    pub fn validate(&self) -> Result<()> {
        self.aggregator.validate()?;
        self.providers.validate()?;
        self.live_api.validate()?;
        Ok(())
    }
}
