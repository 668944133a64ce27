//! Application settings configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use super::{default_config_path, ConfigError, Result};

/// The public PokeAPI root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root URL of the PokeAPI.
    pub base_url: String,
    /// Per-request timeout in seconds. `None` waits indefinitely.
    pub request_timeout_secs: Option<u64>,
    /// Whether the prompt is colored.
    pub color: bool,
    /// Directory for log files. Defaults to the platform data directory.
    pub log_dir: Option<PathBuf>,
    /// `tracing` filter directives, e.g. `pokedexcli=debug`. `RUST_LOG` wins.
    pub log_filter: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            color: true,
            log_dir: None,
            log_filter: None,
        }
    }
}

impl Settings {
    /// Load settings.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// config file is read if it exists and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or holds
    /// invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                Ok(path) => {
                    debug!(path = %path.display(), "No config file, using defaults");
                    Self::default()
                }
                Err(ConfigError::NoConfigDir) => Self::default(),
                Err(e) => return Err(e),
            },
        };

        settings.validate()?;
        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading config file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.log_filter.as_deref().is_some_and(|f| f.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "log_filter cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
