//! Configuration management for the Pokedex CLI.
//!
//! Settings come from an optional TOML file in the platform config directory
//! and can be overridden from the command line. A missing file means defaults.

mod settings;

use std::path::PathBuf;

use thiserror::Error;

pub use settings::Settings;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    /// The config file could not be read.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The config file is not valid TOML or has wrong field types.
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The config values are invalid.
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Get the default config file path.
///
/// Returns `<config_dir>/pokedexcli/config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let base_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base_dir.join("pokedexcli").join("config.toml"))
}
