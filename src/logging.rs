//! File logging for the shell.
//!
//! Stdout carries the prompt and command output, so tracing events are written
//! to a daily-rotated file. Its directory and filter come from `Settings`.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use crate::config::Settings;

/// Log file name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "pokedexcli.log";

/// Filter used when neither `RUST_LOG` nor the settings give one.
const DEFAULT_FILTER: &str = "pokedexcli=info,warn";

/// Where log files go and which events are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTarget {
    pub directory: PathBuf,
    pub filter: String,
}

impl LogTarget {
    /// Resolve the target for these settings.
    ///
    /// A non-empty `RUST_LOG` overrides `log_filter`. Returns `None` when no
    /// directory is configured and the platform has no local data directory.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        Self::resolve(settings, std::env::var("RUST_LOG").ok())
    }

    fn resolve(settings: &Settings, env_filter: Option<String>) -> Option<Self> {
        let directory = match &settings.log_dir {
            Some(dir) => dir.clone(),
            None => dirs::data_local_dir()?.join("pokedexcli").join("logs"),
        };

        let filter = env_filter
            .filter(|f| !f.trim().is_empty())
            .or_else(|| settings.log_filter.clone())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string());

        Some(Self { directory, filter })
    }
}

/// Install the global subscriber writing into `target.directory`.
///
/// # Errors
///
/// Fails if the directory cannot be created, the filter does not parse, or a
/// global subscriber is already set.
pub fn init(target: &LogTarget) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&target.filter)
        .with_context(|| format!("invalid log filter '{}'", target.filter))?;

    std::fs::create_dir_all(&target.directory)
        .with_context(|| format!("cannot create {}", target.directory.display()))?;

    let appender = RollingFileAppender::new(Rotation::DAILY, &target.directory, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        directory = %target.directory.display(),
        filter = %target.filter,
        "Logging to file"
    );
    Ok(())
}
