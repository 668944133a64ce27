//! Pokedex CLI - an interactive shell for browsing PokeAPI location areas.
//!
//! Type `map` and `mapb` at the prompt to page through location areas, `help`
//! to list commands and `exit` to quit.

mod api;
mod commands;
mod config;
mod error;
mod logging;
mod repl;
mod session;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use crate::api::PokeApiClient;
use crate::commands::CommandRegistry;
use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::logging::LogTarget;
use crate::repl::{ExitReason, Repl};
use crate::session::Session;

/// Command-line options.
#[derive(Debug, Parser)]
#[command(name = "pokedexcli", version, about)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// PokeAPI root URL, e.g. https://pokeapi.co/api/v2.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds. Requests wait indefinitely by default.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Print the prompt without color.
    #[arg(long)]
    no_color: bool,

    /// Directory for log files.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    /// Load settings and apply command-line overrides.
    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;

        if let Some(base_url) = &self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout_secs = Some(timeout);
        }
        if self.no_color {
            settings.color = false;
        }
        if let Some(log_dir) = &self.log_dir {
            settings.log_dir = Some(log_dir.clone());
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            report_fatal(&e, None);
            return ExitCode::FAILURE;
        }
    };

    let log_target = match LogTarget::from_settings(&settings) {
        Some(target) => match logging::init(&target) {
            Ok(()) => Some(target),
            Err(e) => {
                eprintln!("Warning: failed to initialize logging: {:#}", e);
                None
            }
        },
        None => {
            eprintln!("Warning: no log directory available, logging disabled");
            None
        }
    };

    let result = run(&settings).await;
    match &result {
        Ok(reason) => info!(?reason, "Shell finished"),
        Err(e) => {
            error!(error = %e, "Fatal error");
            report_fatal(e, log_target.as_ref());
        }
    }

    info!("Pokedex CLI shutting down");
    ExitCode::from(exit_status(&result))
}

/// Process exit status for a finished run: 0 for `exit` or end of input,
/// 1 for any error.
fn exit_status(result: &Result<ExitReason>) -> u8 {
    match result {
        Ok(ExitReason::EndOfInput) | Ok(ExitReason::ExitCommand) => 0,
        Err(_) => 1,
    }
}

fn report_fatal(e: &AppError, log_target: Option<&LogTarget>) {
    eprintln!("Fatal: {}", e);
    eprintln!("{}", e.user_message());
    if let Some(target) = log_target {
        eprintln!("See logs in {}", target.directory.display());
    }
}

async fn run(settings: &Settings) -> Result<ExitReason> {
    let client = PokeApiClient::new(settings)?;
    info!(base_url = client.base_url(), "Using PokeAPI");

    let mut repl = Repl::new(CommandRegistry::new(), Session::new(client), settings.color);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let reason = repl.run(stdin.lock(), &mut stdout).await?;

    info!(
        offset = repl.session().pagination().offset(),
        "Session ended"
    );
    Ok(reason)
}
