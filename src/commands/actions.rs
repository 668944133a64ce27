//! Execution of the built-in command actions.

use std::io::Write;

use tracing::debug;

use super::registry::{CommandAction, CommandRegistry};
use crate::api::{LocationAreaPage, PageFetcher};
use crate::error::Result;
use crate::session::Session;

/// What the loop should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Print the prompt and read the next line.
    Continue,
    /// Stop reading input.
    Exit,
}

/// Run `action` against the session, writing its output to `out`.
///
/// # Errors
///
/// Returns an error if a page fetch fails or `out` cannot be written.
pub async fn execute<F, W>(
    action: CommandAction,
    registry: &CommandRegistry,
    session: &mut Session<F>,
    out: &mut W,
) -> Result<CommandOutcome>
where
    F: PageFetcher,
    W: Write,
{
    debug!(?action, offset = session.pagination().offset(), "Executing command");

    match action {
        CommandAction::Help => {
            print_help(registry, out)?;
            Ok(CommandOutcome::Continue)
        }
        CommandAction::Exit => {
            writeln!(out, "Goodbye!")?;
            Ok(CommandOutcome::Exit)
        }
        CommandAction::MapForward => {
            let page = session.next_page().await?;
            print_names(&page, out)?;
            Ok(CommandOutcome::Continue)
        }
        CommandAction::MapBack => {
            let page = session.previous_page().await?;
            print_names(&page, out)?;
            Ok(CommandOutcome::Continue)
        }
    }
}

fn print_help<W: Write>(registry: &CommandRegistry, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "List of available commands:")?;
    for (name, description) in registry.list_all() {
        writeln!(out, "{}: {}", name, description)?;
    }
    Ok(())
}

fn print_names<W: Write>(page: &LocationAreaPage, out: &mut W) -> std::io::Result<()> {
    for name in page.names() {
        writeln!(out, "{}", name)?;
    }
    Ok(())
}
