//! The interactive read-eval-print loop.
//!
//! Reads command names line by line, dispatches them through the registry and
//! reprints the prompt. Input is matched verbatim: only the line terminator is
//! removed.

use std::io::{BufRead, Write};

use crossterm::style::Stylize;
use tracing::{debug, error, info};

use crate::api::PageFetcher;
use crate::commands::{self, CommandOutcome, CommandRegistry};
use crate::error::Result;
use crate::session::Session;

const WELCOME: &str = "Welcome to the Pokedex CLI!";
const PROMPT: &str = "Pokedex CLI>";
const NOT_FOUND: &str = "Command not found. Type 'help' to see the list of available commands.";

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The input stream was exhausted.
    EndOfInput,
    /// The user ran `exit`.
    ExitCommand,
}

/// The shell: command registry, session and prompt style.
pub struct Repl<F> {
    registry: CommandRegistry,
    session: Session<F>,
    color: bool,
}

impl<F: PageFetcher> Repl<F> {
    /// Create a shell over `session` with the given commands.
    pub fn new(registry: CommandRegistry, session: Session<F>, color: bool) -> Self {
        Self {
            registry,
            session,
            color,
        }
    }

    /// The session, for inspecting state after a run.
    pub fn session(&self) -> &Session<F> {
        &self.session
    }

    /// Run the loop until end of input, `exit`, or a fatal error.
    ///
    /// # Errors
    ///
    /// Returns the first error: a failed page fetch or a failed read or write
    /// on the terminal. Any such error ends the session.
    pub async fn run<R, W>(&mut self, mut input: R, out: &mut W) -> Result<ExitReason>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(out, "{}", WELCOME)?;
        self.print_prompt(out)?;

        let mut buf = Vec::new();
        while let Some(line) = read_line(&mut input, &mut buf)? {
            match self.registry.lookup(&line) {
                Some(command) => {
                    let action = command.action;
                    info!(command = %line, "Running command");

                    match commands::execute(action, &self.registry, &mut self.session, out).await {
                        Ok(CommandOutcome::Continue) => {}
                        Ok(CommandOutcome::Exit) => {
                            info!("Exit requested");
                            return Ok(ExitReason::ExitCommand);
                        }
                        Err(e) => {
                            error!(command = %line, error = %e, "Command failed");
                            return Err(e);
                        }
                    }
                }
                None => {
                    debug!(input = %line, "Unknown command");
                    writeln!(out, "{}", NOT_FOUND)?;
                }
            }

            self.print_prompt(out)?;
        }

        info!("End of input");
        Ok(ExitReason::EndOfInput)
    }

    fn print_prompt<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.color {
            write!(out, "{}", PROMPT.dark_blue())?;
        } else {
            write!(out, "{}", PROMPT)?;
        }
        out.flush()
    }
}

/// Read one line, without its `\n` or `\r\n` terminator.
///
/// Bytes that are not UTF-8 are replaced rather than rejected, so such a line
/// simply matches no command. Returns `None` at end of input.
fn read_line<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>> {
    buf.clear();
    if input.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::error::AppError;
    use crate::session::tests::{page_of, FakeFetcher};

    async fn run_script(
        fetcher: FakeFetcher,
        script: &str,
    ) -> (Repl<FakeFetcher>, Result<ExitReason>, String) {
        let mut repl = Repl::new(CommandRegistry::new(), Session::new(fetcher), false);
        let mut out = Vec::new();
        let result = repl.run(script.as_bytes(), &mut out).await;
        (repl, result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_banner_and_prompt_on_empty_input() {
        let (_, result, output) = run_script(FakeFetcher::default(), "").await;

        assert_eq!(result.unwrap(), ExitReason::EndOfInput);
        assert_eq!(output, "Welcome to the Pokedex CLI!\nPokedex CLI>");
    }

    #[tokio::test]
    async fn test_unknown_commands_keep_loop_running() {
        let (_, result, output) =
            run_script(FakeFetcher::default(), "pokemon\nHELP\n help\n\nhelp\n").await;

        assert_eq!(result.unwrap(), ExitReason::EndOfInput);
        assert_eq!(output.matches(NOT_FOUND).count(), 4);
        assert!(output.contains("List of available commands:"));
        assert!(output.ends_with(PROMPT));
        assert_eq!(output.matches(PROMPT).count(), 6);
    }

    #[tokio::test]
    async fn test_crlf_line_endings_match() {
        let (_, result, output) = run_script(FakeFetcher::default(), "help\r\n").await;

        assert_eq!(result.unwrap(), ExitReason::EndOfInput);
        assert!(!output.contains(NOT_FOUND));
        assert!(output.contains("List of available commands:"));
    }

    #[tokio::test]
    async fn test_exit_stops_reading_input() {
        let (_, result, output) = run_script(FakeFetcher::default(), "exit\nhelp\n").await;

        assert_eq!(result.unwrap(), ExitReason::ExitCommand);
        assert_eq!(
            output,
            "Welcome to the Pokedex CLI!\nPokedex CLI>Goodbye!\n"
        );
    }

    #[tokio::test]
    async fn test_map_output_and_offsets() {
        let fetcher = FakeFetcher::with_pages(vec![
            Ok(page_of(&["route-1", "route-2"])),
            Ok(page_of(&["route-3"])),
        ]);
        let (repl, result, output) = run_script(fetcher, "map\nmap\n").await;

        assert_eq!(result.unwrap(), ExitReason::EndOfInput);
        assert_eq!(
            output,
            "Welcome to the Pokedex CLI!\nPokedex CLI>route-1\nroute-2\nPokedex CLI>route-3\nPokedex CLI>"
        );
        assert_eq!(repl.session().pagination().offset(), 40);
    }

    #[tokio::test]
    async fn test_mapb_after_two_pages() {
        let (repl, result, _) = run_script(FakeFetcher::default(), "map\nmap\nmapb\n").await;

        assert_eq!(result.unwrap(), ExitReason::EndOfInput);
        assert_eq!(repl.session().pagination().offset(), 20);
    }

    #[tokio::test]
    async fn test_fatal_fetch_error_stops_loop() {
        let fetcher = FakeFetcher::with_pages(vec![Err(ApiError::InvalidResponse(
            "expected value".to_string(),
        ))]);
        let (_, result, output) = run_script(fetcher, "map\nhelp\n").await;

        assert!(matches!(
            result,
            Err(AppError::Api(ApiError::InvalidResponse(_)))
        ));
        assert!(!output.contains("List of available commands:"));
        assert!(!output.contains("Error executing command"));
    }

    #[tokio::test]
    async fn test_rate_limited_fetch_stops_loop() {
        let fetcher = FakeFetcher::with_pages(vec![
            Err(ApiError::RateLimited),
            Ok(page_of(&["route-1"])),
        ]);
        let (repl, result, output) = run_script(fetcher, "map\nmap\n").await;

        assert!(matches!(result, Err(AppError::Api(ApiError::RateLimited))));
        assert_eq!(output, "Welcome to the Pokedex CLI!\nPokedex CLI>");
        assert_eq!(repl.session().pagination().offset(), 0);
    }

    #[tokio::test]
    async fn test_not_found_page_stops_loop() {
        let fetcher = FakeFetcher::with_pages(vec![
            Ok(page_of(&["a"])),
            Ok(page_of(&["b"])),
            Err(ApiError::NotFound("location-area".to_string())),
        ]);
        let (_, result, output) = run_script(fetcher, "map\nmap\nmapb\nhelp\n").await;

        assert!(matches!(result, Err(AppError::Api(ApiError::NotFound(_)))));
        assert!(!output.contains("List of available commands:"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_unknown_command() {
        let mut repl = Repl::new(
            CommandRegistry::new(),
            Session::new(FakeFetcher::default()),
            false,
        );
        let mut out = Vec::new();
        let input: &[u8] = b"\xff\xfe\nhelp\n";

        let result = repl.run(input, &mut out).await;

        assert_eq!(result.unwrap(), ExitReason::EndOfInput);
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches(NOT_FOUND).count(), 1);
        assert!(output.contains("List of available commands:"));
    }

    #[test]
    fn test_read_line_strips_terminators_only() {
        let mut input: &[u8] = b" map \r\nmapb\nexit";
        let mut buf = Vec::new();

        assert_eq!(read_line(&mut input, &mut buf).unwrap().as_deref(), Some(" map "));
        assert_eq!(read_line(&mut input, &mut buf).unwrap().as_deref(), Some("mapb"));
        assert_eq!(read_line(&mut input, &mut buf).unwrap().as_deref(), Some("exit"));
        assert_eq!(read_line(&mut input, &mut buf).unwrap(), None);
    }

    #[tokio::test]
    async fn test_colored_prompt() {
        let mut repl = Repl::new(
            CommandRegistry::new(),
            Session::new(FakeFetcher::default()),
            true,
        );
        let mut out = Vec::new();
        repl.run("".as_bytes(), &mut out).await.unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains(PROMPT));
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(output.contains('\u{1b}'));
        }
    }
}
