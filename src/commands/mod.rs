//! Command system for the interactive shell.
//!
//! This module provides:
//! - Command definitions and the name-keyed registry
//! - Execution of the built-in actions against a session

mod actions;
mod registry;

pub use actions::{execute, CommandOutcome};
pub use registry::CommandRegistry;
