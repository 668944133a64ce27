//! Command registry for the interactive shell.
//!
//! Maps exact command names to a description and the action to run.

use std::collections::HashMap;

/// A command that can be typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The exact text that invokes the command.
    pub name: String,
    /// One-line description shown by `help`.
    pub description: String,
    /// The action to perform when executed.
    pub action: CommandAction,
}

/// Actions that can be triggered by commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandAction {
    /// List every registered command.
    Help,
    /// Leave the shell.
    Exit,
    /// Show the next page of location areas.
    MapForward,
    /// Show the previous page of location areas.
    MapBack,
}

/// Registry of all available commands, keyed by name.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    /// Create a new command registry with the built-in commands.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("help", "Prints the list of available commands", CommandAction::Help);
        registry.register("exit", "Exits the Pokedex CLI", CommandAction::Exit);
        registry.register(
            "map",
            "Displays the names of next 20 location areas",
            CommandAction::MapForward,
        );
        registry.register(
            "mapb",
            "Displays the names of previous 20 location areas",
            CommandAction::MapBack,
        );
        registry
    }

    /// Create a registry with no commands.
    pub fn empty() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Register a command, replacing any command with the same name.
    pub fn register(&mut self, name: &str, description: &str, action: CommandAction) {
        self.commands.insert(
            name.to_string(),
            Command {
                name: name.to_string(),
                description: description.to_string(),
                action,
            },
        );
    }

    /// Look up a command by its exact name.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// All `(name, description)` pairs, sorted by name.
    pub fn list_all(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .commands
            .values()
            .map(|cmd| (cmd.name.as_str(), cmd.description.as_str()))
            .collect();
        entries.sort_unstable_by_key(|(name, _)| *name);
        entries
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
