//! Built-in system commands.
//!
//! System commands ship with fixed canonical identities that hosts use as
//! override keys. Their settings can be overridden; their identities and
//! actions cannot.

use crate::command::{Command, CommandAction};
use crate::settings::CommandSettings;

/// Canonical identity of the exit command.
pub const EXIT: &str = "exit";
/// Canonical identity of the help command.
pub const HELP: &str = "help";

/// Returns the system commands seeded into every dispatcher, in registration
/// order.
pub fn system_commands() -> Vec<Command> {
    vec![
        Command::system(
            EXIT,
            CommandSettings::new(EXIT)
                .with_aliases(["q"])
                .with_ask_for_confirmation(true)
                .with_description("Leave the prompt loop"),
            CommandAction::Stop,
        ),
        Command::system(
            HELP,
            CommandSettings::new(HELP)
                .with_aliases(["h"])
                .with_ask_for_confirmation(false)
                .with_description("List the available commands"),
            CommandAction::ShowHelp,
        ),
    ]
}
