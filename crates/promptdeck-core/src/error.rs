//! Error types for the promptdeck core library.

use thiserror::Error;

/// Result type alias using the promptdeck core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for dispatcher configuration and the dispatch loop.
///
/// The first three variants are configuration-time failures: an invalid
/// override rejects the whole override map before any command is touched.
/// `Prompt` and `Action` are loop-time failures and end the loop.
#[derive(Debug, Error)]
pub enum Error {
    /// An override key does not match any system command.
    #[error("override `{key}` does not match any system command")]
    UnknownOverrideTarget { key: String },

    /// An override sets a command name that is empty after trimming.
    #[error("override `{key}` sets an empty command name")]
    EmptyName { key: String },

    /// An override sets a confirmation prompt that is empty after trimming.
    #[error("override `{key}` sets an empty confirmation prompt")]
    EmptyConfirmationPrompt { key: String },

    /// The prompt collaborator failed (closed terminal, EOF, I/O error).
    #[error("prompt failed: {0}")]
    Prompt(#[source] anyhow::Error),

    /// A command action returned an error; action failures are fatal.
    #[error("command `{name}` failed: {source}")]
    Action {
        name: String,
        #[source]
        source: anyhow::Error,
    },
}
