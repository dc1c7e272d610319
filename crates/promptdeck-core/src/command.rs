//! Command definitions: settings paired with an executable action.

use crate::settings::CommandSettings;

/// What happens when a command is dispatched.
///
/// `Stop` and `ShowHelp` are interpreted by the dispatch loop itself;
/// `Invoke` runs a host-supplied callback.
pub enum CommandAction {
    /// Stop the dispatch loop (the exit command).
    Stop,
    /// Print the command summary (the help command).
    ShowHelp,
    /// Run a host-supplied zero-argument action.
    Invoke(Box<dyn FnMut() -> anyhow::Result<()>>),
}

impl std::fmt::Debug for CommandAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stop => f.write_str("Stop"),
            Self::ShowHelp => f.write_str("ShowHelp"),
            Self::Invoke(_) => f.write_str("Invoke(..)"),
        }
    }
}

/// A dispatchable command.
#[derive(Debug)]
pub struct Command {
    /// Canonical system-command identity; `None` for custom commands.
    /// Overrides are keyed by this, never by the (renamable) settings name.
    identity: Option<String>,
    /// Matching and confirmation settings.
    pub settings: CommandSettings,
    /// The action performed on dispatch.
    pub action: CommandAction,
}

impl Command {
    /// Create a custom command.
    pub fn new(settings: CommandSettings, action: CommandAction) -> Self {
        Self {
            identity: None,
            settings,
            action,
        }
    }

    /// Create a custom command from a zero-argument callback.
    pub fn from_fn(
        settings: CommandSettings,
        action: impl FnMut() -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self::new(settings, CommandAction::Invoke(Box::new(action)))
    }

    /// Create a system command carrying an immutable canonical identity.
    pub(crate) fn system(identity: &str, settings: CommandSettings, action: CommandAction) -> Self {
        Self {
            identity: Some(identity.to_string()),
            settings,
            action,
        }
    }

    /// The canonical system identity, if this is a system command.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Whether this is the system command with the given canonical identity.
    pub(crate) fn is_system(&self, identity: &str) -> bool {
        self.identity.as_deref() == Some(identity)
    }
}
