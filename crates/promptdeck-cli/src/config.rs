//! Deck file loading.
//!
//! The deck is a TOML file of global defaults, system command overrides, and
//! custom shell commands, by default at `~/.config/promptdeck/deck.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use promptdeck_core::{
    Command, CommandOverride, CommandSettings, Dispatcher, GlobalDefaults, Prompter,
};
use serde::{Deserialize, Serialize};

use crate::shell;

/// Everything the prompt loop is configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deck {
    /// Global defaults, including both prompt texts.
    pub defaults: GlobalDefaults,
    /// System command overrides, keyed by canonical identity.
    pub overrides: BTreeMap<String, CommandOverride>,
    /// Custom shell commands.
    pub commands: Vec<DeckCommand>,
}

/// One custom command: matching settings plus the shell line it runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCommand {
    #[serde(flatten)]
    pub settings: CommandSettings,
    /// Shell command line, run with `sh -c`.
    pub run: String,
    /// Working directory for `run`.
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl DeckCommand {
    /// Turn the deck entry into a registrable command.
    ///
    /// Settings arrive straight from serde, so the name and confirmation
    /// prompt are trimmed here; a blank confirmation prompt counts as unset
    /// and defers to the global default.
    pub fn into_command(self) -> Command {
        let Self {
            mut settings,
            run,
            cwd,
        } = self;
        settings.name = settings.name.trim().to_string();
        settings.confirmation_prompt = settings
            .confirmation_prompt
            .take()
            .map(|prompt| prompt.trim().to_string())
            .filter(|prompt| !prompt.is_empty());
        Command::from_fn(settings, move || shell::run_line(&run, cwd.as_deref()))
    }
}

impl Deck {
    /// Build the configured dispatcher: defaults applied, system commands
    /// overridden, custom commands registered. A deck command whose name is
    /// empty after trimming is rejected, since no input could ever reach it.
    pub fn into_dispatcher<P: Prompter>(self, prompter: P) -> Result<Dispatcher<P>> {
        let mut dispatcher = Dispatcher::new(prompter).with_defaults(self.defaults);
        dispatcher
            .apply_overrides(&self.overrides)
            .context("invalid system command override")?;
        for (position, entry) in self.commands.iter().enumerate() {
            if entry.settings.name.trim().is_empty() {
                anyhow::bail!("deck command #{} has an empty name", position + 1);
            }
        }
        for entry in self.commands {
            dispatcher.register(entry.into_command());
        }
        Ok(dispatcher)
    }
}

/// Default deck location: `<config dir>/promptdeck/deck.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("promptdeck").join("deck.toml"))
}

/// Load the deck.
///
/// With an explicit `path` the file must exist and parse. Without one, a
/// missing file at the default location is not an error: the loop starts with
/// the built-in commands only.
pub fn load(path: Option<&Path>) -> Result<Deck> {
    if let Some(path) = path {
        return read(path);
    }
    let Some(path) = default_path() else {
        tracing::info!("no config directory, starting with built-in commands only");
        return Ok(Deck::default());
    };
    if path.exists() {
        read(&path)
    } else {
        tracing::info!(path = %path.display(), "no deck file, starting with built-in commands only");
        Ok(Deck::default())
    }
}

fn read(path: &Path) -> Result<Deck> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file: {}", path.display()))?;
    let deck = toml::from_str(&raw)
        .with_context(|| format!("invalid deck file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), "deck loaded");
    Ok(deck)
}
