//! System command overrides.
//!
//! Hosts reconfigure system commands (rename them, change aliases, case
//! rules, or confirmation behavior) without touching the command
//! implementations. Overrides are applied exactly once at configuration time
//! and rejected wholesale: the whole map is validated before any command is
//! touched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::error::{Error, Result};

/// A partial modification of one system command's settings.
///
/// Absent fields leave the base setting untouched. The alias list is only
/// consulted together with `use_aliases`; see [`apply_overrides`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandOverride {
    /// Replacement name (trimmed; must not be empty).
    pub name: Option<String>,
    /// Replacement alias-matching flag.
    pub use_aliases: Option<bool>,
    /// Replacement alias list.
    pub aliases: Option<Vec<String>>,
    /// Replacement case-sensitivity flag.
    pub match_case: Option<bool>,
    /// Replacement confirmation flag.
    pub ask_for_confirmation: Option<bool>,
    /// Replacement confirmation question (trimmed; must not be empty).
    pub confirmation_prompt: Option<String>,
}

/// Merge `overrides` into the matching system commands.
///
/// Keys are canonical system identities (see [`crate::builtin`]). The map is
/// validated in full first; on any failure no command is modified.
///
/// Merge rules per override:
/// - `name` replaces the command name (trimmed).
/// - `use_aliases = false` clears the alias list, making aliases unreachable
///   even when the same override carries an alias list.
/// - `use_aliases = true` replaces the alias list when a non-empty one is
///   given, and retains the existing list otherwise.
/// - An `aliases` field without `use_aliases` in the same override is
///   ignored.
/// - `match_case`, `ask_for_confirmation`, and `confirmation_prompt`
///   (trimmed) replace their base fields.
pub fn apply_overrides(
    commands: &mut [Command],
    overrides: &BTreeMap<String, CommandOverride>,
) -> Result<()> {
    let mut staged = Vec::with_capacity(overrides.len());
    for (key, entry) in overrides {
        let slot = commands
            .iter()
            .position(|command| command.is_system(key))
            .ok_or_else(|| Error::UnknownOverrideTarget { key: key.clone() })?;
        if entry.name.as_ref().is_some_and(|name| name.trim().is_empty()) {
            return Err(Error::EmptyName { key: key.clone() });
        }
        if entry
            .confirmation_prompt
            .as_ref()
            .is_some_and(|prompt| prompt.trim().is_empty())
        {
            return Err(Error::EmptyConfirmationPrompt { key: key.clone() });
        }
        staged.push((slot, entry));
    }

    for (slot, entry) in staged {
        let settings = &mut commands[slot].settings;
        if let Some(name) = &entry.name {
            settings.name = name.trim().to_string();
        }
        if let Some(use_aliases) = entry.use_aliases {
            settings.use_aliases = Some(use_aliases);
            if use_aliases {
                if let Some(aliases) = &entry.aliases {
                    if !aliases.is_empty() {
                        settings.aliases = aliases.clone();
                    }
                }
            } else {
                // Aliases become unreachable, even when this override also
                // carries an alias list.
                settings.aliases.clear();
            }
        }
        if let Some(match_case) = entry.match_case {
            settings.match_case = Some(match_case);
        }
        if let Some(ask) = entry.ask_for_confirmation {
            settings.ask_for_confirmation = Some(ask);
        }
        if let Some(prompt) = &entry.confirmation_prompt {
            settings.confirmation_prompt = Some(prompt.trim().to_string());
        }
    }

    Ok(())
}
