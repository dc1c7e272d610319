//! Command settings and global defaults.
//!
//! Every matching/confirmation flag on a command is tri-state: an explicit
//! value, or `None` to defer to the [`GlobalDefaults`]. The `effective_*`
//! accessors resolve that precedence, so dispatch-time reads always see a
//! concrete value.

use serde::{Deserialize, Serialize};

/// Matching and confirmation settings for a single command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSettings {
    /// Primary input token. Trimmed on construction.
    pub name: String,
    /// Alternative input tokens; consulted only when `use_aliases` resolves
    /// to true.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Whether aliases take part in matching; `None` defers to the global
    /// default.
    #[serde(default)]
    pub use_aliases: Option<bool>,
    /// Whether matching is case-sensitive; `None` defers to the global
    /// default.
    #[serde(default)]
    pub match_case: Option<bool>,
    /// Whether dispatch asks for confirmation first; `None` defers to the
    /// global default.
    #[serde(default)]
    pub ask_for_confirmation: Option<bool>,
    /// Confirmation question text; `None` defers to the global default.
    #[serde(default)]
    pub confirmation_prompt: Option<String>,
    /// Free-form description shown by the help command.
    #[serde(default)]
    pub description: Option<String>,
}

impl CommandSettings {
    /// Create settings for `name`, with every other field deferring to the
    /// global defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            aliases: Vec::new(),
            use_aliases: None,
            match_case: None,
            ask_for_confirmation: None,
            confirmation_prompt: None,
            description: None,
        }
    }

    /// Set the alias list.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    /// Set whether aliases take part in matching.
    #[must_use]
    pub fn with_use_aliases(mut self, use_aliases: bool) -> Self {
        self.use_aliases = Some(use_aliases);
        self
    }

    /// Set whether matching is case-sensitive.
    #[must_use]
    pub fn with_match_case(mut self, match_case: bool) -> Self {
        self.match_case = Some(match_case);
        self
    }

    /// Set whether dispatch asks for confirmation first.
    #[must_use]
    pub fn with_ask_for_confirmation(mut self, ask: bool) -> Self {
        self.ask_for_confirmation = Some(ask);
        self
    }

    /// Set the confirmation question text.
    #[must_use]
    pub fn with_confirmation_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.confirmation_prompt = Some(prompt.into());
        self
    }

    /// Set the description shown by the help command.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Effective alias-matching flag: own value, else the global default.
    pub fn effective_use_aliases(&self, defaults: &GlobalDefaults) -> bool {
        self.use_aliases.unwrap_or(defaults.use_aliases)
    }

    /// Effective case-sensitivity flag: own value, else the global default.
    pub fn effective_match_case(&self, defaults: &GlobalDefaults) -> bool {
        self.match_case.unwrap_or(defaults.match_case)
    }

    /// Effective confirmation flag: own value, else the global default.
    pub fn effective_ask_for_confirmation(&self, defaults: &GlobalDefaults) -> bool {
        self.ask_for_confirmation.unwrap_or(defaults.ask_for_confirmation)
    }

    /// Effective confirmation question: own text, else the global default.
    pub fn effective_confirmation_prompt<'a>(&'a self, defaults: &'a GlobalDefaults) -> &'a str {
        self.confirmation_prompt
            .as_deref()
            .unwrap_or(&defaults.confirmation_prompt)
    }
}

/// Global fallback values for every tri-state command setting, plus the two
/// prompt texts used by the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalDefaults {
    /// Fallback for [`CommandSettings::use_aliases`].
    pub use_aliases: bool,
    /// Fallback for [`CommandSettings::match_case`].
    pub match_case: bool,
    /// Fallback for [`CommandSettings::ask_for_confirmation`].
    pub ask_for_confirmation: bool,
    /// Input prompt shown at the top of every loop iteration.
    pub prompt: String,
    /// Fallback confirmation question.
    pub confirmation_prompt: String,
}

impl Default for GlobalDefaults {
    fn default() -> Self {
        Self {
            use_aliases: true,
            match_case: false,
            ask_for_confirmation: false,
            prompt: "command".to_string(),
            confirmation_prompt: "Are you sure?".to_string(),
        }
    }
}
