//! Token index mapping typed input to registered commands.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::command::Command;
use crate::settings::GlobalDefaults;

#[derive(Debug, Clone, Copy)]
struct Binding {
    slot: usize,
    folded: bool,
}

/// Lookup table from typed tokens to command slots.
///
/// Built from the command list when the loop starts, after overrides have
/// settled. Tokens of case-insensitive commands are stored lowercased and
/// matched against the lowercased input as a fallback; tokens of
/// case-sensitive commands match verbatim only. The first registration of a
/// token wins and later collisions are logged and ignored.
#[derive(Debug, Default)]
pub struct TokenIndex {
    bindings: HashMap<String, Binding>,
    order: Vec<String>,
}

impl TokenIndex {
    /// Index every reachable token: each command name, plus its aliases when
    /// alias matching is on for that command.
    pub fn build(commands: &[Command], defaults: &GlobalDefaults) -> Self {
        let mut index = Self::default();
        for (slot, command) in commands.iter().enumerate() {
            let settings = &command.settings;
            let folded = !settings.effective_match_case(defaults);
            index.bind(&settings.name, Binding { slot, folded });
            if settings.effective_use_aliases(defaults) {
                for alias in &settings.aliases {
                    index.bind(alias, Binding { slot, folded });
                }
            }
        }
        index
    }

    fn bind(&mut self, token: &str, binding: Binding) {
        let stored = if binding.folded {
            token.to_lowercase()
        } else {
            token.to_string()
        };
        match self.bindings.entry(stored) {
            Entry::Occupied(collision) => {
                tracing::warn!(
                    token = %collision.key(),
                    "token already bound, keeping the first registration"
                );
            }
            Entry::Vacant(vacant) => {
                self.order.push(vacant.key().clone());
                vacant.insert(binding);
            }
        }
    }

    /// Look up a trimmed input token and return the slot of the command it
    /// names, if any.
    pub fn resolve(&self, token: &str) -> Option<usize> {
        if let Some(binding) = self.bindings.get(token) {
            return Some(binding.slot);
        }
        // The folded fallback must not weaken case-sensitive bindings.
        self.bindings
            .get(&token.to_lowercase())
            .filter(|binding| binding.folded)
            .map(|binding| binding.slot)
    }

    /// Every stored token in registration order. This is the valid answer
    /// set handed to the prompt and the candidate set for near-miss
    /// suggestions.
    pub fn tokens(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Render the listing printed by the help command.
///
/// One line per command in registration order: the name, the aliases in
/// parentheses when they are reachable, and the description when one is set.
pub fn render_help(commands: &[Command], defaults: &GlobalDefaults) -> String {
    let mut lines = vec!["Available commands:".to_string()];
    for command in commands {
        let settings = &command.settings;
        let mut line = format!("  {}", settings.name);
        if settings.effective_use_aliases(defaults) && !settings.aliases.is_empty() {
            line.push_str(&format!(" ({})", settings.aliases.join(", ")));
        }
        if let Some(description) = &settings.description {
            line.push_str(" - ");
            line.push_str(description);
        }
        lines.push(line);
    }
    lines.join("\n")
}
