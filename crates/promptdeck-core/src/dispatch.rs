//! The prompt loop.
//!
//! [`Dispatcher`] owns the command list and the prompt collaborator. `run`
//! builds the token index once, then asks, resolves, confirms, and executes
//! until the exit command stops the loop.

use std::collections::BTreeMap;

use crate::builtin;
use crate::command::{Command, CommandAction};
use crate::error::{Error, Result};
use crate::overrides::{self, CommandOverride};
use crate::registry::{self, TokenIndex};
use crate::settings::GlobalDefaults;

/// Line input for the loop.
///
/// Implementations keep asking until they have an answer; returning `Err`
/// means input is gone for good (EOF, closed terminal) and stops the loop.
pub trait Prompter {
    /// Read one line of input. `valid` lists every recognized token, in
    /// registration order, for completion or validation.
    fn ask(&mut self, prompt: &str, valid: &[String]) -> anyhow::Result<String>;

    /// Ask a yes/no question.
    fn ask_yes_no(&mut self, question: &str) -> anyhow::Result<bool>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Stopped,
}

/// The interactive command loop.
///
/// Ships with the system commands already registered. Configure it in this
/// order: adjust [`GlobalDefaults`], apply system command overrides, register
/// custom commands, then [`run`](Self::run).
pub struct Dispatcher<P> {
    commands: Vec<Command>,
    defaults: GlobalDefaults,
    prompter: P,
}

impl<P> std::fmt::Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("commands", &self.commands)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}

impl<P: Prompter> Dispatcher<P> {
    /// A dispatcher holding the system commands and stock defaults.
    pub fn new(prompter: P) -> Self {
        Self {
            commands: builtin::system_commands(),
            defaults: GlobalDefaults::default(),
            prompter,
        }
    }

    #[must_use]
    pub fn with_defaults(mut self, defaults: GlobalDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Reconfigure system commands. Validates the whole map first; on any
    /// failure nothing is modified. See [`overrides::apply_overrides`].
    pub fn apply_overrides(
        &mut self,
        overrides: &BTreeMap<String, CommandOverride>,
    ) -> Result<()> {
        overrides::apply_overrides(&mut self.commands, overrides)
    }

    /// Append a custom command. Token collisions are not rejected here; the
    /// first registered binding of a token wins at lookup time.
    pub fn register(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn defaults(&self) -> &GlobalDefaults {
        &self.defaults
    }

    /// The prompt collaborator, for hosts that take it back after `run`.
    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Run the loop until the exit command stops it.
    ///
    /// Unknown tokens and declined confirmations skip the iteration. Prompt
    /// failures and action errors are fatal and surface as
    /// [`Error::Prompt`] and [`Error::Action`].
    pub fn run(mut self) -> Result<Self> {
        let index = TokenIndex::build(&self.commands, &self.defaults);
        tracing::debug!(
            commands = self.commands.len(),
            tokens = index.len(),
            "prompt loop started"
        );

        let mut state = LoopState::Running;
        while state == LoopState::Running {
            let line = self
                .prompter
                .ask(&self.defaults.prompt, index.tokens())
                .map_err(Error::Prompt)?;
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            let Some(slot) = index.resolve(token) else {
                tracing::debug!(token, "input resolved to no command");
                continue;
            };

            let name = self.commands[slot].settings.name.clone();
            if self.commands[slot]
                .settings
                .effective_ask_for_confirmation(&self.defaults)
            {
                let question = self.commands[slot]
                    .settings
                    .effective_confirmation_prompt(&self.defaults)
                    .to_string();
                if !self.prompter.ask_yes_no(&question).map_err(Error::Prompt)? {
                    tracing::debug!(command = %name, "confirmation declined");
                    continue;
                }
            }

            if matches!(self.commands[slot].action, CommandAction::Stop) {
                tracing::debug!(command = %name, "stop requested");
                state = LoopState::Stopped;
                continue;
            }
            if matches!(self.commands[slot].action, CommandAction::ShowHelp) {
                let help = registry::render_help(&self.commands, &self.defaults);
                #[allow(clippy::print_stdout)]
                {
                    println!("{help}");
                }
                continue;
            }
            if let CommandAction::Invoke(action) = &mut self.commands[slot].action {
                tracing::debug!(command = %name, "invoking");
                action().map_err(|source| Error::Action { name, source })?;
            }
        }

        tracing::debug!("prompt loop stopped");
        Ok(self)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use anyhow::Context as _;

    use super::*;
    use crate::builtin::EXIT;
    use crate::settings::CommandSettings;

    struct ScriptedPrompter {
        answers: VecDeque<String>,
        confirmations: VecDeque<bool>,
        questions: Vec<String>,
    }

    impl ScriptedPrompter {
        fn new(answers: &[&str], confirmations: &[bool]) -> Self {
            Self {
                answers: answers.iter().map(ToString::to_string).collect(),
                confirmations: confirmations.iter().copied().collect(),
                questions: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        fn ask(&mut self, _prompt: &str, _valid: &[String]) -> anyhow::Result<String> {
            self.answers.pop_front().context("script ran out of answers")
        }

        fn ask_yes_no(&mut self, question: &str) -> anyhow::Result<bool> {
            self.questions.push(question.to_string());
            self.confirmations
                .pop_front()
                .context("script ran out of confirmations")
        }
    }

    fn counting_command(name: &str, fired: &Arc<AtomicUsize>) -> Command {
        let fired = Arc::clone(fired);
        Command::from_fn(CommandSettings::new(name), move || {
            fired.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    #[test]
    fn confirmed_command_fires_once_then_exit_stops() {
        let fired = Arc::new(AtomicUsize::new(0));
        let script = ScriptedPrompter::new(&["greet", "exit"], &[true, true]);
        let mut dispatcher = Dispatcher::new(script);
        let counter = Arc::clone(&fired);
        dispatcher.register(Command::from_fn(
            CommandSettings::new("greet").with_ask_for_confirmation(true),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        ));

        dispatcher.run().unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn declined_confirmation_never_fires_the_action() {
        let fired = Arc::new(AtomicUsize::new(0));
        let script = ScriptedPrompter::new(&["greet", "exit"], &[false, true]);
        let mut dispatcher = Dispatcher::new(script);
        let counter = Arc::clone(&fired);
        dispatcher.register(Command::from_fn(
            CommandSettings::new("greet").with_ask_for_confirmation(true),
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        ));

        dispatcher.run().unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn commands_without_confirmation_run_immediately() {
        let fired = Arc::new(AtomicUsize::new(0));
        // Only the exit command may consume a confirmation.
        let script = ScriptedPrompter::new(&["greet", "exit"], &[true]);
        let mut dispatcher = Dispatcher::new(script);
        dispatcher.register(counting_command("greet", &fired));

        dispatcher.run().unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_input_is_skipped_and_the_loop_continues() {
        let script = ScriptedPrompter::new(&["frobnicate", "exit"], &[true]);
        let dispatcher = Dispatcher::new(script);

        assert!(dispatcher.run().is_ok());
    }

    #[test]
    fn blank_input_is_skipped() {
        let script = ScriptedPrompter::new(&["   ", "", "exit"], &[true]);
        let dispatcher = Dispatcher::new(script);

        assert!(dispatcher.run().is_ok());
    }

    #[test]
    fn exit_alias_stops_the_loop() {
        let script = ScriptedPrompter::new(&["q"], &[true]);
        let dispatcher = Dispatcher::new(script);

        assert!(dispatcher.run().is_ok());
    }

    #[test]
    fn mixed_case_input_resolves_with_stock_defaults() {
        let script = ScriptedPrompter::new(&["EXIT"], &[true]);
        let dispatcher = Dispatcher::new(script);

        assert!(dispatcher.run().is_ok());
    }

    #[test]
    fn help_runs_without_confirmation_and_the_loop_continues() {
        let script = ScriptedPrompter::new(&["help", "exit"], &[true]);
        let dispatcher = Dispatcher::new(script);

        assert!(dispatcher.run().is_ok());
    }

    #[test]
    fn action_errors_are_fatal() {
        let script = ScriptedPrompter::new(&["boom", "exit"], &[true]);
        let mut dispatcher = Dispatcher::new(script);
        dispatcher.register(Command::from_fn(CommandSettings::new("boom"), || {
            anyhow::bail!("kaput")
        }));

        let err = dispatcher.run().unwrap_err();

        assert!(matches!(err, Error::Action { name, .. } if name == "boom"));
    }

    #[test]
    fn a_failing_prompter_is_fatal() {
        let script = ScriptedPrompter::new(&[], &[]);
        let dispatcher = Dispatcher::new(script);

        let err = dispatcher.run().unwrap_err();

        assert!(matches!(err, Error::Prompt(_)));
    }

    #[test]
    fn overridden_exit_drops_its_old_name_and_its_confirmation() {
        // The old name no longer resolves, and no confirmation is consumed.
        let script = ScriptedPrompter::new(&["exit", "leave"], &[]);
        let mut dispatcher = Dispatcher::new(script);
        let overrides = BTreeMap::from([(
            EXIT.to_string(),
            CommandOverride {
                name: Some("leave".to_string()),
                ask_for_confirmation: Some(false),
                ..Default::default()
            },
        )]);
        dispatcher.apply_overrides(&overrides).unwrap();

        assert!(dispatcher.run().is_ok());
    }

    #[test]
    fn the_effective_confirmation_prompt_reaches_the_prompter() {
        let script = ScriptedPrompter::new(&["greet", "exit"], &[true, true]);
        let mut dispatcher = Dispatcher::new(script);
        dispatcher.register(Command::from_fn(
            CommandSettings::new("greet")
                .with_ask_for_confirmation(true)
                .with_confirmation_prompt("Proceed?"),
            || Ok(()),
        ));

        let dispatcher = dispatcher.run().unwrap();

        // greet carries its own question; exit falls back to the default.
        assert_eq!(dispatcher.prompter().questions, ["Proceed?", "Are you sure?"]);
    }

    #[test]
    fn run_returns_the_dispatcher_for_inspection() {
        let script = ScriptedPrompter::new(&["exit"], &[true]);
        let mut dispatcher = Dispatcher::new(script);
        dispatcher.register(Command::from_fn(CommandSettings::new("greet"), || Ok(())));

        let dispatcher = dispatcher.run().unwrap();

        assert_eq!(dispatcher.commands().len(), 3);
        assert_eq!(dispatcher.defaults().prompt, "command");
    }

    #[test]
    fn the_debug_format_elides_the_prompter() {
        let script = ScriptedPrompter::new(&[], &[]);
        let dispatcher = Dispatcher::new(script);

        let rendered = format!("{dispatcher:?}");

        assert!(rendered.starts_with("Dispatcher"));
        assert!(rendered.contains("exit"));
        assert!(!rendered.contains("ScriptedPrompter"));
    }

    #[test]
    fn default_confirmation_flag_applies_to_unset_commands() {
        let fired = Arc::new(AtomicUsize::new(0));
        // greet inherits ask_for_confirmation=true from the defaults here.
        let script = ScriptedPrompter::new(&["greet", "exit"], &[true, true]);
        let defaults = GlobalDefaults {
            ask_for_confirmation: true,
            ..GlobalDefaults::default()
        };
        let mut dispatcher = Dispatcher::new(script).with_defaults(defaults);
        dispatcher.register(counting_command("greet", &fired));

        dispatcher.run().unwrap();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
