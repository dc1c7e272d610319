//! Terminal prompts.
//!
//! [`TermPrompter`] is the dialoguer-backed [`Prompter`]: a validated input
//! line for command tokens and a yes/no confirm. Validation is lenient about
//! case (the token index is the arbiter) and rejects unknown tokens with a
//! near-miss suggestion before re-asking.

use anyhow::Result;
use dialoguer::{Confirm, Input};
use promptdeck_core::{Prompter, closest_token};

/// Prompter for an interactive terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermPrompter;

impl Prompter for TermPrompter {
    fn ask(&mut self, prompt: &str, valid: &[String]) -> Result<String> {
        let valid = valid.to_vec();
        let line: String = Input::new()
            .with_prompt(prompt)
            .validate_with(move |line: &String| validate_token(line, &valid))
            .interact_text()?;
        Ok(line)
    }

    fn ask_yes_no(&mut self, question: &str) -> Result<bool> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()?)
    }
}

/// Accept anything the token index could resolve, reject the rest with a
/// near-miss suggestion when one exists.
fn validate_token(line: &str, valid: &[String]) -> std::result::Result<(), String> {
    let token = line.trim();
    if token.is_empty() {
        return Err("type a command".to_string());
    }
    if is_recognized(token, valid) {
        return Ok(());
    }
    match closest_token(token, valid) {
        Some(suggestion) => Err(format!(
            "unknown command '{token}', did you mean '{suggestion}'?"
        )),
        None => Err(format!("unknown command '{token}'")),
    }
}

fn is_recognized(token: &str, valid: &[String]) -> bool {
    if valid.iter().any(|candidate| candidate == token) {
        return true;
    }
    let folded = token.to_lowercase();
    valid.iter().any(|candidate| *candidate == folded)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> Vec<String> {
        ["exit", "q", "help", "h"]
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn known_tokens_pass() {
        assert_eq!(validate_token("exit", &valid()), Ok(()));
        assert_eq!(validate_token("q", &valid()), Ok(()));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(validate_token("  exit  ", &valid()), Ok(()));
    }

    #[test]
    fn case_divergent_input_passes_leniently() {
        // The index still decides; case-sensitive commands reject there.
        assert_eq!(validate_token("EXIT", &valid()), Ok(()));
    }

    #[test]
    fn the_wrong_case_of_a_cased_token_is_rejected() {
        let valid = vec!["Deploy".to_string()];
        let message = validate_token("deploy", &valid).unwrap_err();
        assert!(message.contains("did you mean 'Deploy'?"));
    }

    #[test]
    fn blank_input_is_rejected() {
        let message = validate_token("   ", &valid()).unwrap_err();
        assert_eq!(message, "type a command");
    }

    #[test]
    fn a_typo_gets_a_suggestion() {
        let message = validate_token("ext", &valid()).unwrap_err();
        assert!(message.contains("did you mean 'exit'?"));
    }

    #[test]
    fn unrelated_input_gets_no_suggestion() {
        let message = validate_token("zzz", &valid()).unwrap_err();
        assert_eq!(message, "unknown command 'zzz'");
    }
}
