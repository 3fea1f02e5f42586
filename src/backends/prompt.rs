//! Interactive prompts
//!
//! Flows talk to the terminal through the `Prompter` trait so they can be
//! driven by a scripted fake in tests.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect};

use crate::core::error::InspectError;

/// Blocking selection and confirmation
pub trait Prompter {
    /// Let the user tick any number of `choices`; returns the chosen indices
    fn select_many(&mut self, prompt: &str, choices: &[String]) -> Result<Vec<usize>>;

    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;
}

/// Prompter backed by the real terminal
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Prompter for TerminalPrompter {
    fn select_many(&mut self, prompt: &str, choices: &[String]) -> Result<Vec<usize>> {
        let chosen = MultiSelect::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(choices)
            .interact()
            .map_err(|e| InspectError::Prompt(e.to_string()))?;
        Ok(chosen)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()
            .map_err(|e| InspectError::Prompt(e.to_string()))?;
        Ok(answer)
    }
}
