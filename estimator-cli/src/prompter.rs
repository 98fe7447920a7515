//! Terminal input for the wizard.
//!
//! The driver talks to a [`Prompter`] rather than to the terminal directly
//! so the whole flow can be scripted in tests.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

pub trait Prompter {
    /// Picks one of `items`. `None` when the user pressed Esc.
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>>;

    /// Free text, pre-filled with `initial`. May return an empty string.
    fn input(
        &mut self,
        prompt: &str,
        initial: &str,
    ) -> Result<String>;

    /// Prints a block of output.
    fn show(
        &mut self,
        text: &str,
    );
}

/// [`Prompter`] over dialoguer, printing to stdout.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(
        &mut self,
        prompt: &str,
        items: &[String],
        default: usize,
    ) -> Result<Option<usize>> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default.min(items.len().saturating_sub(1)))
            .interact_opt()?;
        Ok(choice)
    }

    fn input(
        &mut self,
        prompt: &str,
        initial: &str,
    ) -> Result<String> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }

    fn show(
        &mut self,
        text: &str,
    ) {
        println!("{text}");
    }
}
