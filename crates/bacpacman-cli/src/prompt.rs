//! Prompt abstraction over the interactive terminal
//!
//! The workflow logic talks to a small `Prompter` capability trait so it
//! can be driven by a scripted implementation in tests. `None` from any
//! method means the user cancelled; the flow terminates without side
//! effects.

use bacpacman_core::error::{BacpacError, BacpacResult};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};

pub trait Prompter {
    /// Single choice from a list; `None` when the user aborts.
    fn select(&self, prompt: &str, items: &[String]) -> BacpacResult<Option<usize>>;

    /// Free text; an empty answer counts as cancellation.
    fn input(&self, prompt: &str) -> BacpacResult<Option<String>>;

    /// Free text with an editable suggested default.
    fn input_with_default(&self, prompt: &str, default: &str) -> BacpacResult<Option<String>>;

    /// Hidden text for passwords.
    fn password(&self, prompt: &str) -> BacpacResult<Option<String>>;

    /// Yes/no confirmation; `None` when the user aborts.
    fn confirm(&self, prompt: &str, default: bool) -> BacpacResult<Option<bool>>;
}

/// `Prompter` backed by dialoguer on a real terminal.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_error(e: dialoguer::Error) -> BacpacError {
    BacpacError::prompt(e.to_string())
}

/// Maps empty text answers to cancellation.
fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Prompter for DialoguerPrompter {
    fn select(&self, prompt: &str, items: &[String]) -> BacpacResult<Option<usize>> {
        Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact_opt()
            .map_err(prompt_error)
    }

    fn input(&self, prompt: &str) -> BacpacResult<Option<String>> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map(non_empty)
            .map_err(prompt_error)
    }

    fn input_with_default(&self, prompt: &str, default: &str) -> BacpacResult<Option<String>> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()
            .map(non_empty)
            .map_err(prompt_error)
    }

    fn password(&self, prompt: &str) -> BacpacResult<Option<String>> {
        Password::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map(non_empty)
            .map_err(prompt_error)
    }

    fn confirm(&self, prompt: &str, default: bool) -> BacpacResult<Option<bool>> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt()
            .map_err(prompt_error)
    }
}
