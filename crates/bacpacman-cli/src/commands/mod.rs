//! Flag-driven command handlers

pub mod export;
pub mod import;
pub mod login;
pub mod servers;
pub mod subscription;

use bacpacman_core::error::BacpacResult;

use crate::prompt::Prompter;

/// Uses the flag value when given, otherwise falls back to a prompt.
/// `Ok(None)` means the user cancelled.
pub(crate) fn value_or_prompt(
    prompter: &dyn Prompter,
    value: Option<String>,
    prompt: &str,
) -> BacpacResult<Option<String>> {
    match value {
        Some(value) => Ok(Some(value)),
        None => prompter.input(prompt),
    }
}
