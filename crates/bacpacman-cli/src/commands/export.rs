//! `extract-bacpac` command: flag-driven export, Azure AD auth

use bacpacman_core::error::BacpacResult;
use bacpacman_core::sqlpackage::{BacpacOperation, BacpacRunner, ExportAuth};

use crate::console::CliConsole;
use crate::prompt::Prompter;
use crate::workflow;

use super::value_or_prompt;

pub async fn run(
    runner: &dyn BacpacRunner,
    prompter: &dyn Prompter,
    console: &CliConsole,
    server_name: Option<String>,
    database_name: Option<String>,
    output_file: String,
) -> BacpacResult<()> {
    let Some(server_name) = value_or_prompt(prompter, server_name, "Server Name")? else {
        return Ok(());
    };
    let Some(database_name) = value_or_prompt(prompter, database_name, "Database Name")? else {
        return Ok(());
    };

    // The flag-driven surface always authenticates with Azure AD; SQL
    // auth goes through the interactive workflow.
    let operation = BacpacOperation::export(
        &server_name,
        &database_name,
        &output_file,
        ExportAuth::AzureActiveDirectory,
    );
    workflow::execute(runner, console, &operation).await
}
