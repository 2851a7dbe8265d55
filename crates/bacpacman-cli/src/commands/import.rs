//! `import-bacpac` command
//!
//! Runs non-interactively only when both the input file and the target
//! database name are supplied; otherwise it drops into the interactive
//! import workflow, carrying along any server-name override.

use std::path::Path;

use bacpacman_core::error::BacpacResult;
use bacpacman_core::secrets::SecretStore;
use bacpacman_core::sqlpackage::{BacpacOperation, BacpacRunner, ImportAuth};

use crate::console::CliConsole;
use crate::prompt::Prompter;
use crate::workflow;

pub async fn run(
    secrets: &dyn SecretStore,
    runner: &dyn BacpacRunner,
    prompter: &dyn Prompter,
    console: &CliConsole,
    input_file: Option<String>,
    server_name: Option<String>,
    database_name: Option<String>,
) -> BacpacResult<()> {
    match (input_file, database_name) {
        (Some(input_file), Some(database_name)) => {
            let server = server_name.unwrap_or_else(|| "localhost".to_string());
            let operation = BacpacOperation::import(
                &input_file,
                &server,
                &database_name,
                ImportAuth::Integrated,
            );
            workflow::execute(runner, console, &operation).await
        }
        _ => {
            workflow::run_import_workflow(
                secrets,
                runner,
                prompter,
                console,
                Path::new("."),
                server_name.as_deref(),
            )
            .await
        }
    }
}
