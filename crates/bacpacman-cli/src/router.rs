//! Command routing logic for the CLI

use bacpacman_core::azure::AzureDiscovery;
use bacpacman_core::error::BacpacResult;
use bacpacman_core::secrets::KeyringStore;
use bacpacman_core::settings::Settings;
use bacpacman_core::sqlpackage::SqlPackage;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;
use crate::prompt::DialoguerPrompter;
use crate::workflow;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> BacpacResult<()> {
    let console = CliConsole::new();
    let prompter = DialoguerPrompter::new();
    let mut settings = Settings::load(&cli.env_file)?;

    match cli.command {
        None => {
            let discovery = AzureDiscovery::new();
            workflow::run_export_workflow(
                &discovery,
                &KeyringStore,
                &SqlPackage,
                &prompter,
                &console,
                &mut settings,
            )
            .await
        }
        Some(Commands::Login) => {
            let discovery = AzureDiscovery::new();
            commands::login::run(&discovery, &console).await
        }
        Some(Commands::SelectSubscription { subscription_id }) => {
            let discovery = AzureDiscovery::new();
            commands::subscription::run(
                &discovery,
                &prompter,
                &console,
                &mut settings,
                subscription_id,
            )
            .await
        }
        Some(Commands::ListServers) => {
            let discovery = AzureDiscovery::new();
            commands::servers::list_servers(&discovery, &console, &settings).await
        }
        Some(Commands::ListDatabases { server_name }) => {
            let discovery = AzureDiscovery::new();
            commands::servers::list_databases(
                &discovery,
                &prompter,
                &console,
                &settings,
                server_name,
            )
            .await
        }
        Some(Commands::ExtractBacpac {
            server_name,
            database_name,
            output_file,
        }) => {
            commands::export::run(
                &SqlPackage,
                &prompter,
                &console,
                server_name,
                database_name,
                output_file,
            )
            .await
        }
        Some(Commands::ImportBacpac {
            input_file,
            server_name,
            database_name,
        }) => {
            commands::import::run(
                &KeyringStore,
                &SqlPackage,
                &prompter,
                &console,
                input_file,
                server_name,
                database_name,
            )
            .await
        }
    }
}
