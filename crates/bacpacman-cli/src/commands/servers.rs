//! `list-servers` and `list-databases` commands

use bacpacman_core::azure::{DiscoveryError, ResourceDiscovery};
use bacpacman_core::error::BacpacResult;
use bacpacman_core::settings::Settings;

use crate::console::CliConsole;
use crate::prompt::Prompter;

use super::value_or_prompt;

const SELECT_FIRST: &str = "Please select a subscription first using 'select-subscription'.";

pub async fn list_servers(
    discovery: &dyn ResourceDiscovery,
    console: &CliConsole,
    settings: &Settings,
) -> BacpacResult<()> {
    let Some(subscription_id) = settings.subscription_id.as_deref() else {
        console.warn(SELECT_FIRST);
        return Ok(());
    };

    let spinner = console.spinner("Fetching servers...");
    let result = discovery.list_servers(subscription_id).await;
    spinner.finish_and_clear();
    let servers = result?;

    if servers.is_empty() {
        console.warn("No SQL servers found in the selected subscription.");
        return Ok(());
    }
    console.plain("Available SQL servers:");
    for server in &servers {
        console.plain(&format!("- {}", server.name));
    }
    Ok(())
}

pub async fn list_databases(
    discovery: &dyn ResourceDiscovery,
    prompter: &dyn Prompter,
    console: &CliConsole,
    settings: &Settings,
    server_name: Option<String>,
) -> BacpacResult<()> {
    let Some(subscription_id) = settings.subscription_id.as_deref() else {
        console.warn(SELECT_FIRST);
        return Ok(());
    };
    let Some(server_name) = value_or_prompt(prompter, server_name, "Server Name")? else {
        return Ok(());
    };

    let spinner = console.spinner("Fetching databases...");
    let result = discovery.list_databases(subscription_id, &server_name).await;
    spinner.finish_and_clear();

    match result {
        Ok(databases) if databases.is_empty() => {
            console.warn("No databases found on the specified server.");
        }
        Ok(databases) => {
            console.plain("Available databases:");
            for database in &databases {
                console.plain(&format!("- {}", database.name));
            }
        }
        Err(DiscoveryError::NotFound(detail)) => {
            console.warn(&detail);
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
