//! `login` command: verify the ambient Azure credential

use bacpacman_core::azure::{DiscoveryError, ResourceDiscovery};
use bacpacman_core::error::BacpacResult;

use crate::console::CliConsole;

pub async fn run(discovery: &dyn ResourceDiscovery, console: &CliConsole) -> BacpacResult<()> {
    let spinner = console.spinner("Checking Azure credentials...");
    let result = discovery.list_subscriptions().await;
    spinner.finish_and_clear();

    match result {
        Ok(subscriptions) if subscriptions.is_empty() => {
            console.warn(
                "Authentication succeeded, but no subscriptions are visible to this \
                 identity. Please ensure you have access to at least one.",
            );
            Ok(())
        }
        Ok(subscriptions) => {
            console.success("Authentication successful. Available subscriptions:");
            for subscription in &subscriptions {
                console.plain(&format!("- {}", subscription.label()));
            }
            Ok(())
        }
        Err(DiscoveryError::AuthFailed(detail)) => {
            tracing::debug!(%detail, "authentication failed");
            console.error(
                "Authentication failed. Your Azure credentials may have expired or are invalid.",
            );
            console.plain(
                "Please run 'az login --scope https://management.azure.com/.default' \
                 to authenticate.",
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
