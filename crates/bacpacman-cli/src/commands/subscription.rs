//! `select-subscription` command

use bacpacman_core::azure::{ResourceDiscovery, Subscription};
use bacpacman_core::error::BacpacResult;
use bacpacman_core::settings::Settings;

use crate::console::CliConsole;
use crate::prompt::Prompter;

pub async fn run(
    discovery: &dyn ResourceDiscovery,
    prompter: &dyn Prompter,
    console: &CliConsole,
    settings: &mut Settings,
    subscription_id: Option<String>,
) -> BacpacResult<()> {
    let chosen = match subscription_id {
        Some(id) => id,
        None => {
            let spinner = console.spinner("Fetching subscriptions...");
            let result = discovery.list_subscriptions().await;
            spinner.finish_and_clear();
            let subscriptions = result?;
            if subscriptions.is_empty() {
                console.warn("No subscriptions are visible to the current identity.");
                return Ok(());
            }
            let labels: Vec<String> = subscriptions.iter().map(Subscription::label).collect();
            let Some(index) = prompter.select("Select your Azure subscription:", &labels)? else {
                return Ok(());
            };
            subscriptions[index].subscription_id.clone()
        }
    };

    settings.set_subscription_id(&chosen)?;
    console.success(&format!("Selected subscription: {chosen}"));
    Ok(())
}
