//! Interactive workflows
//!
//! End-to-end orchestration for the export and import paths: prompts,
//! Azure discovery with manual-entry fallback, credential resolution
//! through the secret store and the final sqlpackage hand-off. All
//! collaborators come in through trait seams so the flows are testable
//! with scripted implementations.

use std::path::Path;

use bacpacman_core::azure::{DiscoveryError, ResourceDiscovery, Subscription};
use bacpacman_core::error::{BacpacError, BacpacResult};
use bacpacman_core::secrets::SecretStore;
use bacpacman_core::settings::Settings;
use bacpacman_core::sqlpackage::{
    BacpacOperation, BacpacRunner, Credential, ExportAuth, ImportAuth,
};

use crate::console::CliConsole;
use crate::prompt::Prompter;

enum AuthMethod {
    AzureActiveDirectory,
    SqlServerAuth,
}

/// Full interactive export workflow: authenticate, discover, select,
/// confirm, extract.
pub async fn run_export_workflow(
    discovery: &dyn ResourceDiscovery,
    secrets: &dyn SecretStore,
    runner: &dyn BacpacRunner,
    prompter: &dyn Prompter,
    console: &CliConsole,
    settings: &mut Settings,
) -> BacpacResult<()> {
    console.print_header("BacPacman export workflow");

    let auth_items = vec![
        "Azure Active Directory".to_string(),
        "SQL Server Authentication".to_string(),
    ];
    let auth_method = match prompter.select(
        "How would you like to authenticate to the database?",
        &auth_items,
    )? {
        Some(0) => AuthMethod::AzureActiveDirectory,
        Some(_) => AuthMethod::SqlServerAuth,
        None => return Ok(()),
    };

    let Some((server_name, database_name)) =
        discover_target(discovery, prompter, console, settings).await?
    else {
        return Ok(());
    };

    let username = match auth_method {
        AuthMethod::AzureActiveDirectory => None,
        AuthMethod::SqlServerAuth => {
            match prompter.input(&format!(
                "Enter your SQL Server username for '{server_name}'"
            ))? {
                Some(username) => Some(username),
                None => return Ok(()),
            }
        }
    };

    let output_file = format!("{database_name}.bacpac");
    console.plain("");
    console.plain("Summary:");
    console.plain(&format!("  Server:      {server_name}"));
    console.plain(&format!("  Database:    {database_name}"));
    console.plain(&format!("  Output file: {output_file}"));
    match prompter.confirm("Proceed with the extraction?", true)? {
        Some(true) => {}
        _ => {
            console.warn("Extraction cancelled.");
            return Ok(());
        }
    }

    let auth = match username {
        None => ExportAuth::AzureActiveDirectory,
        Some(username) => {
            match resolve_sql_credential(secrets, prompter, console, &server_name, &username)? {
                Some(credential) => ExportAuth::Sql(credential),
                None => return Ok(()),
            }
        }
    };

    let operation = BacpacOperation::export(&server_name, &database_name, &output_file, auth);
    execute(runner, console, &operation).await
}

/// Interactive import workflow: discover local `.bacpac` files, pick a
/// target database name, confirm and import.
pub async fn run_import_workflow(
    secrets: &dyn SecretStore,
    runner: &dyn BacpacRunner,
    prompter: &dyn Prompter,
    console: &CliConsole,
    search_dir: &Path,
    server_override: Option<&str>,
) -> BacpacResult<()> {
    console.print_header("BacPacman import workflow");

    let files = bacpac_files_in(search_dir)?;
    if files.is_empty() {
        console.error("No .bacpac files found in the current directory.");
        return Ok(());
    }
    let input_file = if files.len() == 1 {
        console.success(&format!(
            "Found '{}'. Using this file for the import.",
            files[0]
        ));
        files[0].clone()
    } else {
        let Some(index) =
            prompter.select("Multiple .bacpac files found. Please select one:", &files)?
        else {
            return Ok(());
        };
        files[index].clone()
    };

    let suggested_name = Path::new(&input_file)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let Some(database_name) =
        prompter.input_with_default("Enter the target database name", &suggested_name)?
    else {
        return Ok(());
    };

    let server_name = server_override.unwrap_or("localhost");

    console.plain("");
    console.plain("Summary:");
    console.plain(&format!("  BACPAC file:     {input_file}"));
    console.plain(&format!("  Target server:   {server_name}"));
    console.plain(&format!("  Target database: {database_name}"));
    console.warn(
        "If a database with this name already exists on the target server, \
         it may be overwritten.",
    );
    match prompter.confirm("Proceed with the import?", false)? {
        Some(true) => {}
        _ => {
            console.warn("Import cancelled.");
            return Ok(());
        }
    }

    let auth_items = vec![
        "Windows Authentication (default)".to_string(),
        "SQL Server Authentication".to_string(),
    ];
    let auth = match prompter.select(
        &format!("How would you like to authenticate to the local server '{server_name}'?"),
        &auth_items,
    )? {
        Some(0) => ImportAuth::Integrated,
        Some(_) => {
            let Some(username) = prompter.input(&format!(
                "Enter your SQL Server username for '{server_name}'"
            ))?
            else {
                return Ok(());
            };
            match resolve_sql_credential(secrets, prompter, console, server_name, &username)? {
                Some(credential) => ImportAuth::Sql(credential),
                None => return Ok(()),
            }
        }
        None => return Ok(()),
    };

    let operation = BacpacOperation::import(&input_file, server_name, &database_name, auth);
    execute(runner, console, &operation).await
}

/// Runs an operation and reports the outcome. Tool failures are
/// reported with remediation text rather than propagated; a missing
/// executable and a non-zero exit get different messages.
pub async fn execute(
    runner: &dyn BacpacRunner,
    console: &CliConsole,
    operation: &BacpacOperation,
) -> BacpacResult<()> {
    console.info(&operation.start_message());
    match runner.run(operation).await {
        Ok(stdout) => {
            console.success(&operation.success_message());
            if !stdout.trim().is_empty() {
                console.plain(stdout.trim_end());
            }
            Ok(())
        }
        Err(BacpacError::ToolMissing { tool }) => {
            console.error(&format!("'{tool}' command not found."));
            console.plain(
                "Please ensure the sqlpackage utility is installed and in your system's PATH.",
            );
            Ok(())
        }
        Err(BacpacError::ToolFailed { tool, stderr }) => {
            console.error(&format!("The '{tool}' command failed."));
            console.plain("--- sqlpackage error output ---");
            console.plain(stderr.trim_end());
            console.plain("-------------------------------");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Azure discovery chain with manual-entry fallback. Auth failures and
/// unreachable endpoints degrade to free-text server/database prompts;
/// everything else propagates.
async fn discover_target(
    discovery: &dyn ResourceDiscovery,
    prompter: &dyn Prompter,
    console: &CliConsole,
    settings: &mut Settings,
) -> BacpacResult<Option<(String, String)>> {
    match discover_from_azure(discovery, prompter, console, settings).await {
        Ok(selection) => Ok(selection),
        Err(BacpacError::Discovery(
            e @ (DiscoveryError::AuthFailed(_) | DiscoveryError::Unavailable(_)),
        )) => {
            console.warn(&format!(
                "Could not connect to Azure to discover resources: {e}"
            ));
            console.warn(
                "This can happen due to network issues or if you are not logged in \
                 with 'az login'.",
            );
            console.warn("Falling back to manual entry.");
            manual_entry(prompter)
        }
        Err(e) => Err(e),
    }
}

async fn discover_from_azure(
    discovery: &dyn ResourceDiscovery,
    prompter: &dyn Prompter,
    console: &CliConsole,
    settings: &mut Settings,
) -> BacpacResult<Option<(String, String)>> {
    let spinner = console.spinner("Fetching subscriptions...");
    let result = discovery.list_subscriptions().await;
    spinner.finish_and_clear();
    let subscriptions = result?;
    // An empty list is access trouble, not an auth failure; falling back
    // to manual entry would not help here.
    if subscriptions.is_empty() {
        console.warn("No subscriptions are visible to the current identity.");
        return Ok(None);
    }
    let labels: Vec<String> = subscriptions.iter().map(Subscription::label).collect();
    let Some(index) = prompter.select("Select your Azure subscription:", &labels)? else {
        return Ok(None);
    };
    let subscription_id = subscriptions[index].subscription_id.clone();
    settings.set_subscription_id(&subscription_id)?;
    console.info(&format!("Selected subscription: {subscription_id}"));

    let spinner = console.spinner("Fetching servers...");
    let result = discovery.list_servers(&subscription_id).await;
    spinner.finish_and_clear();
    let servers = result?;
    if servers.is_empty() {
        console.warn("No SQL servers found in the selected subscription.");
        return Ok(None);
    }
    let names: Vec<String> = servers.iter().map(|s| s.name.clone()).collect();
    let Some(index) = prompter.select("Select the SQL server:", &names)? else {
        return Ok(None);
    };
    let server_name = servers[index].name.clone();

    let spinner = console.spinner("Fetching databases...");
    let result = discovery.list_databases(&subscription_id, &server_name).await;
    spinner.finish_and_clear();
    let databases = match result {
        Ok(databases) => databases,
        // The selected server disappeared between listings, or its
        // resource id is malformed. Not worth a manual fallback.
        Err(DiscoveryError::NotFound(detail)) => {
            console.warn(&detail);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };
    if databases.is_empty() {
        console.warn("No databases found on the specified server.");
        return Ok(None);
    }
    let names: Vec<String> = databases.iter().map(|db| db.name.clone()).collect();
    let Some(index) = prompter.select("Select the database:", &names)? else {
        return Ok(None);
    };
    Ok(Some((server_name, databases[index].name.clone())))
}

fn manual_entry(prompter: &dyn Prompter) -> BacpacResult<Option<(String, String)>> {
    let Some(server) = prompter.input("Enter the server name")? else {
        return Ok(None);
    };
    let Some(database) = prompter.input("Enter the database name")? else {
        return Ok(None);
    };
    Ok(Some((server, database)))
}

/// Resolves a SQL password: secret-store hit means no prompt at all; a
/// miss means one hidden prompt, with the answer cached for later runs.
/// Returns `Ok(None)` when the user cancels or no keyring backend is
/// installed (after printing remediation).
fn resolve_sql_credential(
    secrets: &dyn SecretStore,
    prompter: &dyn Prompter,
    console: &CliConsole,
    server: &str,
    username: &str,
) -> BacpacResult<Option<Credential>> {
    let cached = match secrets.get(server, username) {
        Ok(cached) => cached,
        Err(BacpacError::SecretBackendUnavailable(detail)) => {
            tracing::debug!(%detail, "secret store backend unavailable");
            console.error(
                "No secret-store backend found. Please install a backend for your OS \
                 (e.g. 'gnome-keyring' or another Secret Service provider on Linux).",
            );
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    let password = match cached {
        Some(password) => password,
        None => {
            let Some(password) =
                prompter.password(&format!("Enter password for {username} on {server}"))?
            else {
                return Ok(None);
            };
            if let Err(e) = secrets.set(server, username, &password) {
                tracing::warn!(error = %e, "could not cache the password in the secret store");
            }
            password
        }
    };

    Ok(Some(Credential {
        username: username.to_string(),
        password,
    }))
}

fn bacpac_files_in(dir: &Path) -> BacpacResult<Vec<String>> {
    let pattern = dir.join("*.bacpac");
    let mut files: Vec<String> = glob::glob(&pattern.to_string_lossy())
        .map_err(|e| BacpacError::other(e.to_string()))?
        .filter_map(Result::ok)
        .map(|path| path.display().to_string())
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bacpacman_core::azure::{Database, Server};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct ScriptedPrompter {
        selections: Mutex<VecDeque<Option<usize>>>,
        inputs: Mutex<VecDeque<Option<String>>>,
        passwords: Mutex<VecDeque<Option<String>>>,
        confirms: Mutex<VecDeque<Option<bool>>>,
        password_prompts: Mutex<usize>,
    }

    impl ScriptedPrompter {
        fn with_selections(selections: &[Option<usize>]) -> Self {
            let prompter = Self::default();
            *prompter.selections.lock().unwrap() = selections.iter().copied().collect();
            prompter
        }

        fn inputs(self, inputs: &[Option<&str>]) -> Self {
            *self.inputs.lock().unwrap() = inputs
                .iter()
                .map(|i| i.map(str::to_string))
                .collect();
            self
        }

        fn passwords(self, passwords: &[Option<&str>]) -> Self {
            *self.passwords.lock().unwrap() = passwords
                .iter()
                .map(|p| p.map(str::to_string))
                .collect();
            self
        }

        fn confirms(self, confirms: &[Option<bool>]) -> Self {
            *self.confirms.lock().unwrap() = confirms.iter().copied().collect();
            self
        }

        fn password_prompt_count(&self) -> usize {
            *self.password_prompts.lock().unwrap()
        }
    }

    impl Prompter for ScriptedPrompter {
        fn select(&self, prompt: &str, _items: &[String]) -> BacpacResult<Option<usize>> {
            Ok(self
                .selections
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected select prompt: {prompt}")))
        }

        fn input(&self, prompt: &str) -> BacpacResult<Option<String>> {
            Ok(self
                .inputs
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected input prompt: {prompt}")))
        }

        fn input_with_default(&self, prompt: &str, _default: &str) -> BacpacResult<Option<String>> {
            self.input(prompt)
        }

        fn password(&self, prompt: &str) -> BacpacResult<Option<String>> {
            *self.password_prompts.lock().unwrap() += 1;
            Ok(self
                .passwords
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected password prompt: {prompt}")))
        }

        fn confirm(&self, prompt: &str, _default: bool) -> BacpacResult<Option<bool>> {
            Ok(self
                .confirms
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("unexpected confirm prompt: {prompt}")))
        }
    }

    #[derive(Default)]
    struct FakeDiscovery {
        auth_fail: bool,
        databases_missing: bool,
        subscriptions: Vec<Subscription>,
        servers: Vec<Server>,
        databases: Vec<Database>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FakeDiscovery {
        fn one_of_each() -> Self {
            Self {
                subscriptions: vec![Subscription {
                    subscription_id: "sub-1".to_string(),
                    display_name: Some("Dev".to_string()),
                }],
                servers: vec![Server {
                    name: "srv1".to_string(),
                    id: "/subscriptions/sub-1/resourceGroups/rg1/providers/Microsoft.Sql/servers/srv1"
                        .to_string(),
                }],
                databases: vec![Database {
                    name: "db1".to_string(),
                }],
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResourceDiscovery for FakeDiscovery {
        async fn list_subscriptions(&self) -> Result<Vec<Subscription>, DiscoveryError> {
            self.calls.lock().unwrap().push("subscriptions");
            if self.auth_fail {
                return Err(DiscoveryError::AuthFailed("token expired".to_string()));
            }
            Ok(self.subscriptions.clone())
        }

        async fn list_servers(&self, _subscription_id: &str) -> Result<Vec<Server>, DiscoveryError> {
            self.calls.lock().unwrap().push("servers");
            Ok(self.servers.clone())
        }

        async fn list_databases(
            &self,
            _subscription_id: &str,
            server_name: &str,
        ) -> Result<Vec<Database>, DiscoveryError> {
            self.calls.lock().unwrap().push("databases");
            if self.databases_missing {
                return Err(DiscoveryError::NotFound(format!(
                    "no SQL server named '{server_name}'"
                )));
            }
            Ok(self.databases.clone())
        }
    }

    #[derive(Default)]
    struct RecordingRunner {
        operations: Mutex<Vec<BacpacOperation>>,
    }

    impl RecordingRunner {
        fn recorded(&self) -> Vec<BacpacOperation> {
            self.operations.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BacpacRunner for RecordingRunner {
        async fn run(&self, operation: &BacpacOperation) -> BacpacResult<String> {
            self.operations.lock().unwrap().push(operation.clone());
            Ok(String::new())
        }
    }

    #[derive(Default)]
    struct MemorySecretStore {
        entries: Mutex<HashMap<(String, String), String>>,
    }

    impl MemorySecretStore {
        fn preloaded(server: &str, user: &str, password: &str) -> Self {
            let store = Self::default();
            store.set(server, user, password).unwrap();
            store
        }
    }

    impl SecretStore for MemorySecretStore {
        fn get(&self, server: &str, user: &str) -> BacpacResult<Option<String>> {
            Ok(self
                .entries
                .lock()
                .unwrap()
                .get(&(server.to_string(), user.to_string()))
                .cloned())
        }

        fn set(&self, server: &str, user: &str, password: &str) -> BacpacResult<()> {
            self.entries
                .lock()
                .unwrap()
                .insert((server.to_string(), user.to_string()), password.to_string());
            Ok(())
        }
    }

    struct UnavailableSecretStore;

    impl SecretStore for UnavailableSecretStore {
        fn get(&self, _server: &str, _user: &str) -> BacpacResult<Option<String>> {
            Err(BacpacError::SecretBackendUnavailable(
                "no backend".to_string(),
            ))
        }

        fn set(&self, _server: &str, _user: &str, _password: &str) -> BacpacResult<()> {
            Err(BacpacError::SecretBackendUnavailable(
                "no backend".to_string(),
            ))
        }
    }

    fn test_settings(dir: &TempDir) -> Settings {
        Settings::load(dir.path().join(".env")).unwrap()
    }

    #[tokio::test]
    async fn aad_export_flow_builds_expected_invocation() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery::one_of_each();
        let runner = RecordingRunner::default();
        // auth method, subscription, server, database
        let prompter =
            ScriptedPrompter::with_selections(&[Some(0), Some(0), Some(0), Some(0)])
                .confirms(&[Some(true)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        let recorded = runner.recorded();
        assert_eq!(recorded.len(), 1);
        assert_eq!(
            recorded[0].args(),
            vec![
                "/Action:Export",
                "/SourceServerName:tcp:srv1.database.windows.net",
                "/SourceDatabaseName:db1",
                "/p:VerifyExtraction=False",
                "/ua:True",
                "/TargetFile:db1.bacpac",
            ]
        );
        assert_eq!(settings.subscription_id.as_deref(), Some("sub-1"));
    }

    #[tokio::test]
    async fn declining_confirmation_runs_nothing() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery::one_of_each();
        let runner = RecordingRunner::default();
        let prompter =
            ScriptedPrompter::with_selections(&[Some(0), Some(0), Some(0), Some(0)])
                .confirms(&[Some(false)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        assert!(runner.recorded().is_empty());
        // The subscription id was already persisted before the decline.
        assert_eq!(settings.subscription_id.as_deref(), Some("sub-1"));
    }

    #[tokio::test]
    async fn auth_failure_falls_back_to_manual_entry() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery {
            auth_fail: true,
            ..FakeDiscovery::default()
        };
        let runner = RecordingRunner::default();
        let prompter = ScriptedPrompter::with_selections(&[Some(0)])
            .inputs(&[Some("manual-srv"), Some("manual-db")])
            .confirms(&[Some(true)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        // Server and database listings must never be attempted.
        assert_eq!(discovery.calls(), vec!["subscriptions"]);
        let recorded = runner.recorded();
        assert_eq!(recorded.len(), 1);
        assert!(
            recorded[0]
                .args()
                .contains(&"/SourceServerName:tcp:manual-srv.database.windows.net".to_string())
        );
        assert!(settings.subscription_id.is_none());
    }

    #[tokio::test]
    async fn cancelled_selection_terminates_without_invocation() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery::one_of_each();
        let runner = RecordingRunner::default();
        // Cancel at the subscription prompt.
        let prompter = ScriptedPrompter::with_selections(&[Some(0), None]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        assert!(runner.recorded().is_empty());
        assert!(settings.subscription_id.is_none());
    }

    #[tokio::test]
    async fn empty_server_list_terminates_without_invocation() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery {
            servers: vec![],
            ..FakeDiscovery::one_of_each()
        };
        let runner = RecordingRunner::default();
        // auth method, subscription; no server prompt should follow
        let prompter = ScriptedPrompter::with_selections(&[Some(0), Some(0)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        assert!(runner.recorded().is_empty());
    }

    #[tokio::test]
    async fn empty_database_list_terminates_without_invocation() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery {
            databases: vec![],
            ..FakeDiscovery::one_of_each()
        };
        let runner = RecordingRunner::default();
        let prompter = ScriptedPrompter::with_selections(&[Some(0), Some(0), Some(0)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        assert!(runner.recorded().is_empty());
    }

    #[tokio::test]
    async fn missing_server_terminates_without_invocation() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery {
            databases_missing: true,
            ..FakeDiscovery::one_of_each()
        };
        let runner = RecordingRunner::default();
        let prompter = ScriptedPrompter::with_selections(&[Some(0), Some(0), Some(0)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        assert!(runner.recorded().is_empty());
    }

    #[tokio::test]
    async fn secret_store_hit_skips_password_prompt() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery::one_of_each();
        let runner = RecordingRunner::default();
        let secrets = MemorySecretStore::preloaded("srv1", "sa", "cached-pw");
        let prompter =
            ScriptedPrompter::with_selections(&[Some(1), Some(0), Some(0), Some(0)])
                .inputs(&[Some("sa")])
                .confirms(&[Some(true)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &secrets,
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        assert_eq!(prompter.password_prompt_count(), 0);
        let recorded = runner.recorded();
        assert_eq!(recorded.len(), 1);
        assert!(
            recorded[0]
                .args()
                .contains(&"/SourcePassword:cached-pw".to_string())
        );
    }

    #[tokio::test]
    async fn secret_store_miss_prompts_once_and_caches() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery::one_of_each();
        let runner = RecordingRunner::default();
        let secrets = MemorySecretStore::default();
        let prompter =
            ScriptedPrompter::with_selections(&[Some(1), Some(0), Some(0), Some(0)])
                .inputs(&[Some("sa")])
                .passwords(&[Some("prompted-pw")])
                .confirms(&[Some(true)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &secrets,
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        assert_eq!(prompter.password_prompt_count(), 1);
        assert_eq!(
            secrets.get("srv1", "sa").unwrap().as_deref(),
            Some("prompted-pw")
        );
        assert!(
            runner.recorded()[0]
                .args()
                .contains(&"/SourcePassword:prompted-pw".to_string())
        );
    }

    #[tokio::test]
    async fn missing_keyring_backend_aborts_credential_step() {
        let dir = TempDir::new().unwrap();
        let discovery = FakeDiscovery::one_of_each();
        let runner = RecordingRunner::default();
        let prompter =
            ScriptedPrompter::with_selections(&[Some(1), Some(0), Some(0), Some(0)])
                .inputs(&[Some("sa")])
                .confirms(&[Some(true)]);
        let mut settings = test_settings(&dir);

        run_export_workflow(
            &discovery,
            &UnavailableSecretStore,
            &runner,
            &prompter,
            &CliConsole::new(),
            &mut settings,
        )
        .await
        .unwrap();

        assert!(runner.recorded().is_empty());
    }

    #[tokio::test]
    async fn import_flow_with_single_file_uses_it() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("db1.bacpac"), b"stub").unwrap();
        let runner = RecordingRunner::default();
        // local auth: Windows integrated
        let prompter = ScriptedPrompter::with_selections(&[Some(0)])
            .inputs(&[Some("db1")])
            .confirms(&[Some(true)]);

        run_import_workflow(
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            dir.path(),
            None,
        )
        .await
        .unwrap();

        let recorded = runner.recorded();
        assert_eq!(recorded.len(), 1);
        let args = recorded[0].args();
        assert_eq!(args[0], "/Action:Import");
        assert!(args.contains(&"/TargetServerName:localhost".to_string()));
        assert!(args.contains(&"/TargetDatabaseName:db1".to_string()));
    }

    #[tokio::test]
    async fn import_flow_declined_confirmation_runs_nothing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("db1.bacpac"), b"stub").unwrap();
        let runner = RecordingRunner::default();
        let prompter = ScriptedPrompter::default()
            .inputs(&[Some("db1")])
            .confirms(&[Some(false)]);

        run_import_workflow(
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            dir.path(),
            None,
        )
        .await
        .unwrap();

        assert!(runner.recorded().is_empty());
    }

    #[tokio::test]
    async fn import_flow_without_files_terminates() {
        let dir = TempDir::new().unwrap();
        let runner = RecordingRunner::default();
        let prompter = ScriptedPrompter::default();

        run_import_workflow(
            &MemorySecretStore::default(),
            &runner,
            &prompter,
            &CliConsole::new(),
            dir.path(),
            None,
        )
        .await
        .unwrap();

        assert!(runner.recorded().is_empty());
    }
}
