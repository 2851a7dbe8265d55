//! bacpacman core library
//!
//! Azure SQL resource discovery, credential caching and `sqlpackage`
//! invocation for the bacpacman CLI.

pub mod azure;
pub mod error;
pub mod secrets;
pub mod settings;
pub mod sqlpackage;

// Re-export commonly used types
pub use azure::{AzureDiscovery, Database, DiscoveryError, ResourceDiscovery, Server, Subscription};
pub use error::{BacpacError, BacpacResult};
pub use secrets::{KeyringStore, SecretStore};
pub use settings::Settings;
pub use sqlpackage::{
    BacpacOperation, BacpacRunner, Credential, ExportAuth, ImportAuth, SqlPackage,
};
