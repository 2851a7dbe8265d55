//! SQL credential caching in the platform secret vault
//!
//! Passwords are keyed by (server name, username). A host without any
//! keyring backend surfaces `SecretBackendUnavailable` so the caller can
//! print remediation instructions instead of crashing.

use crate::error::{BacpacError, BacpacResult};

/// Password storage keyed by (server, user).
pub trait SecretStore: Send + Sync {
    /// Looks up a cached password. Absent entries are `Ok(None)`.
    fn get(&self, server: &str, user: &str) -> BacpacResult<Option<String>>;

    /// Caches a password for later runs.
    fn set(&self, server: &str, user: &str, password: &str) -> BacpacResult<()>;
}

/// `SecretStore` backed by the OS keyring.
pub struct KeyringStore;

impl KeyringStore {
    fn entry(server: &str, user: &str) -> BacpacResult<keyring::Entry> {
        keyring::Entry::new(server, user).map_err(map_keyring_error)
    }
}

impl SecretStore for KeyringStore {
    fn get(&self, server: &str, user: &str) -> BacpacResult<Option<String>> {
        match Self::entry(server, user)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    fn set(&self, server: &str, user: &str, password: &str) -> BacpacResult<()> {
        Self::entry(server, user)?
            .set_password(password)
            .map_err(map_keyring_error)
    }
}

fn map_keyring_error(error: keyring::Error) -> BacpacError {
    match error {
        keyring::Error::NoStorageAccess(e) => BacpacError::SecretBackendUnavailable(e.to_string()),
        keyring::Error::PlatformFailure(e) => BacpacError::SecretBackendUnavailable(e.to_string()),
        e => BacpacError::secret(e.to_string()),
    }
}
