//! Persisted tool settings
//!
//! The only durable state is the selected subscription id, kept in a
//! `.env`-style key-value file. Settings are loaded once at startup and
//! passed into the commands that need them; nothing reads the process
//! environment ad hoc.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{BacpacError, BacpacResult};

/// Key under which the selected subscription id is stored.
pub const SUBSCRIPTION_ID_KEY: &str = "AZURE_SUBSCRIPTION_ID";

/// Default settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Subscription id persisted by `select-subscription` or the
    /// interactive workflow, if one was ever chosen.
    pub subscription_id: Option<String>,
    path: PathBuf,
}

impl Settings {
    /// Loads settings from a `.env`-style file. A missing file yields
    /// empty settings rather than an error.
    pub fn load(path: impl Into<PathBuf>) -> BacpacResult<Self> {
        let path = path.into();
        let mut subscription_id = None;
        match dotenvy::from_path_iter(&path) {
            Ok(entries) => {
                for entry in entries {
                    let (key, value) = entry.map_err(|e| BacpacError::config(e.to_string()))?;
                    if key == SUBSCRIPTION_ID_KEY && !value.is_empty() {
                        subscription_id = Some(value);
                    }
                }
            }
            Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(BacpacError::config(e.to_string())),
        }
        Ok(Self {
            subscription_id,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists the subscription id immediately, preserving unrelated
    /// keys already present in the file.
    pub fn set_subscription_id(&mut self, id: &str) -> BacpacResult<()> {
        let mut lines: Vec<String> = match fs::read_to_string(&self.path) {
            Ok(content) => content.lines().map(str::to_owned).collect(),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let prefix = format!("{SUBSCRIPTION_ID_KEY}=");
        let entry = format!("{prefix}{id}");
        match lines.iter_mut().find(|l| l.trim_start().starts_with(&prefix)) {
            Some(line) => *line = entry,
            None => lines.push(entry),
        }

        let mut content = lines.join("\n");
        content.push('\n');
        fs::write(&self.path, content)?;

        self.subscription_id = Some(id.to_owned());
        Ok(())
    }
}
