//! Error types shared across the bacpacman crates

use crate::azure::DiscoveryError;
use thiserror::Error;

/// Result type alias for bacpacman operations
pub type BacpacResult<T> = Result<T, BacpacError>;

/// Main error type for bacpacman
#[derive(Error, Debug)]
pub enum BacpacError {
    /// Azure resource discovery errors (auth, transient, not-found)
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// No secret-store backend is installed on this host
    #[error("no secret-store backend is available: {0}")]
    SecretBackendUnavailable(String),

    /// Secret store read/write failures other than a missing backend
    #[error("secret store error: {0}")]
    Secret(String),

    /// The external tool is not installed or not on PATH
    #[error("'{tool}' is not installed or not on your PATH")]
    ToolMissing { tool: String },

    /// The external tool launched but exited with a non-zero status
    #[error("the '{tool}' command failed")]
    ToolFailed { tool: String, stderr: String },

    /// Configuration file errors
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal prompt errors (not user cancellation)
    #[error("prompt error: {0}")]
    Prompt(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl BacpacError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new secret store error
    pub fn secret(message: impl Into<String>) -> Self {
        Self::Secret(message.into())
    }

    /// Create a new prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }

    /// Create a new generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    pub fn tool_missing(tool: impl Into<String>) -> Self {
        Self::ToolMissing { tool: tool.into() }
    }

    pub fn tool_failed(tool: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            stderr: stderr.into(),
        }
    }
}
