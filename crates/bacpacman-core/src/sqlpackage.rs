//! External `sqlpackage` invocation
//!
//! Builds the argument vector for an export or import and runs the tool
//! as a child process, capturing output in full. One attempt per
//! operation, no timeout; a missing executable and a non-zero exit are
//! distinct failures because they need different remediation.

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{BacpacError, BacpacResult};

/// Name of the external tool on PATH.
pub const SQLPACKAGE: &str = "sqlpackage";

/// A SQL-auth username/password pair, resolved from the secret store or
/// a hidden prompt just before invocation.
#[derive(Debug, Clone)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

/// Authentication for an export against an Azure SQL server.
#[derive(Debug, Clone)]
pub enum ExportAuth {
    AzureActiveDirectory,
    Sql(Credential),
}

/// Authentication for an import against a local SQL server.
#[derive(Debug, Clone)]
pub enum ImportAuth {
    /// Windows integrated auth, sqlpackage's default.
    Integrated,
    Sql(Credential),
}

/// One export or import, constructed per invocation and consumed by the
/// runner.
#[derive(Debug, Clone)]
pub enum BacpacOperation {
    Export {
        server: String,
        database: String,
        output_file: String,
        auth: ExportAuth,
    },
    Import {
        input_file: String,
        server: String,
        database: String,
        auth: ImportAuth,
    },
}

impl BacpacOperation {
    pub fn export(
        server: impl Into<String>,
        database: impl Into<String>,
        output_file: impl Into<String>,
        auth: ExportAuth,
    ) -> Self {
        Self::Export {
            server: server.into(),
            database: database.into(),
            output_file: output_file.into(),
            auth,
        }
    }

    pub fn import(
        input_file: impl Into<String>,
        server: impl Into<String>,
        database: impl Into<String>,
        auth: ImportAuth,
    ) -> Self {
        Self::Import {
            input_file: input_file.into(),
            server: server.into(),
            database: database.into(),
            auth,
        }
    }

    /// The sqlpackage argument vector. The flag spelling is part of the
    /// tool's contract and must not change.
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Export {
                server,
                database,
                output_file,
                auth,
            } => {
                let mut args = vec![
                    "/Action:Export".to_string(),
                    format!("/SourceServerName:tcp:{server}.database.windows.net"),
                    format!("/SourceDatabaseName:{database}"),
                    "/p:VerifyExtraction=False".to_string(),
                ];
                match auth {
                    ExportAuth::AzureActiveDirectory => args.push("/ua:True".to_string()),
                    ExportAuth::Sql(credential) => {
                        args.push(format!("/SourceUser:{}", credential.username));
                        args.push(format!("/SourcePassword:{}", credential.password));
                    }
                }
                args.push(format!("/TargetFile:{output_file}"));
                args
            }
            Self::Import {
                input_file,
                server,
                database,
                auth,
            } => {
                let mut args = vec![
                    "/Action:Import".to_string(),
                    format!("/SourceFile:{input_file}"),
                    format!("/TargetServerName:{server}"),
                    format!("/TargetDatabaseName:{database}"),
                ];
                if let ImportAuth::Sql(credential) = auth {
                    args.push(format!("/TargetUser:{}", credential.username));
                    args.push(format!("/TargetPassword:{}", credential.password));
                }
                args
            }
        }
    }

    /// Progress line printed before invocation.
    pub fn start_message(&self) -> String {
        match self {
            Self::Export {
                server, database, ..
            } => format!("Extracting bacpac from {database} on {server}..."),
            Self::Import {
                input_file,
                server,
                database,
                ..
            } => format!("Importing {input_file} to {database} on {server}..."),
        }
    }

    /// Success line printed after a clean exit.
    pub fn success_message(&self) -> String {
        match self {
            Self::Export { output_file, .. } => {
                format!("Successfully extracted bacpac to {output_file}")
            }
            Self::Import {
                input_file,
                database,
                ..
            } => format!("Successfully imported {input_file} to {database}"),
        }
    }
}

/// Runs bacpac operations. A trait seam so workflow tests can count
/// invocations without spawning a real process.
#[async_trait]
pub trait BacpacRunner: Send + Sync {
    /// Runs the operation to completion and returns captured stdout.
    async fn run(&self, operation: &BacpacOperation) -> BacpacResult<String>;
}

/// `BacpacRunner` that spawns the real `sqlpackage` executable.
pub struct SqlPackage;

#[async_trait]
impl BacpacRunner for SqlPackage {
    async fn run(&self, operation: &BacpacOperation) -> BacpacResult<String> {
        tracing::debug!("invoking {SQLPACKAGE}: {}", operation.start_message());
        let output = Command::new(SQLPACKAGE)
            .args(operation.args())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BacpacError::tool_missing(SQLPACKAGE)
                } else {
                    BacpacError::Io(e)
                }
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            tracing::debug!(status = %output.status, "{SQLPACKAGE} exited non-zero");
            Err(BacpacError::tool_failed(
                SQLPACKAGE,
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ))
        }
    }
}
