//! CLI argument definitions using clap
//!
//! Invoking `bacpacman` with no subcommand runs the full interactive
//! export workflow; the subcommands are the flag-driven surface for
//! scripting.

use bacpacman_core::settings::DEFAULT_SETTINGS_FILE;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "bacpacman")]
#[command(about = "Export and import Azure SQL bacpac archives via sqlpackage")]
#[command(
    long_about = r#"bacpacman - export and import Azure SQL bacpac archives

USAGE:
  bacpacman                                # Full interactive export workflow
  bacpacman login                          # Check Azure credentials
  bacpacman select-subscription            # Pick and persist a subscription
  bacpacman extract-bacpac --server-name s --database-name d
  bacpacman import-bacpac                  # Interactive local import

Discovery uses your ambient Azure credentials ('az login'). Exports and
imports shell out to the external 'sqlpackage' utility."#
)]
#[command(version)]
pub struct Cli {
    /// Path to the settings file holding the selected subscription id
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE, global = true)]
    pub env_file: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authenticate with Azure and list visible subscriptions
    Login,

    /// Select the Azure subscription to use and persist it
    SelectSubscription {
        /// The ID of the subscription to use (prompts when omitted)
        #[arg(long)]
        subscription_id: Option<String>,
    },

    /// List SQL servers in the selected subscription
    ListServers,

    /// List databases on a SQL server
    ListDatabases {
        /// The name of the SQL server (prompts when omitted)
        #[arg(long)]
        server_name: Option<String>,
    },

    /// Extract a bacpac from an Azure SQL database (Azure AD auth)
    ExtractBacpac {
        /// The name of the SQL server (prompts when omitted)
        #[arg(long)]
        server_name: Option<String>,

        /// The name of the database (prompts when omitted)
        #[arg(long)]
        database_name: Option<String>,

        /// The output file for the bacpac
        #[arg(long, default_value = "database.bacpac")]
        output_file: String,
    },

    /// Import a bacpac into a local SQL server
    ImportBacpac {
        /// The bacpac file to import (interactive discovery when omitted)
        #[arg(long)]
        input_file: Option<String>,

        /// The target SQL server (defaults to 'localhost')
        #[arg(long)]
        server_name: Option<String>,

        /// The name of the target database
        #[arg(long)]
        database_name: Option<String>,
    },
}
