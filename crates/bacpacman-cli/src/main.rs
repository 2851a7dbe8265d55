//! bacpacman CLI
//!
//! Interactive export/import of Azure SQL bacpac archives. Run with no
//! arguments for the guided workflow, or use the subcommands for
//! scripting; see `bacpacman --help`.

mod args;
mod commands;
mod console;
mod preflight;
mod prompt;
mod router;
mod workflow;

use clap::Parser;

use crate::args::Cli;
use crate::console::CliConsole;

#[tokio::main]
async fn main() {
    // RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let console = CliConsole::new();

    if !preflight::check_external_tools(&console).await {
        std::process::exit(1);
    }

    if let Err(e) = router::route(cli).await {
        console.error(&e.to_string());
        std::process::exit(1);
    }
}
