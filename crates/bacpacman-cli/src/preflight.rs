//! Startup checks for required external tools
//!
//! Both `sqlpackage` and the Azure CLI must be reachable on PATH before
//! any command runs; each probe spawns the tool with a cheap version
//! flag and treats a NotFound spawn error as "not installed".

use tokio::process::Command;

use crate::console::CliConsole;

/// Verifies required executables; prints install instructions and
/// returns false when one is missing.
pub async fn check_external_tools(console: &CliConsole) -> bool {
    if !tool_available("sqlpackage", "/Version").await {
        print_sqlpackage_instructions(console);
        return false;
    }
    if !tool_available("az", "--version").await {
        console.error("The 'az' command-line utility is not installed or not in your PATH.");
        console.plain(
            "The download page is here: \
             https://learn.microsoft.com/en-us/cli/azure/install-azure-cli",
        );
        return false;
    }
    true
}

async fn tool_available(tool: &str, probe_flag: &str) -> bool {
    match Command::new(tool).arg(probe_flag).output().await {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(tool, error = %e, "external tool probe failed");
            e.kind() != std::io::ErrorKind::NotFound
        }
    }
}

fn print_sqlpackage_instructions(console: &CliConsole) {
    console.error("The 'sqlpackage' command-line utility is not installed or not in your PATH.");
    console.plain(
        "The download page is here: \
         https://learn.microsoft.com/en-us/sql/tools/sqlpackage/sqlpackage-download",
    );
    match std::env::consts::OS {
        "macos" => {
            console.plain("To install it on macOS, you can use the .NET tool.");
            console.plain(".NET Tool (requires .NET SDK):");
            console.plain(
                "  Install the .NET SDK from: https://dotnet.microsoft.com/en-us/download",
            );
            console.plain("  Then run: dotnet tool install -g microsoft.sqlpackage");
        }
        "linux" => {
            console.plain("To install it on Linux, download the zip file from:");
            console.plain(
                "  https://learn.microsoft.com/en-us/sql/tools/sqlpackage/sqlpackage-download#linux",
            );
        }
        "windows" => {
            console.plain("To install it on Windows, download the DacFramework.msi installer from:");
            console.plain(
                "  https://learn.microsoft.com/en-us/sql/tools/sqlpackage/sqlpackage-download#windows",
            );
        }
        _ => {}
    }
}
