//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

use crate::logging;

mod commands;

#[derive(Parser)]
#[command(name = "clx")]
#[command(version)]
#[command(about = "Terminal client for the ClarityExpense finance tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend base URL (overrides config file)
    #[arg(long, value_name = "URL", env = "CLX_API_URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Clear the stored session
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to a file; the terminal belongs to the TUI.
    let _log_guard = logging::init().context("initialize logging")?;

    // default to the interactive client
    let Some(command) = cli.command else {
        return commands::tui::run(cli.api_url.as_deref());
    };

    match command {
        Commands::Logout => commands::session::logout(),
        Commands::Whoami => commands::session::whoami(),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
