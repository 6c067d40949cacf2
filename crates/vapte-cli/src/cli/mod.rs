//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use vapte_core::config::Config;

mod commands;
mod ui;

#[derive(Parser)]
#[command(name = "vapte")]
#[command(version)]
#[command(about = "Client for the vapte transformation service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Register a new account
    Register {
        /// Username for the new account
        #[arg(long)]
        username: String,

        /// Email address for the new account
        #[arg(long)]
        email: String,

        /// Password for the new account
        #[arg(long)]
        password: String,
    },

    /// Log in and save the issued tokens
    Login {
        /// Account username
        #[arg(long)]
        username: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Clear saved tokens
    Logout,

    /// Exchange the saved refresh token for a new access token
    Refresh,

    /// Probe the authenticated endpoint with the saved access token
    Whoami,

    /// Submit a template identifier for transformation
    Upload {
        /// The template identifier to transform
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Render a completion page and fetch the generated file
    Download {
        /// Name of the generated file
        #[arg(value_name = "FILENAME")]
        filename: String,

        /// Directory to write the file into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

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

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

/// Diagnostics go to stderr; stdout is reserved for status and command
/// output.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("VAPTE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = Config::load().context("load config")?;

    match cli.command {
        Commands::Register {
            username,
            email,
            password,
        } => commands::register::run(&config, &username, &email, &password).await,

        Commands::Login { username, password } => {
            commands::auth::login(&config, &username, &password).await
        }
        Commands::Logout => commands::auth::logout(),
        Commands::Refresh => commands::auth::refresh(&config).await,
        Commands::Whoami => commands::auth::whoami(&config).await,

        Commands::Upload { template } => commands::upload::run(&config, &template).await,
        Commands::Download { filename, out } => {
            commands::download::run(&config, &filename, &out).await
        }

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
