//! Biolink CLI
//!
//! Admin client for a running biolink server: one-shot commands and an
//! interactive terminal panel.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use biolink_core::{Config, Direction};

mod api;
mod commands;
#[cfg(test)]
mod fake;
mod output;
mod tui;

use api::ApiClient;
use commands::settings::SettingsUpdate;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "biolink")]
#[command(about = "Biolink - manage your link page")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to config file (overrides default location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server URL (overrides config)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive admin panel
    Tui,
    /// Manage links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Show or change page settings
    Settings {
        #[command(subcommand)]
        command: Option<SettingsCommands>,
    },
    /// Show configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum LinkCommands {
    /// List all links in page order
    #[command(alias = "ls")]
    List,
    /// Show link details
    Show {
        /// Link ID (full ID or prefix)
        id: String,
    },
    /// Add a link to the end of the list
    #[command(alias = "create")]
    Add {
        /// Display text
        title: String,
        /// Destination URL
        url: String,
    },
    /// Edit a link (prompts when no flags are given)
    Edit {
        /// Link ID (full ID or prefix)
        id: String,
        /// New title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// New URL
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Hide a visible link or show a hidden one
    Toggle {
        /// Link ID (full ID or prefix)
        id: String,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID (full ID or prefix)
        id: String,
    },
    /// Move a link one position
    Move {
        /// Link ID (full ID or prefix)
        id: String,
        /// up or down
        direction: Direction,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current settings
    Show,
    /// Change one or more settings
    Set {
        /// Page heading
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// Page subheading
        #[arg(short, long)]
        subtitle: Option<String>,
        /// Profile image URL (empty to use the placeholder)
        #[arg(short, long)]
        profile_image: Option<String>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that don't need the server
    if let Some(Commands::Config { command }) = &cli.command {
        return match command {
            Some(ConfigCommands::Show) | None => {
                commands::config::show(cli.config.as_ref(), cli.server.as_deref(), &output)
            }
        };
    }

    let mut config =
        Config::load_with_cli_override(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(server) = cli.server {
        config.server_url = server;
    }

    let api = ApiClient::new(&config.server_url)
        .with_context(|| format!("Invalid server URL: {}", config.server_url))?;

    // Handle TUI (default when no command given)
    let command = match cli.command {
        None | Some(Commands::Tui) => {
            let public_url = api.base_url().to_string();
            return tui::run(&config, &api, public_url).await;
        }
        Some(command) => command,
    };

    init_cli_logging();

    match command {
        Commands::Link { command } => handle_link_command(command, &api, &output).await,
        Commands::Settings { command } => handle_settings_command(command, &api, &output).await,
        Commands::Tui | Commands::Config { .. } => Ok(()),
    }
}

async fn handle_link_command(command: LinkCommands, api: &ApiClient, output: &Output) -> Result<()> {
    match command {
        LinkCommands::List => commands::link::list(api, output).await,
        LinkCommands::Show { id } => commands::link::show(api, id, output).await,
        LinkCommands::Add { title, url } => commands::link::add(api, title, url, output).await,
        LinkCommands::Edit { id, title, url } => {
            commands::link::edit(api, id, title, url, output).await
        }
        LinkCommands::Toggle { id } => commands::link::toggle(api, id, output).await,
        LinkCommands::Delete { id } => commands::link::delete(api, id, output).await,
        LinkCommands::Move { id, direction } => {
            commands::link::move_link(api, id, direction, output).await
        }
    }
}

async fn handle_settings_command(
    command: Option<SettingsCommands>,
    api: &ApiClient,
    output: &Output,
) -> Result<()> {
    match command {
        Some(SettingsCommands::Show) | None => commands::settings::show(api, output).await,
        Some(SettingsCommands::Set {
            title,
            subtitle,
            profile_image,
        }) => {
            let update = SettingsUpdate {
                title,
                subtitle,
                profile_image,
            };
            commands::settings::set(api, update, output).await
        }
    }
}

/// Log to stderr for one-shot commands, only when BIOLINK_LOG is set
fn init_cli_logging() {
    let Ok(filter) = std::env::var("BIOLINK_LOG") else {
        return;
    };

    let env_filter = EnvFilter::try_new(&filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
