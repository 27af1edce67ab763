//! biolink-server
//!
//! Runs the public page and JSON API over the configured data directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use biolink_core::{Config, Store};
use biolink_server::{init_logging, serve, AppState};

#[derive(Parser)]
#[command(name = "biolink-server")]
#[command(about = "Biolink - public link page and admin API")]
#[command(version)]
struct Cli {
    /// Path to config file (overrides default location)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding links.json and settings.json (overrides config)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config =
        Config::load_with_cli_override(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    info!("Using data directory {:?}", config.data_dir);
    let bind = config.bind.clone();
    let store = Store::open_with_config(config).context("Failed to open store")?;

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Failed to bind {}", bind))?;

    serve(listener, AppState::new(store), shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
