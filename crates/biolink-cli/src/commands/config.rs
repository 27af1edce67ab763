//! Config command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};

use biolink_core::Config;

use crate::output::{Output, OutputFormat};

/// Show the effective configuration
///
/// `server_url` reflects a `--server` override when one was given.
pub fn show(
    config_path: Option<&PathBuf>,
    server_override: Option<&str>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    if let Some(server) = server_override {
        config.server_url = server.to_string();
    }

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "bind": config.bind,
                    "server_url": config.server_url,
                    "log_file": config.log_path(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.server_url);
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:   {}", config.data_dir.display());
            println!("  bind:       {}", config.bind);
            println!("  server_url: {}", config.server_url);
            println!(
                "  log_file:   {}{}",
                config.log_path().display(),
                if config.log_file.is_none() {
                    " (default)"
                } else {
                    ""
                }
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}
