//! CLI mode
//!
//! One-shot commands that do not start the HTTP server.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::api::jwt::get_jwt_service;
use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::LinkbioError;

const DEFAULT_SAMPLE_PATH: &str = "config.example.toml";

/// Run a non-server command
pub fn run_cli(command: Commands) -> Result<()> {
    match command {
        Commands::Serve => anyhow::bail!("`serve` is handled by server mode"),
        Commands::Config { action } => match action {
            ConfigCommands::Generate { output_path, force } => {
                if output_path.as_deref() == Some("-") {
                    print!("{}", StaticConfig::generate_sample_config());
                    return Ok(());
                }
                let path = output_path.unwrap_or_else(|| DEFAULT_SAMPLE_PATH.to_string());
                if std::path::Path::new(&path).exists() && !force {
                    anyhow::bail!("{} already exists, use --force to overwrite", path);
                }
                StaticConfig::default()
                    .save_to_file(&path)
                    .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path, e))?;
                println!("{} Sample configuration written to {}", "✓".green(), path);
                Ok(())
            }
        },
        Commands::Token { owner_id } => {
            let owner_id = owner_id.trim();
            if owner_id.is_empty() {
                return Err(LinkbioError::validation("Owner id cannot be empty").into());
            }
            let token = get_jwt_service()
                .generate_access_token(owner_id)
                .context("Failed to sign access token")?;
            println!("{}", token);
            Ok(())
        }
    }
}
