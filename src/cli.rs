//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// linkbio - link-in-bio backend
#[derive(Parser)]
#[command(name = "linkbio")]
#[command(version)]
#[command(about = "Link-in-bio profiles, links and click analytics", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = crate::config::DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Issue an access token for an owner id
    Token {
        /// Owner id placed in the token's `sub` claim
        owner_id: String,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml, `-` for stdout)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Whether this invocation runs the HTTP server
    pub fn is_server_mode(&self) -> bool {
        matches!(self.command, None | Some(Commands::Serve))
    }
}
