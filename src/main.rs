use clap::Parser;
use colored::Colorize;
use tracing::info;

use linkbio::cli::Cli;
use linkbio::config::{get_config, init_config_from};
use linkbio::errors::LinkbioError;
use linkbio::runtime::modes::{run_cli, run_server};
use linkbio::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config_from(&cli.config);

    if !cli.is_server_mode() {
        if let Some(command) = cli.command
            && let Err(e) = run_cli(command)
        {
            match e.downcast_ref::<LinkbioError>() {
                Some(err) => eprintln!("{}", err.format_colored()),
                None => eprintln!("{} {}", "[ERROR]".red().bold(), e),
            }
            std::process::exit(1);
        }
        return Ok(());
    }

    let config = get_config();
    let _guard = init_logging(&config.logging)?;
    info!(
        "linkbio {} starting (log level: {})",
        env!("CARGO_PKG_VERSION"),
        config.logging.level
    );

    run_server().await
}
