//! Paper-trading CLI application.

mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = papertrade_config::load_config(&cli.config)
        .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;
    config.validate().map_err(anyhow::Error::msg)?;

    // CLI flags override the configured logging section.
    let log_level = match cli.log_level {
        Some(cli::LogLevel::Trace) => "trace",
        Some(cli::LogLevel::Debug) => "debug",
        Some(cli::LogLevel::Info) => "info",
        Some(cli::LogLevel::Warn) => "warn",
        Some(cli::LogLevel::Error) => "error",
        None => config.logging.level.as_str(),
    };
    let json = cli.json_logs || config.logging.format == "json";
    logging::setup(log_level, json);

    match cli.command {
        Commands::Quote(args) => cli::commands::quote::run(args, config).await,
        Commands::Indices => cli::commands::indices::run(config).await,
        Commands::History(args) => cli::commands::history::run(args, config).await,
        Commands::Movers => cli::commands::movers::run(config).await,
        Commands::Buy(args) => {
            cli::commands::trade::run(args, papertrade_core::types::Side::Buy, config).await
        }
        Commands::Sell(args) => {
            cli::commands::trade::run(args, papertrade_core::types::Side::Sell, config).await
        }
        Commands::Portfolio(args) => cli::commands::portfolio::run(args, config).await,
        Commands::Orders => cli::commands::orders::run(config).await,
        Commands::Settings(args) => cli::commands::settings::run(args, config).await,
    }
}
