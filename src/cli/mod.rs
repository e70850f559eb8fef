//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "papertrade")]
#[command(author, version, about = "Retail equities paper-trading simulator")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level, overriding the configured default
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the current quote for a symbol
    Quote(QuoteArgs),
    /// Show the tracked market indices
    Indices,
    /// Show a historical price series
    History(HistoryArgs),
    /// Show top gainers and losers
    Movers,
    /// Place a buy order
    Buy(TradeArgs),
    /// Place a sell order
    Sell(TradeArgs),
    /// Show the portfolio summary
    Portfolio(PortfolioArgs),
    /// List recent orders
    Orders,
    /// Show or update trade settings
    Settings(SettingsArgs),
}

#[derive(clap::Args)]
pub struct QuoteArgs {
    /// Symbol to quote
    pub symbol: String,
}

#[derive(clap::Args)]
pub struct HistoryArgs {
    /// Symbol to chart
    pub symbol: String,

    /// Timeframe (1D, 1W, 1M, 3M, 6M, 1Y)
    #[arg(short, long, default_value = "1M")]
    pub timeframe: String,
}

#[derive(clap::Args)]
pub struct TradeArgs {
    /// Symbol to trade
    pub symbol: String,

    /// Quantity; defaults from trade settings when omitted
    #[arg(short, long)]
    pub qty: Option<u32>,

    /// Price; defaults to the live quote when omitted
    #[arg(short, long)]
    pub price: Option<Decimal>,

    /// Stoploss price
    #[arg(long)]
    pub stoploss: Option<Decimal>,

    /// Target price
    #[arg(long)]
    pub target: Option<Decimal>,
}

#[derive(clap::Args)]
pub struct PortfolioArgs {
    /// Print the snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args)]
pub struct SettingsArgs {
    /// Default order quantity
    #[arg(long)]
    pub default_qty: Option<u32>,

    /// Stoploss percentage
    #[arg(long)]
    pub stoploss_pct: Option<Decimal>,

    /// Target percentage
    #[arg(long)]
    pub target_pct: Option<Decimal>,

    /// Capital allocated per trade
    #[arg(long)]
    pub capital_per_trade: Option<Decimal>,
}
