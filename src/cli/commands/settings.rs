//! Settings command implementation.

use anyhow::Result;
use papertrade_config::AppConfig;
use papertrade_core::types::TradeSettingsPatch;

use super::Services;
use crate::cli::SettingsArgs;

pub async fn run(args: SettingsArgs, config: AppConfig) -> Result<()> {
    let services = Services::from_config(&config)?;

    let patch = TradeSettingsPatch {
        default_qty: args.default_qty,
        stoploss_pct: args.stoploss_pct,
        target_pct: args.target_pct,
        default_capital_per_trade: args.capital_per_trade,
    };

    let settings = services.settings.update(patch);

    println!("default qty            {}", settings.default_qty);
    println!("stoploss pct           {}", settings.stoploss_pct);
    println!("target pct             {}", settings.target_pct);
    println!("capital per trade      {}", settings.default_capital_per_trade);

    Ok(())
}
