//! History command implementation.

use anyhow::Result;
use papertrade_config::AppConfig;
use papertrade_core::types::Timeframe;
use std::str::FromStr;

use super::Services;
use crate::cli::HistoryArgs;

pub async fn run(args: HistoryArgs, config: AppConfig) -> Result<()> {
    let timeframe = Timeframe::from_str(&args.timeframe).map_err(anyhow::Error::msg)?;
    let services = Services::from_config(&config)?;
    let symbol = args.symbol.to_uppercase();
    let points = services.cache.history(&symbol, timeframe).await;

    println!("{} ({}, {} points)", symbol, timeframe, points.len());
    for point in &points {
        match point.volume {
            Some(volume) => println!("{:>8}  {:>12.2}  vol {:>9}", point.label, point.price, volume),
            None => println!("{:>8}  {:>12.2}", point.label, point.price),
        }
    }

    Ok(())
}
