//! Portfolio command implementation.

use anyhow::Result;
use papertrade_config::AppConfig;

use super::Services;
use crate::cli::PortfolioArgs;

pub async fn run(args: PortfolioArgs, config: AppConfig) -> Result<()> {
    let services = Services::from_config(&config)?;
    let snapshot = services.ledger.snapshot().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Total value      {:>14.2}", snapshot.total_value);
    println!("Total investment {:>14.2}", snapshot.total_investment);
    println!(
        "Overall P&L      {:>14.2}  ({:.2}%)",
        snapshot.overall_pnl, snapshot.overall_pnl_pct
    );
    println!(
        "Day change       {:>14.2}  ({:.2}%)",
        snapshot.day_change, snapshot.day_change_pct
    );
    println!(
        "Month change     {:>14.2}  ({:.2}%)",
        snapshot.month_change, snapshot.month_change_pct
    );

    println!("\nAllocation");
    for slice in &snapshot.allocation {
        println!("  {:<10} {:>3}%", slice.category, slice.percent);
    }

    if !snapshot.holdings.is_empty() {
        println!("\nHoldings");
        for holding in &snapshot.holdings {
            println!(
                "  {:<12} qty {:>5}  avg {:>10.2}  ltp {:>10.2}  pnl {:>10.2} ({:.2}%)",
                holding.symbol, holding.qty, holding.avg_price, holding.ltp, holding.pnl, holding.pnl_pct
            );
        }
    }

    Ok(())
}
