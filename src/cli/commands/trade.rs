//! Buy/sell command implementation.

use anyhow::Result;
use papertrade_config::AppConfig;
use papertrade_core::types::{OrderRequest, Side};
use std::time::Duration;

use super::Services;
use crate::cli::TradeArgs;

pub async fn run(args: TradeArgs, side: Side, config: AppConfig) -> Result<()> {
    let services = Services::from_config(&config)?;
    let symbol = args.symbol.to_uppercase();

    // Fill in ticket defaults from settings and the live quote.
    let quote = services.cache.quote(&symbol).await;
    let defaults = services.settings.order_defaults(&quote, side);

    let mut request = OrderRequest::new(
        &symbol,
        side,
        args.price.unwrap_or(quote.price),
        args.qty.unwrap_or(defaults.qty),
    );
    if let Some(stoploss) = args.stoploss {
        request = request.with_stoploss(stoploss);
    }
    if let Some(target) = args.target {
        request = request.with_target(target);
    }

    let order = services.engine.place_order(request)?;
    println!(
        "Order {} placed: {} {} {} @ {:.2}",
        order.id, order.side, order.qty, order.symbol, order.price
    );

    // Wait out the simulated exchange round-trip to report the outcome.
    tokio::time::sleep(services.resolution_delay + Duration::from_millis(200)).await;
    let resolved = services.engine.order(&order.id)?;
    println!("Order {} {}", resolved.id, resolved.status);

    if resolved.status == papertrade_core::types::OrderStatus::Executed {
        for holding in services.ledger.holdings() {
            println!(
                "  {:<12} qty {:>5}  avg {:>10.2}",
                holding.symbol, holding.qty, holding.avg_price
            );
        }
    }

    Ok(())
}
