//! Orders command implementation.

use anyhow::Result;
use papertrade_config::AppConfig;

use super::Services;

pub async fn run(config: AppConfig) -> Result<()> {
    let services = Services::from_config(&config)?;
    let orders = services.engine.recent_orders();

    if orders.is_empty() {
        println!("No orders this session.");
        return Ok(());
    }

    for order in orders {
        println!(
            "{}  {}  {} {} {} @ {:.2}  {}",
            order.created_at.format("%H:%M:%S"),
            order.id,
            order.side,
            order.qty,
            order.symbol,
            order.price,
            order.status
        );
    }

    Ok(())
}
