//! Movers command implementation.

use anyhow::Result;
use papertrade_config::AppConfig;
use papertrade_core::types::Quote;

use super::Services;

pub async fn run(config: AppConfig) -> Result<()> {
    let services = Services::from_config(&config)?;
    let movers = services.feed.synthetic().top_movers();

    println!("Top gainers");
    print_rows(&movers.gainers);
    println!("\nTop losers");
    print_rows(&movers.losers);

    Ok(())
}

fn print_rows(quotes: &[Quote]) {
    for quote in quotes {
        println!(
            "  {:<12} {:>10.2}  {:>8.2} ({:.2}%)",
            quote.symbol, quote.price, quote.change_abs, quote.change_pct
        );
    }
}
