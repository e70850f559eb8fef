//! Quote command implementation.

use anyhow::Result;
use papertrade_config::AppConfig;

use super::Services;
use crate::cli::QuoteArgs;

pub async fn run(args: QuoteArgs, config: AppConfig) -> Result<()> {
    let services = Services::from_config(&config)?;
    let symbol = args.symbol.to_uppercase();
    let quote = services.cache.quote(&symbol).await;

    println!("{}", quote.symbol);
    println!("  price      {:>12.2}", quote.price);
    println!(
        "  change     {:>12.2}  ({:.2}%)",
        quote.change_abs, quote.change_pct
    );
    println!("  open       {:>12.2}", quote.open);
    println!("  high       {:>12.2}", quote.high);
    println!("  low        {:>12.2}", quote.low);
    println!("  prev close {:>12.2}", quote.previous_close);
    println!("  volume     {:>12}", quote.volume);

    Ok(())
}
