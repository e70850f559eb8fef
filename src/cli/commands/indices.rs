//! Indices command implementation.

use anyhow::Result;
use papertrade_config::AppConfig;

use super::Services;

pub async fn run(config: AppConfig) -> Result<()> {
    let services = Services::from_config(&config)?;
    let indices = services.cache.indices().await;

    for index in indices {
        println!(
            "{:<12} {:>12.2}  {:>9.2} ({:.2}%)",
            index.name, index.value, index.change_abs, index.change_pct
        );
    }

    Ok(())
}
