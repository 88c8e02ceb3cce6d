//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use swing_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);
    if !config_path.exists() {
        println!("File not found, checking defaults and environment only");
    }

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Log format: {}", config.logging.format);
    println!("Portfolio: {}", config.data.portfolio_path);
    println!("Trades: {}", config.data.trades_path);
    println!(
        "Market: {} {}/{} (timeout {}s)",
        config.market.base_url, config.market.exchange, config.market.segment, config.market.timeout_secs
    );
    println!("Default symbols: {}", config.market.symbols.join(", "));

    Ok(())
}
