//! Refresh command implementation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use swing_config::AppConfig;
use swing_core::{PortfolioDocument, PriceMap};
use swing_data::{fetch_prices, load_prices_file, parse_price_arg, GrowwConfig, GrowwPriceClient, JsonStore};
use swing_portfolio::{refresh_document, RefreshReport};
use tracing::{info, warn};

use crate::cli::{OutputFormat, RefreshArgs};

pub async fn run(args: RefreshArgs, config: &AppConfig) -> Result<()> {
    let portfolio_path = args
        .portfolio
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.data.portfolio_path));
    let store = JsonStore::new(portfolio_path, &config.data.trades_path);

    let mut document = store.load_portfolio().with_context(|| {
        format!("Failed to load portfolio {}", store.portfolio_path().display())
    })?;
    info!(
        "Loaded {} active positions from {}",
        document.position_count(),
        store.portfolio_path().display()
    );

    let prices = resolve_prices(&args, config, &document)
        .await
        .context("Failed to fetch prices, skipping update")?;

    let outcome = refresh_document(&mut document, &prices);
    for error in &outcome.errors {
        warn!("{}", error);
    }

    let report = RefreshReport::new(&document, &outcome);
    match args.output {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.summary()),
    }

    if args.dry_run {
        info!("Dry run, portfolio not saved");
        return Ok(());
    }

    store.save_portfolio(&document).context("Failed to save portfolio")?;
    info!(
        "Total P&L: ₹{} ({}%)",
        outcome.totals.total_pnl, outcome.totals.total_pnl_percent
    );

    Ok(())
}

/// Prices from the command line or a prices file, else a live fetch.
async fn resolve_prices(
    args: &RefreshArgs,
    config: &AppConfig,
    document: &PortfolioDocument,
) -> Result<PriceMap> {
    if args.prices_file.is_some() || !args.prices.is_empty() {
        let mut prices = match &args.prices_file {
            Some(path) => load_prices_file(path)?,
            None => PriceMap::new(),
        };
        for arg in &args.prices {
            let (symbol, price) = parse_price_arg(arg)?;
            prices.insert(symbol, price);
        }
        info!("Using {} supplied prices", prices.len());
        return Ok(prices);
    }

    let mut symbols = document.symbols();
    if symbols.is_empty() {
        symbols = config.market.symbols.clone();
    }

    let client = GrowwPriceClient::new(GrowwConfig {
        base_url: config.market.base_url.clone(),
        exchange: config.market.exchange.clone(),
        segment: config.market.segment.clone(),
        timeout: config.market.timeout(),
    })?;

    Ok(fetch_prices(&client, &symbols).await?)
}
