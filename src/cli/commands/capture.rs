//! Capture command implementation.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use swing_config::AppConfig;
use swing_core::{QuoteRecord, SectorRecord, TechnicalRecord};
use swing_data::JsonStore;
use swing_indicators::{annotate_trade, build_snapshot};
use tracing::info;

use crate::cli::CaptureArgs;

pub async fn run(args: CaptureArgs, config: &AppConfig) -> Result<()> {
    if !(args.entry_price.is_finite() && args.entry_price > 0.0) {
        anyhow::bail!("Entry price must be a positive number, got {}", args.entry_price);
    }

    let quote: QuoteRecord = read_json(&args.quote)?;
    let technical: Option<TechnicalRecord> = args.technical.as_deref().map(read_json).transpose()?;
    let sector: Option<SectorRecord> = args.sector.as_deref().map(read_json).transpose()?;

    let snapshot = build_snapshot(args.entry_price, &quote, technical.as_ref());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    let Some(trade_id) = args.trade_id else {
        return Ok(());
    };

    let trades_path = args
        .trades
        .unwrap_or_else(|| PathBuf::from(&config.data.trades_path));
    let store = JsonStore::new(&config.data.portfolio_path, trades_path);

    let mut log = store
        .load_trades()
        .with_context(|| format!("Failed to load trades {}", store.trades_path().display()))?;
    log.update(&trade_id, |trade| annotate_trade(trade, snapshot, sector.as_ref()))
        .with_context(|| format!("Failed to annotate {}", store.trades_path().display()))?;
    store.save_trades(&log).context("Failed to save trades")?;

    info!("Entry indicators captured for {}", trade_id);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
