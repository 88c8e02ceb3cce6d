//! Prices supplied without a live fetch.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use swing_core::{DataError, PriceMap};

/// Load a `{"SYMBOL": price, ...}` JSON file.
pub fn load_prices_file(path: impl AsRef<Path>) -> Result<PriceMap, DataError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DataError::DocumentNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)?;
    let prices: PriceMap = serde_json::from_str(&content)?;
    Ok(prices)
}

/// Parse a `SYMBOL=PRICE` argument.
pub fn parse_price_arg(arg: &str) -> Result<(String, Decimal), DataError> {
    let (symbol, price) = arg
        .split_once('=')
        .ok_or_else(|| DataError::ParseError(format!("expected SYMBOL=PRICE, got '{}'", arg)))?;

    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err(DataError::ParseError(format!("missing symbol in '{}'", arg)));
    }

    let price = Decimal::from_str(price.trim())
        .map_err(|e| DataError::ParseError(format!("bad price in '{}': {}", arg, e)))?;

    Ok((symbol.to_string(), price))
}
