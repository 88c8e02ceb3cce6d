//! Data access for the swing dashboard.
//!
//! - [`GrowwPriceClient`]: live last-traded prices over HTTP
//! - [`JsonStore`]: the portfolio document and trades file on disk
//! - [`load_prices_file`]: a symbol to price map from a JSON file

mod groww;
mod prices;
mod store;

pub use groww::{GrowwConfig, GrowwPriceClient};
pub use prices::{load_prices_file, parse_price_arg};
pub use store::{JsonStore, TradeLog};

use swing_core::{DataError, PriceMap, PriceSource};

/// Fetch prices for `symbols` from any source, logging the outcome.
///
/// Fails as a whole if any symbol fails.
pub async fn fetch_prices(
    source: &dyn PriceSource,
    symbols: &[String],
) -> Result<PriceMap, DataError> {
    tracing::info!("Fetching {} live prices from {}", symbols.len(), source.name());
    let prices = source.get_prices(symbols).await?;
    for symbol in symbols {
        if let Some(price) = prices.get(symbol) {
            tracing::debug!(%symbol, %price, "Fetched price");
        }
    }
    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use swing_core::StaticPriceSource;

    #[tokio::test]
    async fn test_fetch_prices_all_or_nothing() {
        let source = StaticPriceSource::default()
            .with_price("HINDZINC", dec!(692))
            .with_price("HINDCOPPER", dec!(308.5));

        let prices = fetch_prices(&source, &["HINDZINC".to_string(), "HINDCOPPER".to_string()])
            .await
            .unwrap();
        assert_eq!(prices.len(), 2);

        let err = fetch_prices(&source, &["HINDZINC".to_string(), "VEDL".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, DataError::NoPrice(ref s) if s == "VEDL"));
    }
}
