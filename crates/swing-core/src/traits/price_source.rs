//! Live price source trait.

use crate::error::DataError;
use crate::types::PriceMap;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for live last-traded-price sources.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the last traded price for one symbol.
    async fn get_price(&self, symbol: &str) -> Result<Decimal, DataError>;

    /// Fetch prices for every symbol.
    ///
    /// All or nothing: the first failing symbol fails the whole fetch, so a
    /// caller never refreshes a document against a partial price map.
    async fn get_prices(&self, symbols: &[String]) -> Result<PriceMap, DataError> {
        let mut prices = PriceMap::with_capacity(symbols.len());
        for symbol in symbols {
            let price = self.get_price(symbol).await?;
            prices.insert(symbol.clone(), price);
        }
        Ok(prices)
    }

    /// Get the source name.
    fn name(&self) -> &str;
}

/// Prices known up front (command line, prices file, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    prices: PriceMap,
}

impl StaticPriceSource {
    /// Create a source over a fixed price map.
    pub fn new(prices: PriceMap) -> Self {
        Self { prices }
    }

    /// Add or replace one price.
    pub fn with_price(mut self, symbol: impl Into<String>, price: Decimal) -> Self {
        self.prices.insert(symbol.into(), price);
        self
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn get_price(&self, symbol: &str) -> Result<Decimal, DataError> {
        self.prices
            .get(symbol)
            .copied()
            .ok_or_else(|| DataError::NoPrice(symbol.to_string()))
    }

    fn name(&self) -> &str {
        "static"
    }
}
