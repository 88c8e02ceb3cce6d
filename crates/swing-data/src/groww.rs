//! Groww public market data client.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use swing_core::{DataError, PriceSource};
use tracing::{debug, info, warn};

/// Groww API configuration.
#[derive(Debug, Clone)]
pub struct GrowwConfig {
    pub base_url: String,
    pub exchange: String,
    pub segment: String,
    pub timeout: Duration,
}

impl Default for GrowwConfig {
    fn default() -> Self {
        Self {
            base_url: "https://groww.in/v1/api".to_string(),
            exchange: "NSE".to_string(),
            segment: "CASH".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl GrowwConfig {
    /// Quote URL for one symbol.
    pub fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}/stocks_data/v1/accord_hybrid_data/exchange/{}/segment/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.exchange,
            self.segment,
            symbol.to_uppercase()
        )
    }
}

/// Groww quote response; only the last traded price is read.
#[derive(Debug, Deserialize)]
struct GrowwQuote {
    #[serde(default)]
    ltp: Option<Decimal>,
}

impl GrowwQuote {
    fn last_traded_price(&self) -> Decimal {
        self.ltp.unwrap_or(Decimal::ZERO)
    }
}

/// Live price client over the public Groww quote endpoint.
pub struct GrowwPriceClient {
    config: GrowwConfig,
    client: Client,
}

impl GrowwPriceClient {
    /// Create a new client.
    pub fn new(config: GrowwConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GrowwConfig {
        &self.config
    }
}

#[async_trait]
impl PriceSource for GrowwPriceClient {
    async fn get_price(&self, symbol: &str) -> Result<Decimal, DataError> {
        let url = self.config.quote_url(symbol);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            warn!("{}: API returned {}", symbol, status);
            return Err(DataError::ApiError(format!("{}: HTTP {}", symbol, status)));
        }

        let quote: GrowwQuote = resp
            .json()
            .await
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let price = quote.last_traded_price();
        info!("{}: ₹{}", symbol, price);
        Ok(price)
    }

    fn name(&self) -> &str {
        "groww"
    }
}
