//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// A setting that loaded but cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub market: MarketSettings,
}

impl AppConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Check every setting, reporting the first unusable one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ValidationError::new(
                "logging.level",
                format!("'{}' is not one of {}", self.logging.level, LOG_LEVELS.join(", ")),
            ));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ValidationError::new(
                "logging.format",
                format!("'{}' is not one of {}", self.logging.format, LOG_FORMATS.join(", ")),
            ));
        }
        if self.data.portfolio_path.trim().is_empty() {
            return Err(ValidationError::new("data.portfolio_path", "must not be empty"));
        }
        if self.data.trades_path.trim().is_empty() {
            return Err(ValidationError::new("data.trades_path", "must not be empty"));
        }
        if !(self.market.base_url.starts_with("http://") || self.market.base_url.starts_with("https://")) {
            return Err(ValidationError::new(
                "market.base_url",
                format!("'{}' is not an http(s) URL", self.market.base_url),
            ));
        }
        if self.market.timeout_secs == 0 {
            return Err(ValidationError::new("market.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "swing".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format == "json"
    }
}

/// Document locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub portfolio_path: String,
    pub trades_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            portfolio_path: "trading_data.json".to_string(),
            trades_path: "trades.json".to_string(),
        }
    }
}

/// Live market data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSettings {
    pub base_url: String,
    pub exchange: String,
    pub segment: String,
    pub timeout_secs: u64,
    /// Symbols to fetch when the portfolio holds no positions.
    pub symbols: Vec<String>,
}

impl Default for MarketSettings {
    fn default() -> Self {
        Self {
            base_url: "https://groww.in/v1/api".to_string(),
            exchange: "NSE".to_string(),
            segment: "CASH".to_string(),
            timeout_secs: 10,
            symbols: vec!["HINDZINC".to_string(), "HINDCOPPER".to_string()],
        }
    }
}

impl MarketSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
