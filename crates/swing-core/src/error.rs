//! Error types for the swing-trading dashboard.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level error for operations that span the data and record layers.
#[derive(Error, Debug)]
pub enum SwingError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure to refresh a single position.
///
/// Raised per position; a refresh pass records it and moves on to the
/// next position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("Invalid position {symbol}: entry price {entry_price} must be positive")]
    InvalidPosition { symbol: String, entry_price: Decimal },

    #[error("Invalid price for {symbol}: live price {price} must be positive")]
    InvalidPrice { symbol: String, price: Decimal },
}

impl PositionError {
    /// Symbol of the position that failed.
    pub fn symbol(&self) -> &str {
        match self {
            PositionError::InvalidPosition { symbol, .. } => symbol,
            PositionError::InvalidPrice { symbol, .. } => symbol,
        }
    }
}

/// Data source and document store errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Trade not found: {0}")]
    TradeNotFound(String),

    #[error("No price available for {0}")]
    NoPrice(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Store error: {0}")]
    StoreError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ParseError(err.to_string())
    }
}

/// Result type alias for dashboard operations.
pub type SwingResult<T> = Result<T, SwingError>;
