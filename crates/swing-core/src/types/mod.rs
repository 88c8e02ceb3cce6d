//! Core data types for the dashboard.

mod market;
mod position;
mod snapshot;
mod trade;

pub use market::{BollingerInput, QuoteRecord, SectorRecord, TechnicalRecord};
pub use position::{PortfolioDocument, PortfolioSummary, PositionRecord, PriceMap};
pub use snapshot::{
    BollingerSnapshot, BreakoutType, DayPerformance, IndicatorSnapshot, MacdClassification,
    MacdSnapshot, MacdTrend, Momentum, MovingAverages, PriceLevels, Volatility, VolumeData,
};
pub use trade::{EntryIndicators, SectorData, TradeRecord, ENTRY_INDICATORS_KEY};
