//! Upstream market records.
//!
//! These arrive from the market-data API and the historical indicator
//! service. Every field is optional: an absent value is a valid state and
//! simply leaves the derived fields that depend on it absent.

use serde::{Deserialize, Serialize};

/// Live quote for a symbol at the time of entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default, alias = "close")]
    pub previous_close: Option<f64>,
    #[serde(default, alias = "ltp")]
    pub last_traded_price: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    /// Average daily volume, supplied by the caller from historical data.
    #[serde(default, alias = "avg_volume")]
    pub avg_volume: Option<f64>,
    #[serde(default)]
    pub year_high_price: Option<f64>,
    #[serde(default)]
    pub year_low_price: Option<f64>,
    #[serde(default)]
    pub day_change: Option<f64>,
    #[serde(default, alias = "dayChangePerc")]
    pub day_change_percent: Option<f64>,
    #[serde(default)]
    pub total_buy_qty: Option<f64>,
    #[serde(default)]
    pub total_sell_qty: Option<f64>,
}

/// Bollinger band values as delivered by the indicator service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BollingerInput {
    #[serde(default, rename = "bb_upper")]
    pub upper: Option<f64>,
    #[serde(default, rename = "bb_middle")]
    pub middle: Option<f64>,
    #[serde(default, rename = "bb_lower")]
    pub lower: Option<f64>,
    #[serde(default, rename = "bb_width")]
    pub width: Option<f64>,
}

/// Technical indicators computed from historical bars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalRecord {
    #[serde(default, alias = "rsi14")]
    pub rsi_14: Option<f64>,
    #[serde(default)]
    pub macd: Option<f64>,
    #[serde(default, alias = "macdSignal")]
    pub macd_signal: Option<f64>,
    #[serde(default, alias = "macdHistogram")]
    pub macd_histogram: Option<f64>,
    #[serde(default, alias = "ema20")]
    pub ema_20: Option<f64>,
    #[serde(default, alias = "ema50")]
    pub ema_50: Option<f64>,
    #[serde(default, alias = "sma50")]
    pub sma_50: Option<f64>,
    #[serde(default, alias = "sma200")]
    pub sma_200: Option<f64>,
    #[serde(flatten)]
    pub bollinger: BollingerInput,
    #[serde(default, alias = "atr14")]
    pub atr_14: Option<f64>,
    #[serde(default, alias = "adx14")]
    pub adx_14: Option<f64>,
    #[serde(default, alias = "williamsR")]
    pub williams_r: Option<f64>,
    #[serde(default, rename = "stoch_k", alias = "stochasticK")]
    pub stochastic_k: Option<f64>,
    #[serde(default, rename = "stoch_d", alias = "stochasticD")]
    pub stochastic_d: Option<f64>,
}

/// Sector performance on the day of entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorRecord {
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default, alias = "dayChangePercent")]
    pub day_change_percent: Option<f64>,
    #[serde(default, alias = "weekChangePercent")]
    pub week_change_percent: Option<f64>,
    #[serde(default, alias = "gainersCount")]
    pub gainers_count: Option<u32>,
    #[serde(default, alias = "losersCount")]
    pub losers_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_from_market_api() {
        let quote: QuoteRecord = serde_json::from_str(
            r#"{
                "open": 682.0, "high": 701.0, "low": 680.75, "close": 680.75,
                "ltp": 692.0, "volume": 20800000, "yearHighPrice": 696.9,
                "yearLowPrice": 378.15, "dayChange": 11.25, "dayChangePerc": 1.65,
                "totalBuyQty": 150000, "totalSellQty": 125000
            }"#,
        )
        .unwrap();

        assert_eq!(quote.previous_close, Some(680.75));
        assert_eq!(quote.last_traded_price, Some(692.0));
        assert_eq!(quote.volume, Some(20_800_000.0));
        assert_eq!(quote.year_high_price, Some(696.9));
        assert_eq!(quote.day_change_percent, Some(1.65));
        assert!(quote.avg_volume.is_none());
    }

    #[test]
    fn test_quote_all_absent() {
        let quote: QuoteRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(quote, QuoteRecord::default());
    }

    #[test]
    fn test_technical_flat_keys() {
        let technical: TechnicalRecord = serde_json::from_str(
            r#"{
                "rsi_14": 69.32, "macd": 7.94, "macd_signal": 2.59,
                "bb_upper": 710.5, "bb_middle": 685.25, "bb_lower": 660.0,
                "stoch_k": 81.0, "williams_r": -12.5
            }"#,
        )
        .unwrap();

        assert_eq!(technical.rsi_14, Some(69.32));
        assert_eq!(technical.macd_signal, Some(2.59));
        assert_eq!(technical.bollinger.upper, Some(710.5));
        assert_eq!(technical.bollinger.lower, Some(660.0));
        assert!(technical.bollinger.width.is_none());
        assert_eq!(technical.stochastic_k, Some(81.0));
        assert!(technical.stochastic_d.is_none());
        assert_eq!(technical.williams_r, Some(-12.5));
    }

    #[test]
    fn test_sector_camel_case_aliases() {
        let sector: SectorRecord = serde_json::from_str(
            r#"{"sector": "Metals", "rank": 2, "dayChangePercent": 1.2, "gainersCount": 9}"#,
        )
        .unwrap();

        assert_eq!(sector.sector.as_deref(), Some("Metals"));
        assert_eq!(sector.rank, Some(2));
        assert_eq!(sector.day_change_percent, Some(1.2));
        assert_eq!(sector.gainers_count, Some(9));
        assert!(sector.losers_count.is_none());
    }
}
