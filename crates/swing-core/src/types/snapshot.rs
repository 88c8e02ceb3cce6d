//! Entry indicator snapshot.
//!
//! A snapshot is captured once per trade entry and never changed after it
//! is built; a new capture produces a new snapshot. Fields inside each
//! section serialize as `null` when they could not be computed, while the
//! technical sections are left out entirely when no technical record was
//! supplied.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price levels around the entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevels {
    pub entry: f64,
    pub day_open: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub previous_close: Option<f64>,
    pub ltp_at_entry: Option<f64>,
    #[serde(rename = "52_week_high")]
    pub week52_high: Option<f64>,
    #[serde(rename = "52_week_low")]
    pub week52_low: Option<f64>,
}

/// Volume and order-book balance at entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeData {
    pub entry_volume: Option<f64>,
    pub avg_volume: Option<f64>,
    /// `entry_volume / avg_volume`, two places.
    pub volume_ratio: Option<f64>,
    pub total_buy_qty: Option<f64>,
    pub total_sell_qty: Option<f64>,
    /// Share of buy quantity in the book, two places.
    pub buy_sell_ratio: Option<f64>,
}

/// Intraday performance relative to the entry price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayPerformance {
    pub day_change: Option<f64>,
    pub day_change_percent: Option<f64>,
    pub price_range: Option<f64>,
    pub distance_from_open: Option<f64>,
    pub distance_from_52w_high: Option<f64>,
    pub distance_from_52w_low: Option<f64>,
}

/// MACD trend label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacdTrend {
    Bullish,
    Bearish,
}

/// MACD (12, 26, 9) values at entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdSnapshot {
    pub macd: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
    pub trend: MacdTrend,
}

/// Moving averages and the entry price's distance from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverages {
    pub ema_20: Option<f64>,
    pub ema_50: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub price_vs_ema20: Option<f64>,
    pub price_vs_sma200: Option<f64>,
}

/// Bollinger bands at entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerSnapshot {
    pub upper: Option<f64>,
    pub middle: Option<f64>,
    pub lower: Option<f64>,
    pub bb_width: Option<f64>,
    /// Where the entry sits inside the bands. Not computed yet; always `None`.
    pub price_position: Option<f64>,
}

/// Volatility at entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Volatility {
    pub atr_14: Option<f64>,
    pub atr_percent: Option<f64>,
}

/// Momentum oscillators at entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Momentum {
    pub adx_14: Option<f64>,
    pub williams_r: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub stochastic_d: Option<f64>,
}

/// How the entry relates to the 52-week high and the day's open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakoutType {
    /// Entry within 1% of the 52-week high.
    #[serde(rename = "52_week_high")]
    FiftyTwoWeekHigh,
    /// The day's high printed the 52-week high.
    #[serde(rename = "intraday_52w_high")]
    Intraday52WeekHigh,
    /// Entry more than 2% above the day's open.
    #[serde(rename = "gap_up")]
    GapUp,
    #[serde(rename = "intraday")]
    Intraday,
}

impl BreakoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakoutType::FiftyTwoWeekHigh => "52_week_high",
            BreakoutType::Intraday52WeekHigh => "intraday_52w_high",
            BreakoutType::GapUp => "gap_up",
            BreakoutType::Intraday => "intraday",
        }
    }
}

impl fmt::Display for BreakoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MACD line against its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacdClassification {
    BullishCrossover,
    Bullish,
    BearishCrossover,
    Bearish,
}

impl MacdClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            MacdClassification::BullishCrossover => "bullish_crossover",
            MacdClassification::Bullish => "bullish",
            MacdClassification::BearishCrossover => "bearish_crossover",
            MacdClassification::Bearish => "bearish",
        }
    }
}

impl fmt::Display for MacdClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indicators captured at the moment of trade entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub captured_at: DateTime<FixedOffset>,
    pub entry_price: f64,
    pub price_levels: PriceLevels,
    pub volume_data: VolumeData,
    pub day_performance: DayPerformance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsi_14: Option<f64>,
    #[serde(default, rename = "macd_12_26_9", skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moving_averages: Option<MovingAverages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bollinger_bands: Option<BollingerSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<Volatility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum: Option<Momentum>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakout_type: Option<BreakoutType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macd_classification: Option<MacdClassification>,
}
