//! Indicator snapshot builder.

use chrono::{DateTime, FixedOffset};
use swing_core::clock::market_now;
use swing_core::rounding::round_to;
use swing_core::{
    BollingerSnapshot, DayPerformance, IndicatorSnapshot, MacdSnapshot, Momentum, MovingAverages,
    PriceLevels, QuoteRecord, TechnicalRecord, Volatility, VolumeData,
};
use tracing::debug;

use crate::classify::{classify_breakout, classify_macd, macd_trend};

/// Decimal places of the volume and buy/sell ratios.
const RATIO_DP: u32 = 2;

/// Capture the indicators for an entry at `entry_price`, stamped now.
pub fn build_snapshot(
    entry_price: f64,
    quote: &QuoteRecord,
    technical: Option<&TechnicalRecord>,
) -> IndicatorSnapshot {
    build_snapshot_at(entry_price, quote, technical, market_now())
}

/// Capture the indicators for an entry at `entry_price`.
///
/// Never fails: a derived value is `None` whenever one of its inputs is
/// missing or its divisor is zero. Apart from `captured_at` the result
/// depends only on the arguments.
pub fn build_snapshot_at(
    entry_price: f64,
    quote: &QuoteRecord,
    technical: Option<&TechnicalRecord>,
    captured_at: DateTime<FixedOffset>,
) -> IndicatorSnapshot {
    let snapshot = IndicatorSnapshot {
        captured_at,
        entry_price,
        price_levels: price_levels(entry_price, quote),
        volume_data: volume_data(quote),
        day_performance: day_performance(entry_price, quote),
        rsi_14: technical.and_then(|t| t.rsi_14),
        macd: technical.map(macd),
        moving_averages: technical.map(|t| moving_averages(entry_price, t)),
        bollinger_bands: technical.map(bollinger_bands),
        volatility: technical.map(|t| volatility(entry_price, t)),
        momentum: technical.map(momentum),
        breakout_type: classify_breakout(entry_price, quote),
        macd_classification: technical.and_then(classify_macd),
    };

    debug!(
        entry_price,
        breakout = ?snapshot.breakout_type,
        macd = ?snapshot.macd_classification,
        technicals = technical.is_some(),
        "Captured entry indicators"
    );

    snapshot
}

/// `numerator / denominator * 100`, or `None` when not computable.
fn percent_of(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let percent = numerator / denominator * 100.0;
    percent.is_finite().then_some(percent)
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn price_levels(entry_price: f64, quote: &QuoteRecord) -> PriceLevels {
    PriceLevels {
        entry: entry_price,
        day_open: quote.open,
        day_high: quote.high,
        day_low: quote.low,
        previous_close: quote.previous_close,
        ltp_at_entry: quote.last_traded_price,
        week52_high: quote.year_high_price,
        week52_low: quote.year_low_price,
    }
}

fn volume_data(quote: &QuoteRecord) -> VolumeData {
    let volume_ratio = quote
        .volume
        .zip(nonzero(quote.avg_volume))
        .map(|(volume, avg)| round_to(volume / avg, RATIO_DP))
        .filter(|ratio| ratio.is_finite());

    let buy_sell_ratio = quote
        .total_buy_qty
        .zip(quote.total_sell_qty)
        .and_then(|(buy, sell)| {
            let total = buy + sell;
            (total > 0.0).then(|| round_to(buy / total, RATIO_DP))
        });

    VolumeData {
        entry_volume: quote.volume,
        avg_volume: quote.avg_volume,
        volume_ratio,
        total_buy_qty: quote.total_buy_qty,
        total_sell_qty: quote.total_sell_qty,
        buy_sell_ratio,
    }
}

fn day_performance(entry_price: f64, quote: &QuoteRecord) -> DayPerformance {
    DayPerformance {
        day_change: quote.day_change,
        day_change_percent: quote.day_change_percent,
        price_range: quote.high.zip(quote.low).map(|(high, low)| high - low),
        distance_from_open: nonzero(quote.open)
            .and_then(|open| percent_of(entry_price - open, open)),
        distance_from_52w_high: quote
            .year_high_price
            .and_then(|high| percent_of(high - entry_price, entry_price)),
        distance_from_52w_low: nonzero(quote.year_low_price)
            .and_then(|low| percent_of(entry_price - low, low)),
    }
}

fn macd(technical: &TechnicalRecord) -> MacdSnapshot {
    MacdSnapshot {
        macd: technical.macd,
        signal: technical.macd_signal,
        histogram: technical.macd_histogram,
        trend: macd_trend(technical),
    }
}

fn moving_averages(entry_price: f64, technical: &TechnicalRecord) -> MovingAverages {
    MovingAverages {
        ema_20: technical.ema_20,
        ema_50: technical.ema_50,
        sma_50: technical.sma_50,
        sma_200: technical.sma_200,
        price_vs_ema20: nonzero(technical.ema_20)
            .and_then(|ema| percent_of(entry_price - ema, ema)),
        price_vs_sma200: nonzero(technical.sma_200)
            .and_then(|sma| percent_of(entry_price - sma, sma)),
    }
}

fn bollinger_bands(technical: &TechnicalRecord) -> BollingerSnapshot {
    BollingerSnapshot {
        upper: technical.bollinger.upper,
        middle: technical.bollinger.middle,
        lower: technical.bollinger.lower,
        bb_width: technical.bollinger.width,
        price_position: None,
    }
}

fn volatility(entry_price: f64, technical: &TechnicalRecord) -> Volatility {
    Volatility {
        atr_14: technical.atr_14,
        atr_percent: technical
            .atr_14
            .and_then(|atr| percent_of(atr, entry_price)),
    }
}

fn momentum(technical: &TechnicalRecord) -> Momentum {
    Momentum {
        adx_14: technical.adx_14,
        williams_r: technical.williams_r,
        stochastic_k: technical.stochastic_k,
        stochastic_d: technical.stochastic_d,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;
    use swing_core::clock::market_offset;
    use swing_core::{BollingerInput, BreakoutType, MacdClassification, MacdTrend};

    fn captured_at() -> DateTime<FixedOffset> {
        market_offset()
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .unwrap()
    }

    fn sample_quote() -> QuoteRecord {
        QuoteRecord {
            open: Some(682.0),
            high: Some(701.0),
            low: Some(680.75),
            previous_close: Some(680.75),
            last_traded_price: Some(692.0),
            volume: Some(20_800_000.0),
            avg_volume: None,
            year_high_price: Some(696.9),
            year_low_price: Some(378.15),
            day_change: Some(11.25),
            day_change_percent: Some(1.65),
            total_buy_qty: Some(150_000.0),
            total_sell_qty: Some(125_000.0),
        }
    }

    fn sample_technical() -> TechnicalRecord {
        TechnicalRecord {
            rsi_14: Some(69.32),
            macd: Some(7.94),
            macd_signal: Some(2.59),
            macd_histogram: Some(5.35),
            ema_20: Some(648.28),
            ema_50: Some(620.45),
            sma_50: Some(625.30),
            sma_200: Some(580.15),
            bollinger: BollingerInput {
                upper: Some(710.50),
                middle: Some(685.25),
                lower: Some(660.00),
                width: None,
            },
            atr_14: Some(18.50),
            adx_14: Some(32.5),
            williams_r: None,
            stochastic_k: None,
            stochastic_d: None,
        }
    }

    #[test]
    fn test_full_snapshot() {
        let quote = sample_quote();
        let technical = sample_technical();
        let snapshot = build_snapshot_at(692.0, &quote, Some(&technical), captured_at());

        assert_eq!(snapshot.entry_price, 692.0);
        assert_eq!(snapshot.price_levels.entry, 692.0);
        assert_eq!(snapshot.price_levels.previous_close, Some(680.75));
        assert_eq!(snapshot.price_levels.week52_high, Some(696.9));

        let day = snapshot.day_performance;
        assert_abs_diff_eq!(day.price_range.unwrap(), 20.25, epsilon = 1e-9);
        assert_abs_diff_eq!(day.distance_from_open.unwrap(), 1.466276, epsilon = 1e-5);
        assert_abs_diff_eq!(day.distance_from_52w_high.unwrap(), 0.708092, epsilon = 1e-5);
        assert_abs_diff_eq!(day.distance_from_52w_low.unwrap(), 82.996165, epsilon = 1e-5);

        assert_eq!(snapshot.volume_data.buy_sell_ratio, Some(0.55));
        assert_eq!(snapshot.volume_data.volume_ratio, None);

        assert_eq!(snapshot.rsi_14, Some(69.32));
        let macd = snapshot.macd.unwrap();
        assert_eq!(macd.trend, MacdTrend::Bullish);
        assert_eq!(macd.histogram, Some(5.35));

        let averages = snapshot.moving_averages.unwrap();
        assert_abs_diff_eq!(averages.price_vs_ema20.unwrap(), 6.744000, epsilon = 1e-3);
        assert_abs_diff_eq!(averages.price_vs_sma200.unwrap(), 19.279497, epsilon = 1e-3);

        let bands = snapshot.bollinger_bands.unwrap();
        assert_eq!(bands.upper, Some(710.5));
        assert_eq!(bands.price_position, None);

        let volatility = snapshot.volatility.unwrap();
        assert_abs_diff_eq!(volatility.atr_percent.unwrap(), 2.673410, epsilon = 1e-5);
        assert_eq!(snapshot.momentum.unwrap().adx_14, Some(32.5));

        assert_eq!(snapshot.breakout_type, Some(BreakoutType::FiftyTwoWeekHigh));
        assert_eq!(
            snapshot.macd_classification,
            Some(MacdClassification::BullishCrossover)
        );
    }

    #[test]
    fn test_without_technicals() {
        let snapshot = build_snapshot_at(692.0, &sample_quote(), None, captured_at());

        assert!(snapshot.rsi_14.is_none());
        assert!(snapshot.macd.is_none());
        assert!(snapshot.moving_averages.is_none());
        assert!(snapshot.bollinger_bands.is_none());
        assert!(snapshot.volatility.is_none());
        assert!(snapshot.momentum.is_none());
        assert!(snapshot.macd_classification.is_none());
        assert_eq!(snapshot.breakout_type, Some(BreakoutType::FiftyTwoWeekHigh));

        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("macd_12_26_9").is_none());
        assert!(value.get("macd_classification").is_none());
        assert!(value["volume_data"]["volume_ratio"].is_null());
    }

    #[test]
    fn test_empty_inputs_never_fail() {
        let snapshot = build_snapshot_at(
            0.0,
            &QuoteRecord::default(),
            Some(&TechnicalRecord::default()),
            captured_at(),
        );

        assert!(snapshot.breakout_type.is_none());
        assert!(snapshot.macd_classification.is_none());
        assert_eq!(snapshot.macd.unwrap().trend, MacdTrend::Bearish);
        assert!(snapshot.day_performance.price_range.is_none());
        assert!(snapshot.volatility.unwrap().atr_percent.is_none());
        assert!(snapshot.moving_averages.unwrap().price_vs_ema20.is_none());
    }

    #[test]
    fn test_zero_divisors_leave_fields_absent() {
        let quote = QuoteRecord {
            open: Some(0.0),
            year_high_price: Some(500.0),
            year_low_price: Some(0.0),
            ..Default::default()
        };
        let technical = TechnicalRecord {
            ema_20: Some(0.0),
            sma_200: Some(0.0),
            atr_14: Some(12.0),
            ..Default::default()
        };

        let snapshot = build_snapshot_at(0.0, &quote, Some(&technical), captured_at());
        let day = snapshot.day_performance;
        assert!(day.distance_from_open.is_none());
        assert!(day.distance_from_52w_high.is_none());
        assert!(day.distance_from_52w_low.is_none());
        assert!(snapshot.moving_averages.unwrap().price_vs_sma200.is_none());
        assert!(snapshot.volatility.unwrap().atr_percent.is_none());
    }

    #[test]
    fn test_volume_ratio() {
        let mut quote = QuoteRecord {
            volume: Some(1_000_000.0),
            avg_volume: Some(500_000.0),
            ..Default::default()
        };
        let snapshot = build_snapshot_at(100.0, &quote, None, captured_at());
        assert_eq!(snapshot.volume_data.volume_ratio, Some(2.0));

        quote.avg_volume = Some(0.0);
        let snapshot = build_snapshot_at(100.0, &quote, None, captured_at());
        assert_eq!(snapshot.volume_data.volume_ratio, None);

        quote.avg_volume = None;
        let snapshot = build_snapshot_at(100.0, &quote, None, captured_at());
        assert_eq!(snapshot.volume_data.volume_ratio, None);
    }

    #[test]
    fn test_buy_sell_ratio_needs_positive_book() {
        let quote = QuoteRecord {
            total_buy_qty: Some(0.0),
            total_sell_qty: Some(0.0),
            ..Default::default()
        };
        let snapshot = build_snapshot_at(100.0, &quote, None, captured_at());
        assert_eq!(snapshot.volume_data.buy_sell_ratio, None);

        let quote = QuoteRecord {
            total_buy_qty: Some(300.0),
            total_sell_qty: None,
            ..Default::default()
        };
        let snapshot = build_snapshot_at(100.0, &quote, None, captured_at());
        assert_eq!(snapshot.volume_data.buy_sell_ratio, None);
    }

    #[test]
    fn test_deterministic_apart_from_timestamp() {
        let quote = sample_quote();
        let technical = sample_technical();

        let first = build_snapshot_at(692.0, &quote, Some(&technical), captured_at());
        let second = build_snapshot_at(692.0, &quote, Some(&technical), captured_at());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let later = build_snapshot(692.0, &quote, Some(&technical));
        assert_eq!(
            IndicatorSnapshot {
                captured_at: first.captured_at,
                ..later
            },
            first
        );
    }

    #[test]
    fn test_every_presence_combination() {
        let full_quote = sample_quote();
        let full_technical = sample_technical();

        for mask in 0u32..(1 << 6) {
            let quote = QuoteRecord {
                open: full_quote.open.filter(|_| mask & 1 != 0),
                high: full_quote.high.filter(|_| mask & 2 != 0),
                low: full_quote.low.filter(|_| mask & 2 != 0),
                year_high_price: full_quote.year_high_price.filter(|_| mask & 4 != 0),
                year_low_price: full_quote.year_low_price.filter(|_| mask & 4 != 0),
                ..full_quote.clone()
            };
            let technical = TechnicalRecord {
                macd: full_technical.macd.filter(|_| mask & 8 != 0),
                macd_signal: full_technical.macd_signal.filter(|_| mask & 16 != 0),
                ..full_technical.clone()
            };
            let technical = (mask & 32 != 0).then_some(&technical);

            let snapshot = build_snapshot_at(692.0, &quote, technical, captured_at());
            assert_eq!(
                snapshot.breakout_type.is_some(),
                quote.year_high_price.is_some(),
                "mask={mask:#b}"
            );
            assert_eq!(
                snapshot.macd_classification.is_some(),
                technical.is_some() && mask & 24 == 24,
                "mask={mask:#b}"
            );
        }
    }
}
