//! Breakout and MACD classification rules.

use swing_core::{BreakoutType, MacdClassification, MacdTrend, QuoteRecord, TechnicalRecord};

/// Entry within this fraction of the 52-week high counts as a 52-week-high breakout.
pub const NEAR_HIGH_THRESHOLD: f64 = 0.01;

/// Entry above `open * GAP_UP_FACTOR` counts as a gap up.
pub const GAP_UP_FACTOR: f64 = 1.02;

/// Classify the entry against the 52-week high and the day's open.
///
/// Returns `None` when the quote carries no 52-week high; otherwise exactly
/// one variant, first matching rule wins. A missing open compares as zero.
pub fn classify_breakout(entry_price: f64, quote: &QuoteRecord) -> Option<BreakoutType> {
    let year_high = quote.year_high_price?;

    let distance = (entry_price - year_high).abs() / entry_price;
    let breakout = if distance < NEAR_HIGH_THRESHOLD {
        BreakoutType::FiftyTwoWeekHigh
    } else if quote.high == Some(year_high) {
        BreakoutType::Intraday52WeekHigh
    } else if entry_price > quote.open.unwrap_or(0.0) * GAP_UP_FACTOR {
        BreakoutType::GapUp
    } else {
        BreakoutType::Intraday
    };

    Some(breakout)
}

/// MACD line above signal line, missing values compared as zero.
pub fn macd_trend(technical: &TechnicalRecord) -> MacdTrend {
    if technical.macd.unwrap_or(0.0) > technical.macd_signal.unwrap_or(0.0) {
        MacdTrend::Bullish
    } else {
        MacdTrend::Bearish
    }
}

/// Classify MACD against its signal line.
///
/// Requires both lines present and nonzero. The histogram defaults to
/// `macd - signal` when the record does not carry one.
pub fn classify_macd(technical: &TechnicalRecord) -> Option<MacdClassification> {
    let macd = technical.macd.filter(|v| *v != 0.0)?;
    let signal = technical.macd_signal.filter(|v| *v != 0.0)?;
    let histogram = technical.macd_histogram.unwrap_or(macd - signal);

    let classification = if macd > signal && histogram > 0.0 {
        MacdClassification::BullishCrossover
    } else if macd > signal {
        MacdClassification::Bullish
    } else if macd < signal && histogram < 0.0 {
        MacdClassification::BearishCrossover
    } else {
        MacdClassification::Bearish
    };

    Some(classification)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technical(macd: Option<f64>, signal: Option<f64>, histogram: Option<f64>) -> TechnicalRecord {
        TechnicalRecord {
            macd,
            macd_signal: signal,
            macd_histogram: histogram,
            ..Default::default()
        }
    }

    fn quote(open: Option<f64>, high: Option<f64>, year_high: Option<f64>) -> QuoteRecord {
        QuoteRecord {
            open,
            high,
            year_high_price: year_high,
            ..Default::default()
        }
    }

    #[test]
    fn test_macd_classification_table() {
        let cases = [
            ((10.0, 5.0, 5.0), MacdClassification::BullishCrossover),
            ((10.0, 5.0, -1.0), MacdClassification::Bullish),
            ((3.0, 8.0, -5.0), MacdClassification::BearishCrossover),
            ((3.0, 8.0, 1.0), MacdClassification::Bearish),
        ];

        for ((macd, signal, histogram), expected) in cases {
            let t = technical(Some(macd), Some(signal), Some(histogram));
            assert_eq!(classify_macd(&t), Some(expected), "macd={macd} signal={signal}");
        }
    }

    #[test]
    fn test_macd_histogram_defaults_to_difference() {
        let t = technical(Some(10.0), Some(5.0), None);
        assert_eq!(classify_macd(&t), Some(MacdClassification::BullishCrossover));

        let t = technical(Some(3.0), Some(8.0), None);
        assert_eq!(classify_macd(&t), Some(MacdClassification::BearishCrossover));
    }

    #[test]
    fn test_macd_equal_lines_are_bearish() {
        let t = technical(Some(4.0), Some(4.0), None);
        assert_eq!(classify_macd(&t), Some(MacdClassification::Bearish));
    }

    #[test]
    fn test_macd_requires_nonzero_lines() {
        assert_eq!(classify_macd(&technical(None, Some(5.0), None)), None);
        assert_eq!(classify_macd(&technical(Some(5.0), None, None)), None);
        assert_eq!(classify_macd(&technical(Some(0.0), Some(5.0), None)), None);
        assert_eq!(classify_macd(&technical(Some(5.0), Some(0.0), None)), None);
    }

    #[test]
    fn test_macd_trend_defaults_missing_to_zero() {
        assert_eq!(macd_trend(&technical(Some(1.0), None, None)), MacdTrend::Bullish);
        assert_eq!(macd_trend(&technical(None, Some(1.0), None)), MacdTrend::Bearish);
        assert_eq!(macd_trend(&technical(None, None, None)), MacdTrend::Bearish);
        assert_eq!(macd_trend(&technical(Some(-2.0), None, None)), MacdTrend::Bearish);
    }

    #[test]
    fn test_breakout_requires_year_high() {
        assert_eq!(classify_breakout(692.0, &quote(Some(682.0), Some(701.0), None)), None);
    }

    #[test]
    fn test_breakout_near_year_high() {
        // |692 - 696.9| / 692 = 0.7%
        let q = quote(Some(682.0), Some(701.0), Some(696.9));
        assert_eq!(classify_breakout(692.0, &q), Some(BreakoutType::FiftyTwoWeekHigh));
    }

    #[test]
    fn test_breakout_intraday_year_high() {
        let q = quote(Some(640.0), Some(720.0), Some(720.0));
        assert_eq!(classify_breakout(650.0, &q), Some(BreakoutType::Intraday52WeekHigh));
    }

    #[test]
    fn test_breakout_gap_up() {
        // 650 > 630 * 1.02 = 642.6
        let q = quote(Some(630.0), Some(660.0), Some(800.0));
        assert_eq!(classify_breakout(650.0, &q), Some(BreakoutType::GapUp));
    }

    #[test]
    fn test_breakout_intraday() {
        // 650 <= 640 * 1.02 = 652.8
        let q = quote(Some(640.0), Some(660.0), Some(800.0));
        assert_eq!(classify_breakout(650.0, &q), Some(BreakoutType::Intraday));
    }

    #[test]
    fn test_breakout_missing_open_compares_as_zero() {
        let q = quote(None, Some(660.0), Some(800.0));
        assert_eq!(classify_breakout(650.0, &q), Some(BreakoutType::GapUp));
    }

    #[test]
    fn test_breakout_zero_entry_is_total() {
        let q = quote(None, None, Some(0.0));
        assert_eq!(classify_breakout(0.0, &q), Some(BreakoutType::Intraday));
    }
}
