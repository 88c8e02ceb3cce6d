//! Refresh report generation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use swing_core::PortfolioDocument;

use crate::{PortfolioTotals, RefreshOutcome};

/// One refreshed position as shown in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionLine {
    pub symbol: String,
    pub current_price: Decimal,
    pub unrealized_pnl: Decimal,
    pub pnl_percent: Decimal,
}

/// Summary of a refresh pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Positions refreshed in this pass
    pub positions: Vec<PositionLine>,
    /// Symbols held but not priced in this pass
    pub unpriced: Vec<String>,
    /// Per-position failures, as display strings
    pub errors: Vec<String>,
    /// Portfolio totals after the pass
    pub totals: PortfolioTotals,
}

impl RefreshReport {
    /// Build a report from a refreshed document and the pass outcome.
    pub fn new(document: &PortfolioDocument, outcome: &RefreshOutcome) -> Self {
        let failed: Vec<&str> = outcome.errors.iter().map(|e| e.symbol()).collect();

        let mut positions = Vec::new();
        let mut unpriced = Vec::new();
        for position in &document.active_positions {
            let symbol = position.symbol();
            if outcome.updated.iter().any(|s| s == symbol) {
                positions.push(PositionLine {
                    symbol: symbol.to_string(),
                    current_price: position.current_price().unwrap_or_default(),
                    unrealized_pnl: position.unrealized_pnl_or_zero(),
                    pnl_percent: position.pnl_percent().unwrap_or_default(),
                });
            } else if !failed.contains(&symbol) {
                unpriced.push(symbol.to_string());
            }
        }

        Self {
            positions,
            unpriced,
            errors: outcome.errors.iter().map(ToString::to_string).collect(),
            totals: outcome.totals.clone(),
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                   PORTFOLIO REFRESH                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("POSITIONS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        if self.positions.is_empty() {
            s.push_str("  (none refreshed)\n");
        }
        for line in &self.positions {
            s.push_str(&format!(
                "  {:<12} ₹{:>10.2}   P&L: {}   ({:.2}%)\n",
                line.symbol,
                line.current_price,
                signed_rupees(line.unrealized_pnl),
                line.pnl_percent
            ));
        }
        for symbol in &self.unpriced {
            s.push_str(&format!("  {:<12} no live price\n", symbol));
        }
        s.push('\n');

        if !self.errors.is_empty() {
            s.push_str("ERRORS\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for error in &self.errors {
                s.push_str(&format!("  {}\n", error));
            }
            s.push('\n');
        }

        s.push_str("PORTFOLIO\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Deployed Capital:    ₹{:.2}\n",
            self.totals.deployed_capital
        ));
        s.push_str(&format!(
            "  Total P&L:           {}\n",
            signed_rupees(self.totals.total_pnl)
        ));
        s.push_str(&format!(
            "  Total P&L %:         {:.2}%\n",
            self.totals.total_pnl_percent
        ));
        s.push_str(&format!(
            "  Last Updated:        {}\n",
            self.totals.last_updated
        ));
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn signed_rupees(amount: Decimal) -> String {
    let sign = if amount >= Decimal::ZERO { "+" } else { "-" };
    format!("{}₹{:.2}", sign, amount.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh_document_at;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use swing_core::{PositionRecord, PriceMap};

    fn refreshed() -> (PortfolioDocument, RefreshOutcome) {
        let mut document = PortfolioDocument::with_positions(vec![
            PositionRecord::new("HINDZINC", dec!(680.75), dec!(10)).with_capital(dec!(6807.50)),
            PositionRecord::new("HINDCOPPER", dec!(310.50), dec!(20)).with_capital(dec!(6210)),
            PositionRecord::new("BROKEN", Decimal::ZERO, dec!(1)),
        ]);
        let prices: PriceMap = [
            ("HINDZINC".to_string(), dec!(692.00)),
            ("BROKEN".to_string(), dec!(10)),
        ]
        .into_iter()
        .collect();
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 5, 0, 0).unwrap();
        let outcome = refresh_document_at(&mut document, &prices, &now);
        (document, outcome)
    }

    #[test]
    fn test_report_partitions_positions() {
        let (document, outcome) = refreshed();
        let report = RefreshReport::new(&document, &outcome);

        assert_eq!(report.positions.len(), 1);
        assert_eq!(report.positions[0].symbol, "HINDZINC");
        assert_eq!(report.positions[0].unrealized_pnl, dec!(112.50));
        assert_eq!(report.unpriced, vec!["HINDCOPPER".to_string()]);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("BROKEN"));
    }

    #[test]
    fn test_report_summary() {
        let (document, outcome) = refreshed();
        let summary = RefreshReport::new(&document, &outcome).summary();

        assert!(summary.contains("PORTFOLIO REFRESH"));
        assert!(summary.contains("HINDZINC"));
        assert!(summary.contains("+₹112.50"));
        assert!(summary.contains("(1.65%)"));
        assert!(summary.contains("HINDCOPPER   no live price"));
        assert!(summary.contains("ERRORS"));
        assert!(summary.contains("2024-01-15T10:30:00+05:30"));
    }

    #[test]
    fn test_signed_rupees() {
        assert_eq!(signed_rupees(dec!(62.5)), "+₹62.50");
        assert_eq!(signed_rupees(dec!(-50)), "-₹50.00");
        assert_eq!(signed_rupees(Decimal::ZERO), "+₹0.00");
    }

    #[test]
    fn test_report_to_json() {
        let (document, outcome) = refreshed();
        let json = RefreshReport::new(&document, &outcome).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["totals"]["total_pnl"], 112.5);
        assert_eq!(value["positions"][0]["symbol"], "HINDZINC");
    }
}
