//! Position refresh pass.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use swing_core::clock::format_last_updated;
use swing_core::rounding::round_money;
use swing_core::{PortfolioDocument, PortfolioSummary, PositionError, PositionRecord, PriceMap};
use tracing::{debug, info, warn};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Portfolio totals after a refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    /// Sum of unrealized P&L over every position, two places.
    pub total_pnl: Decimal,
    /// `total_pnl` as a percentage of deployed capital, zero with nothing deployed.
    pub total_pnl_percent: Decimal,
    /// Sum of the capital committed to every position.
    pub deployed_capital: Decimal,
    /// `YYYY-MM-DDTHH:MM:SS+05:30`
    pub last_updated: String,
}

impl PortfolioTotals {
    /// Write the totals into the document's aggregate record.
    pub fn apply_to(&self, summary: &mut PortfolioSummary) {
        summary.set_totals(self.total_pnl, self.total_pnl_percent, &self.last_updated);
    }
}

/// Result of one refresh pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshOutcome {
    pub totals: PortfolioTotals,
    /// Symbols whose derived fields were recomputed, in document order.
    pub updated: Vec<String>,
    /// Positions that could not be refreshed; they were left unmodified.
    pub errors: Vec<PositionError>,
}

impl RefreshOutcome {
    /// Whether every priced position was refreshed.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Recompute a position's derived fields from a live price.
///
/// The position is validated before anything is written, so on error it
/// is left exactly as it was.
pub fn update_position(position: &mut PositionRecord, price: Decimal) -> Result<(), PositionError> {
    let entry = position.entry_price();
    if entry <= Decimal::ZERO {
        return Err(PositionError::InvalidPosition {
            symbol: position.symbol().to_string(),
            entry_price: entry,
        });
    }
    if price <= Decimal::ZERO {
        return Err(PositionError::InvalidPrice {
            symbol: position.symbol().to_string(),
            price,
        });
    }

    let shares = position.resolved_shares();
    let distance = |numerator: Decimal| round_money(numerator / price * HUNDRED);
    let to_stop_loss = position.stop_loss().map(|sl| distance(price - sl));
    let to_target1 = position.target_1().map(|t1| distance(t1 - price));
    let to_target2 = position.target_2().map(|t2| distance(t2 - price));

    position.set_decimal(PositionRecord::CURRENT_PRICE, Some(price));
    position.set_decimal(
        PositionRecord::CURRENT_VALUE,
        Some(round_money(price * shares)),
    );
    position.set_decimal(
        PositionRecord::UNREALIZED_PNL,
        Some(round_money((price - entry) * shares)),
    );
    position.set_decimal(
        PositionRecord::PNL_PERCENT,
        Some(round_money((price - entry) / entry * HUNDRED)),
    );

    position.set_decimal(PositionRecord::DISTANCE_TO_SL_PERCENT, to_stop_loss);
    position.set_decimal(PositionRecord::DISTANCE_TO_T1_PERCENT, to_target1);
    position.set_decimal(PositionRecord::DISTANCE_TO_T2_PERCENT, to_target2);

    Ok(())
}

/// Totals over the current positions, stamped with `now`.
pub fn compute_totals<Tz: TimeZone>(positions: &[PositionRecord], now: &DateTime<Tz>) -> PortfolioTotals {
    let total_unrealized: Decimal = positions.iter().map(|p| p.unrealized_pnl_or_zero()).sum();
    let deployed_capital: Decimal = positions.iter().map(|p| p.resolved_capital()).sum();

    let total_pnl_percent = if deployed_capital > Decimal::ZERO {
        round_money(total_unrealized / deployed_capital * HUNDRED)
    } else {
        Decimal::ZERO
    };

    PortfolioTotals {
        total_pnl: round_money(total_unrealized),
        total_pnl_percent,
        deployed_capital,
        last_updated: format_last_updated(now),
    }
}

/// Refresh every position that has a live price, then recompute totals.
///
/// Positions without a price are passed through untouched but still count
/// towards the totals with their last known P&L.
pub fn refresh_positions<Tz: TimeZone>(
    positions: &mut [PositionRecord],
    prices: &PriceMap,
    now: &DateTime<Tz>,
) -> RefreshOutcome {
    let mut updated = Vec::new();
    let mut errors = Vec::new();

    for position in positions.iter_mut() {
        let Some(&price) = prices.get(position.symbol()) else {
            debug!(symbol = position.symbol(), "No live price, leaving position unchanged");
            continue;
        };

        match update_position(position, price) {
            Ok(()) => {
                let pnl = position.unrealized_pnl_or_zero();
                info!(
                    "{}: ₹{:.2} | P&L: {}₹{:.2}",
                    position.symbol(),
                    price,
                    if pnl >= Decimal::ZERO { "+" } else { "-" },
                    pnl.abs()
                );
                updated.push(position.symbol().to_string());
            }
            Err(err) => {
                warn!(symbol = position.symbol(), "Skipping position: {}", err);
                errors.push(err);
            }
        }
    }

    let totals = compute_totals(positions, now);
    debug!(
        total_pnl = %totals.total_pnl,
        total_pnl_percent = %totals.total_pnl_percent,
        deployed = %totals.deployed_capital,
        "Recomputed portfolio totals"
    );

    RefreshOutcome {
        totals,
        updated,
        errors,
    }
}

/// Refresh a whole document against live prices, stamped at `now`.
pub fn refresh_document_at<Tz: TimeZone>(
    document: &mut PortfolioDocument,
    prices: &PriceMap,
    now: &DateTime<Tz>,
) -> RefreshOutcome {
    let outcome = refresh_positions(&mut document.active_positions, prices, now);
    outcome.totals.apply_to(&mut document.portfolio);
    outcome
}

/// Refresh a whole document against live prices, stamped now.
pub fn refresh_document(document: &mut PortfolioDocument, prices: &PriceMap) -> RefreshOutcome {
    refresh_document_at(document, prices, &Utc::now())
}
