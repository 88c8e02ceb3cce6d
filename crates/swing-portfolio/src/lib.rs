//! Live price refresh of open positions.
//!
//! Given a map of live prices, recomputes each position's value, P&L and
//! distances to its stop-loss and targets, then the portfolio totals.
//! Failures are per position: a bad position is reported and left as it
//! was while the rest of the pass carries on.

mod refresh;
mod report;

pub use refresh::{
    compute_totals, refresh_document, refresh_document_at, refresh_positions, update_position,
    PortfolioTotals, RefreshOutcome,
};
pub use report::{PositionLine, RefreshReport};
