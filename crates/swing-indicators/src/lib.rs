//! Entry indicator capture.
//!
//! This crate turns the raw market data available at the moment of a trade
//! entry into a structured [`IndicatorSnapshot`](swing_core::IndicatorSnapshot):
//! - Price levels, volume balance and intraday performance from the quote
//! - MACD, moving averages, Bollinger bands, volatility and momentum from
//!   the technical record
//! - Breakout and MACD classifications
//!
//! The snapshot is then attached to a trade record by [`annotate_trade`].
//! Everything here is pure: no I/O, no clock reads except in
//! [`build_snapshot`].

pub mod annotate;
pub mod classify;
pub mod snapshot;

pub use annotate::annotate_trade;
pub use classify::{classify_breakout, classify_macd, macd_trend};
pub use snapshot::{build_snapshot, build_snapshot_at};
