//! Core records, errors and traits for the swing-trading dashboard.
//!
//! This crate provides the shared building blocks including:
//! - Upstream market records (quote, technical, sector)
//! - The entry indicator snapshot and the trade record it annotates
//! - Position and portfolio documents refreshed from live prices
//! - The price source trait implemented by the data layer

pub mod clock;
pub mod error;
pub mod rounding;
pub mod traits;
pub mod types;

pub use error::{DataError, PositionError, SwingError, SwingResult};
pub use traits::*;
pub use types::*;
