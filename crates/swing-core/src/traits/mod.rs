//! Core traits for the dashboard.

mod price_source;

pub use price_source::{PriceSource, StaticPriceSource};
