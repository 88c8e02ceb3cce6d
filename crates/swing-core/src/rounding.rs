//! Two-decimal rounding shared by every stored percentage and amount.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept for stored amounts, percentages and ratios.
pub const STORED_DP: u32 = 2;

/// Round a money amount or percentage to two places, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(STORED_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a float to `dp` decimal places, halves away from zero.
pub fn round_to(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}
