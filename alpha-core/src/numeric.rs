//! Fixed-precision rounding for reported figures

use rust_decimal::prelude::*;

/// Decimal places used for reported prices
pub const PRICE_DP: u32 = 6;

/// Decimal places used for reported percentages (spread, deviation)
pub const PERCENT_DP: u32 = 4;

/// Round a float to `dp` decimal places, half away from zero.
///
/// Goes through `Decimal` so that values like `2.675` round the way they read
/// rather than the way their binary representation falls. Non-finite values are
/// returned untouched.
pub fn round_dp(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_dp() {
        assert_eq!(round_dp(1.23456789, 6), 1.234568);
        assert_eq!(round_dp(2.675, 2), 2.68);
        assert_eq!(round_dp(-0.00005, 4), -0.0001);
        assert_eq!(round_dp(100.0, 6), 100.0);
    }

    #[test]
    fn test_round_dp_non_finite() {
        assert!(round_dp(f64::NAN, 2).is_nan());
        assert_eq!(round_dp(f64::INFINITY, 2), f64::INFINITY);
    }
}
