//! sBTC looping yield model

use alpha_core::numeric::round_dp;
use alpha_core::YieldData;

pub const DEFAULT_BASE_APY: f64 = 5.0;

/// Share of each deposit that is borrowed and re-deposited
const BORROW_RATIO: f64 = 0.8;

/// Deposit rounds, including the initial one
const ITERATIONS: u32 = 5;

/// Annual cost of borrowed capital
const BORROW_COST_RATE: f64 = 0.02;

/// Model leveraged looping: deposit, borrow 80% against it, re-deposit, five
/// rounds in total
pub fn calculate_yield(base_apy: f64) -> YieldData {
    let mut deposit = 1.0;
    let mut multiple = 0.0;
    for _ in 0..ITERATIONS {
        multiple += deposit;
        deposit *= BORROW_RATIO;
    }

    let effective_apy = base_apy * multiple - BORROW_COST_RATE * (multiple - 1.0) * 100.0;
    let liquidation_threshold = 100.0 / multiple;

    YieldData {
        effective_apy: round_dp(effective_apy, 2),
        collateral_multiple: round_dp(multiple, 2),
        liquidation_risk: format!("{:.2}% price-drop buffer", liquidation_threshold),
        base_apy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_loop() {
        let data = calculate_yield(DEFAULT_BASE_APY);
        assert_eq!(data.collateral_multiple, 3.36);
        assert_eq!(data.effective_apy, 12.08);
        assert_eq!(data.liquidation_risk, "29.75% price-drop buffer");
        assert_eq!(data.base_apy, 5.0);
        assert_eq!(data.liquidation_threshold_percent(), Some(29.75));
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(calculate_yield(4.2), calculate_yield(4.2));
    }

    #[test]
    fn test_zero_base_apy_is_borrow_cost_only() {
        let data = calculate_yield(0.0);
        assert_eq!(data.effective_apy, -4.72);
    }
}
