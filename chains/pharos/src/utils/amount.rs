//! Token amount helpers. All balance arithmetic stays in `U256`.

use anyhow::{Context, Result};
use core_logic::Bounds;
use ethers::types::U256;
use ethers::utils::{format_ether, parse_ether};
use rand::Rng;

pub const BASIS_POINTS: u64 = 10_000;

/// `round(percent * 100)`, clamped to `[0, 10_000]`.
pub fn to_basis_points(percent: f64) -> u64 {
    if !percent.is_finite() || percent <= 0.0 {
        return 0;
    }
    ((percent * 100.0).round() as u64).min(BASIS_POINTS)
}

/// `floor(balance * round(percent * 100) / 10_000)`; never exceeds `balance`.
pub fn percent_of(balance: U256, percent: f64) -> U256 {
    let bps = U256::from(to_basis_points(percent));
    let scale = U256::from(BASIS_POINTS);
    // split so the multiply cannot overflow for any balance
    let (whole, rest) = balance.div_mod(scale);
    whole * bps + rest * bps / scale
}

/// Ether range converted to wei once, `(min, max)`
pub fn wei_bounds(bounds: &Bounds<f64>) -> Result<(U256, U256)> {
    let min = parse_ether(bounds.min).with_context(|| format!("Invalid amount {}", bounds.min))?;
    let max = parse_ether(bounds.max).with_context(|| format!("Invalid amount {}", bounds.max))?;
    Ok((min, max))
}

/// Uniform wei amount within an ether range
pub fn random_wei(bounds: &Bounds<f64>) -> Result<U256> {
    let (min, max) = wei_bounds(bounds)?;
    if min >= max {
        return Ok(min);
    }
    if max > U256::from(u128::MAX) {
        anyhow::bail!("Amount {} exceeds the supported range", bounds.max);
    }
    let (lo, hi) = (min.as_u128(), max.as_u128());
    Ok(U256::from(rand::thread_rng().gen_range(lo..=hi)))
}

/// Wei rendered in ether for log lines
pub fn display_ether(amount: U256) -> String {
    format_ether(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basis_points_rounding() {
        assert_eq!(to_basis_points(5.0), 500);
        assert_eq!(to_basis_points(7.256), 726);
        assert_eq!(to_basis_points(0.004), 0);
        assert_eq!(to_basis_points(100.0), 10_000);
        assert_eq!(to_basis_points(250.0), 10_000);
        assert_eq!(to_basis_points(-3.0), 0);
        assert_eq!(to_basis_points(f64::NAN), 0);
    }

    #[test]
    fn test_percent_of_floors() {
        assert_eq!(percent_of(U256::from(1_000u64), 5.0), U256::from(50u64));
        // 999 * 550 / 10000 = 54.945
        assert_eq!(percent_of(U256::from(999u64), 5.5), U256::from(54u64));
        assert_eq!(percent_of(U256::zero(), 10.0), U256::zero());
    }

    #[test]
    fn test_percent_of_matches_formula_for_large_balances() {
        let balance = U256::from_dec_str("123456789012345678901234567890").unwrap();
        for percent in [5.0, 6.37, 9.99, 10.0] {
            let expected = balance * U256::from((percent * 100.0f64).round() as u64)
                / U256::from(10_000u64);
            assert_eq!(percent_of(balance, percent), expected);
        }
    }

    #[test]
    fn test_percent_of_never_exceeds_balance() {
        assert_eq!(percent_of(U256::MAX, 100.0), U256::MAX);
        assert_eq!(percent_of(U256::MAX, 400.0), U256::MAX);
        assert!(percent_of(U256::MAX, 99.99) < U256::MAX);
    }

    #[test]
    fn test_random_wei_in_range() {
        let bounds = Bounds::new(0.001, 0.002);
        let (min, max) = wei_bounds(&bounds).unwrap();
        assert_eq!(min, U256::exp10(15));
        assert_eq!(max, U256::exp10(15) * 2);
        for _ in 0..200 {
            let amount = random_wei(&bounds).unwrap();
            assert!(amount >= min && amount <= max);
        }
    }

    #[test]
    fn test_random_wei_fixed() {
        let amount = random_wei(&Bounds::fixed(0.5)).unwrap();
        assert_eq!(display_ether(amount), "0.500000000000000000");
    }
}
