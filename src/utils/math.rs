//! Fixed-point conversions used at the chain boundary

use anyhow::Result;
use rust_decimal::prelude::*;
use crate::config::OCTAS_PER_APT;

/// Percentage to basis points, truncated.
pub fn to_basis_points(percentage: f64) -> u64 {
    if percentage.is_finite() && percentage > 0.0 {
        (percentage * 100.0).floor() as u64
    } else {
        0
    }
}

/// APT amount to octas, truncated. Fails for negative amounts and amounts
/// that do not fit in a u64 octas field.
pub fn to_octas(amount: Decimal) -> Result<u64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        anyhow::bail!("Negative amount {} APT cannot be converted to octas", amount);
    }

    amount
        .checked_mul(Decimal::from(OCTAS_PER_APT))
        .and_then(|octas| octas.floor().to_u64())
        .ok_or_else(|| anyhow::anyhow!("Amount {} APT overflows u64 octas", amount))
}

pub fn octas_to_apt(octas: u64) -> Decimal {
    Decimal::from(octas) / Decimal::from(OCTAS_PER_APT)
}

/// `gas_used * gas_unit_price` octas expressed in APT.
pub fn gas_cost_apt(gas_used: u64, gas_unit_price: u64) -> Decimal {
    octas_to_apt(gas_used.saturating_mul(gas_unit_price))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn basis_points_truncate() {
        assert_eq!(to_basis_points(60.0), 6000);
        assert_eq!(to_basis_points(33.33339), 3333);
        assert_eq!(to_basis_points(-1.0), 0);
        assert_eq!(to_basis_points(f64::NAN), 0);
    }

    #[test]
    fn octas_round_trip() {
        assert_eq!(to_octas(dec!(1)).unwrap(), 100_000_000);
        assert_eq!(to_octas(dec!(600.123456789)).unwrap(), 60_012_345_678);
        assert_eq!(to_octas(Decimal::ZERO).unwrap(), 0);
        assert_eq!(octas_to_apt(150_000_000), dec!(1.5));
        assert!(to_octas(dec!(-5)).is_err());
    }

    #[test]
    fn oversized_amounts_are_errors_not_zero() {
        // 1e12 APT is 1e20 octas, past u64::MAX
        let err = to_octas(Decimal::from(1_000_000_000_000u64)).unwrap_err();
        assert!(err.to_string().contains("overflows"));

        // 1e22 APT overflows the Decimal multiplication itself
        assert!(to_octas(Decimal::from_i128_with_scale(10i128.pow(22), 0)).is_err());
        assert!(to_octas(Decimal::MAX).is_err());

        assert_eq!(to_octas(dec!(184467440737)).unwrap(), 18_446_744_073_700_000_000);
    }

    #[test]
    fn gas_cost_uses_unit_price() {
        assert_eq!(gas_cost_apt(1000, 100), dec!(0.001));
    }
}
