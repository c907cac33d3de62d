//! Exact base-10 money arithmetic
//!
//! All monetary values and rates are `rust_decimal::Decimal`. Binary floating
//! point never enters a formula; powers are built from repeated exact
//! multiplication instead of a transcendental `pow`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::MONTHS_PER_YEAR;

/// Monetary amount
pub type Money = Decimal;

/// Rate expressed as a decimal fraction (0.07 = 7%)
pub type Rate = Decimal;

/// Raise `base` to an integer power by square-and-multiply.
///
/// Negative exponents return the reciprocal of the positive power. Results
/// that overflow the 96-bit mantissa saturate to `Decimal::MAX`, as does the
/// reciprocal of a zero power.
pub fn decimal_pow(base: Decimal, exponent: i64) -> Decimal {
    if exponent == 0 {
        return Decimal::ONE;
    }

    let positive = positive_pow(base, exponent.unsigned_abs());

    if exponent > 0 {
        positive
    } else {
        Decimal::ONE.checked_div(positive).unwrap_or(Decimal::MAX)
    }
}

fn positive_pow(base: Decimal, mut exponent: u64) -> Decimal {
    let mut result = Decimal::ONE;
    let mut factor = base;

    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.saturating_mul(factor);
        }
        exponent >>= 1;
        if exponent > 0 {
            factor = factor.saturating_mul(factor);
        }
    }

    result
}

/// Convert an annual rate to the equivalent nominal monthly rate
pub fn monthly_rate(annual_rate: Rate) -> Rate {
    annual_rate / Decimal::from(MONTHS_PER_YEAR)
}

/// Round to whole cents, midpoint away from zero. Display and export only.
pub fn round_cents(amount: Money) -> Money {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pow_zero_exponent_is_one() {
        assert_eq!(decimal_pow(dec!(1.005), 0), Decimal::ONE);
        assert_eq!(decimal_pow(Decimal::ZERO, 0), Decimal::ONE);
    }

    #[test]
    fn test_pow_is_exact() {
        assert_eq!(decimal_pow(dec!(1.1), 2), dec!(1.21));
        assert_eq!(decimal_pow(dec!(1.05), 3), dec!(1.157625));
        assert_eq!(decimal_pow(dec!(2), 10), dec!(1024));
    }

    #[test]
    fn test_pow_negative_exponent_is_reciprocal() {
        assert_eq!(decimal_pow(dec!(2), -2), dec!(0.25));
        assert_eq!(decimal_pow(dec!(1.25), -1), dec!(0.8));
    }

    #[test]
    fn test_pow_of_zero_negative_exponent_saturates() {
        assert_eq!(decimal_pow(Decimal::ZERO, -3), Decimal::MAX);
    }

    #[test]
    fn test_pow_overflow_saturates() {
        assert_eq!(decimal_pow(dec!(10), 40), Decimal::MAX);
    }

    #[test]
    fn test_pow_matches_repeated_multiplication() {
        let base = dec!(1.005);
        let mut expected = Decimal::ONE;
        for _ in 0..12 {
            expected *= base;
        }
        let diff = (decimal_pow(base, 12) - expected).abs();
        assert!(diff < dec!(0.0000000000000000001), "diff {}", diff);
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(0.06)), dec!(0.005));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(dec!(10.005)), dec!(10.01));
        assert_eq!(round_cents(dec!(10.004)), dec!(10.00));
        assert_eq!(round_cents(dec!(-2.345)), dec!(-2.35));
    }
}
