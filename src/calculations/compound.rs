//! Compound growth and inflation discounting

use rust_decimal::Decimal;

use crate::money::{decimal_pow, monthly_rate, Money, Rate};

/// Value after `months` of monthly compounding plus an end-of-month contribution.
///
/// FV = PV * (1+r)^n + C * ((1+r)^n - 1) / r, with r the monthly rate.
/// At a zero rate this is plain accumulation, PV + C * n. Non-positive
/// `months` return the present value unchanged.
pub fn future_value(
    present_value: Money,
    monthly_contribution: Money,
    annual_rate: Rate,
    months: i64,
) -> Money {
    if months <= 0 {
        return present_value;
    }

    let rate = monthly_rate(annual_rate);

    if rate.is_zero() {
        let contributed = monthly_contribution.saturating_mul(Decimal::from(months));
        return present_value.saturating_add(contributed);
    }

    let growth = decimal_pow(Decimal::ONE + rate, months);
    let grown_principal = present_value.saturating_mul(growth);
    let annuity_factor = (growth - Decimal::ONE)
        .checked_div(rate)
        .unwrap_or(Decimal::MAX);

    grown_principal.saturating_add(monthly_contribution.saturating_mul(annuity_factor))
}

/// Today's purchasing power of `amount` received `years` from now.
///
/// Returns `amount` unchanged when either `years` or `inflation_rate` is not
/// positive.
pub fn inflation_adjusted(amount: Money, years: i64, inflation_rate: Rate) -> Money {
    if years <= 0 || inflation_rate <= Decimal::ZERO {
        return amount;
    }

    let deflator = decimal_pow(Decimal::ONE + inflation_rate, years);
    amount.checked_div(deflator).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_INFLATION_RATE;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_months_returns_present_value() {
        assert_eq!(future_value(dec!(1000), dec!(100), dec!(0.07), 0), dec!(1000));
        assert_eq!(future_value(dec!(1000), dec!(100), dec!(0.07), -5), dec!(1000));
    }

    #[test]
    fn test_zero_rate_is_linear() {
        assert_eq!(future_value(dec!(1000), dec!(250), Decimal::ZERO, 12), dec!(4000));
    }

    #[test]
    fn test_single_month_compounding() {
        // 6% annual -> 0.5% monthly
        let fv = future_value(dec!(1000), dec!(100), dec!(0.06), 1);
        assert_eq!(fv, dec!(1105));
    }

    #[test]
    fn test_annuity_only() {
        // $500/month at 6% for 44 months
        let fv = future_value(Decimal::ZERO, dec!(500), dec!(0.06), 44);
        assert!(fv > dec!(24500) && fv < dec!(24600), "fv {}", fv);
    }

    #[test]
    fn test_matches_month_by_month_simulation() {
        let rate = dec!(0.07) / dec!(12);
        let mut balance = dec!(2500);
        for _ in 0..120 {
            balance = balance + balance * rate + dec!(300);
        }
        let fv = future_value(dec!(2500), dec!(300), dec!(0.07), 120);
        assert!((fv - balance).abs() < dec!(0.000001), "fv {} vs {}", fv, balance);
    }

    #[test]
    fn test_inflation_passthrough() {
        assert_eq!(inflation_adjusted(dec!(1000), 0, dec!(0.03)), dec!(1000));
        assert_eq!(inflation_adjusted(dec!(1000), 10, Decimal::ZERO), dec!(1000));
        assert_eq!(inflation_adjusted(dec!(1000), 10, dec!(-0.01)), dec!(1000));
    }

    #[test]
    fn test_inflation_discount() {
        assert_eq!(inflation_adjusted(dec!(1102.5), 2, dec!(0.05)), dec!(1000));

        let real = inflation_adjusted(dec!(100000), 20, DEFAULT_INFLATION_RATE);
        assert!(real > dec!(55000) && real < dec!(56000), "real {}", real);
    }

    proptest! {
        #[test]
        fn prop_non_positive_months_identity(
            pv in 0i64..10_000_000,
            c in 0i64..100_000,
            months in -600i64..=0,
        ) {
            let pv = Decimal::new(pv, 2);
            let c = Decimal::new(c, 2);
            prop_assert_eq!(future_value(pv, c, dec!(0.07), months), pv);
        }

        #[test]
        fn prop_zero_rate_exact(pv in 0i64..10_000_000, c in 0i64..100_000, months in 1i64..=600) {
            let pv = Decimal::new(pv, 2);
            let c = Decimal::new(c, 2);
            prop_assert_eq!(
                future_value(pv, c, Decimal::ZERO, months),
                pv + c * Decimal::from(months)
            );
        }

        #[test]
        fn prop_growth_never_hurts(
            pv in 0i64..10_000_000,
            c in 0i64..100_000,
            months in 1i64..=600,
            bp in 1i64..2000,
        ) {
            let pv = Decimal::new(pv, 2);
            let c = Decimal::new(c, 2);
            let rate = Decimal::new(bp, 4);
            let grown = future_value(pv, c, rate, months);
            let flat = future_value(pv, c, Decimal::ZERO, months);
            prop_assert!(grown >= flat - dec!(0.000001), "grown {} flat {}", grown, flat);
        }
    }
}
