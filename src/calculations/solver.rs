//! Root finding for goal timing and required contributions
//!
//! Decimal money has no logarithm, so time-to-target is found by stepping the
//! balance forward one month at a time, and the required contribution by
//! bisection over the contribution amount.

use chrono::NaiveDate;
use log::{debug, trace};
use rust_decimal::Decimal;

use super::calendar::{today, whole_months_between};
use super::compound::future_value;
use crate::constants::{
    CONTRIBUTION_TOLERANCE, MAX_PROJECTION_MONTHS, REQUIRED_CONTRIBUTION_MAX_ITERATIONS,
};
use crate::money::{monthly_rate, Money, Rate};

/// Months until the balance reaches `target_amount`, or `None` if it cannot
/// within the 600-month horizon.
pub fn months_to_reach_target(
    target_amount: Money,
    present_value: Money,
    monthly_contribution: Money,
    annual_rate: Rate,
) -> Option<u32> {
    months_to_reach_target_within(
        target_amount,
        present_value,
        monthly_contribution,
        annual_rate,
        MAX_PROJECTION_MONTHS,
    )
}

/// Same as [`months_to_reach_target`] with an explicit horizon.
///
/// Each month interest is credited on the running balance, then the
/// contribution is added. Returns `Some(0)` when already at target and `None`
/// immediately when neither contributions nor growth can move the balance.
pub fn months_to_reach_target_within(
    target_amount: Money,
    present_value: Money,
    monthly_contribution: Money,
    annual_rate: Rate,
    max_months: u32,
) -> Option<u32> {
    if present_value >= target_amount {
        return Some(0);
    }

    if monthly_contribution <= Decimal::ZERO && annual_rate <= Decimal::ZERO {
        return None;
    }

    let rate = monthly_rate(annual_rate);
    let mut balance = present_value;
    let mut months = 0u32;

    while balance < target_amount && months < max_months {
        let interest = balance.saturating_mul(rate);
        balance = balance
            .saturating_add(interest)
            .saturating_add(monthly_contribution);
        months += 1;
    }

    if balance >= target_amount {
        Some(months)
    } else {
        trace!(
            "target {} not reached in {} months, balance {}",
            target_amount,
            max_months,
            balance
        );
        None
    }
}

/// Monthly contribution needed to reach `target_amount` by `target_date`,
/// counting months from today.
pub fn required_monthly_contribution(
    target_amount: Money,
    present_value: Money,
    target_date: NaiveDate,
    annual_rate: Rate,
) -> Option<Money> {
    required_monthly_contribution_from(
        target_amount,
        present_value,
        today(),
        target_date,
        annual_rate,
    )
}

/// Monthly contribution needed to reach `target_amount` by `target_date`,
/// counting whole months from `from`.
///
/// Returns `Some(0)` when already funded and `None` when the target date is
/// not at least one whole month away. At a zero rate the gap is split evenly.
/// Otherwise bisects over `[0, gap]` (the gap is enough even with no growth)
/// until the projected value is within the $1 tolerance or the iteration cap
/// is hit, in which case the final bracket midpoint is returned.
pub fn required_monthly_contribution_from(
    target_amount: Money,
    present_value: Money,
    from: NaiveDate,
    target_date: NaiveDate,
    annual_rate: Rate,
) -> Option<Money> {
    if present_value >= target_amount {
        return Some(Decimal::ZERO);
    }

    let months = whole_months_between(from, target_date);
    if months <= 0 {
        return None;
    }

    let gap = target_amount - present_value;

    if monthly_rate(annual_rate).is_zero() {
        return Some(gap / Decimal::from(months));
    }

    let two = Decimal::TWO;
    let mut low = Decimal::ZERO;
    let mut high = gap;

    for iteration in 0..REQUIRED_CONTRIBUTION_MAX_ITERATIONS {
        let mid = (low + high) / two;
        let projected = future_value(present_value, mid, annual_rate, months);

        if (projected - target_amount).abs() < CONTRIBUTION_TOLERANCE {
            debug!(
                "required contribution {} over {} months found after {} iterations",
                mid,
                months,
                iteration + 1
            );
            return Some(mid);
        }

        if projected < target_amount {
            low = mid;
        } else {
            high = mid;
        }
    }

    let mid = (low + high) / two;
    debug!(
        "required contribution search hit the iteration cap, using {} over {} months",
        mid, months
    );
    Some(mid)
}
