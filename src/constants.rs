//! Default rates and solver limits

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::money::{Money, Rate};

pub const MONTHS_PER_YEAR: u32 = 12;

/// Projection horizon: 50 years. Goals not reached by then are unreachable.
pub const MAX_PROJECTION_MONTHS: u32 = 600;

/// Iteration cap for the required-contribution binary search
pub const REQUIRED_CONTRIBUTION_MAX_ITERATIONS: u32 = 50;

/// Binary search stops once the projected value is within this of the target
pub const CONTRIBUTION_TOLERANCE: Money = dec!(1.00);

/// Smallest monthly contribution treated as actually funding a goal
pub const MIN_MEANINGFUL_CONTRIBUTION: Money = dec!(1.00);

/// Long-run consumer price inflation assumption
pub const DEFAULT_INFLATION_RATE: Rate = dec!(0.03);

/// Fallback annual return when a goal type has no better default
pub const DEFAULT_RETURN_RATE: Rate = dec!(0.05);

// Annual return defaults by goal type
pub const EMERGENCY_FUND_RETURN_RATE: Rate = dec!(0.045);
pub const HOUSE_DOWN_PAYMENT_RETURN_RATE: Rate = dec!(0.045);
pub const RETIREMENT_RETURN_RATE: Rate = dec!(0.07);
pub const EDUCATION_RETURN_RATE: Rate = dec!(0.06);
pub const VACATION_RETURN_RATE: Rate = dec!(0.02);
pub const WEDDING_RETURN_RATE: Rate = dec!(0.02);
pub const VEHICLE_RETURN_RATE: Rate = dec!(0.03);
pub const DEBT_PAYOFF_RETURN_RATE: Rate = Decimal::ZERO;
