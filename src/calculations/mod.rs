//! Pure financial formulas used by the projection engine
//!
//! Every function here is stateless and total: situations with no answer
//! (unreachable targets, target dates already past) come back as `None`,
//! never as a panic or an error.

mod calendar;
mod compound;
mod solver;

pub use calendar::{completion_date, completion_date_from_today, today, whole_months_between};
pub use compound::{future_value, inflation_adjusted};
pub use solver::{
    months_to_reach_target, months_to_reach_target_within, required_monthly_contribution,
    required_monthly_contribution_from,
};
