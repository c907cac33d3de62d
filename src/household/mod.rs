//! Household profile, savings goals, and plan loading

mod data;
pub mod loader;

pub use data::{resolve_return_rate, FinancialProfile, Goal, GoalType};
pub use loader::{load_goals_csv, load_goals_from_reader, load_plan, PlanFile};
