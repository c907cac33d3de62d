//! Goal Projection - deterministic savings-goal projection engine
//!
//! This library provides:
//! - Exact decimal money arithmetic (no binary floating point anywhere)
//! - Future value, time-to-target, inflation and required-contribution formulas
//! - A stateless engine projecting every goal of a household under one allocation
//! - Plan warnings (over-allocation, deficits, unfunded or unreachable goals)
//! - Scenario comparison and parallel batch evaluation

pub mod allocation;
pub mod calculations;
pub mod constants;
pub mod error;
pub mod household;
pub mod money;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use allocation::Allocation;
pub use error::{PlannerError, Result};
pub use household::{FinancialProfile, Goal, GoalType};
pub use money::{Money, Rate};
pub use projection::{
    EngineConfig, EngineInput, EngineOutput, EngineWarning, GoalProjection, ProjectionEngine,
    ScenarioComparison,
};
pub use scenario::{Scenario, ScenarioRunner};
