//! Goal projection engine and its input/output types

mod engine;
mod types;
mod warnings;

pub use engine::{EngineConfig, ProjectionEngine, ScenarioComparison};
pub use types::{EngineInput, EngineOutput, GoalProjection};
pub use warnings::EngineWarning;
