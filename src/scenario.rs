//! Scenario runner for side-by-side allocation comparisons
//!
//! Holds one household (profile and goals) and evaluates many candidate
//! allocations against it. Batches run in parallel; each run is an independent
//! pure calculation.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::allocation::Allocation;
use crate::constants::MIN_MEANINGFUL_CONTRIBUTION;
use crate::household::{FinancialProfile, Goal};
use crate::money::Money;
use crate::projection::{EngineInput, EngineOutput, GoalProjection, ProjectionEngine};

/// A named allocation, e.g. "current" or "pay off car first"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub allocation: Allocation,
}

impl Scenario {
    pub fn new(name: impl Into<String>, allocation: Allocation) -> Self {
        Self {
            name: name.into(),
            allocation,
        }
    }
}

/// Pre-loaded household for batch scenario evaluation
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(engine, profile, goals);
/// for (name, output) in runner.run_batch(&scenarios) {
///     println!("{}: {} warnings", name, output.warnings.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    profile: FinancialProfile,
    goals: Vec<Goal>,
}

impl ScenarioRunner {
    pub fn new(engine: ProjectionEngine, profile: FinancialProfile, goals: Vec<Goal>) -> Self {
        Self {
            engine,
            profile,
            goals,
        }
    }

    /// Runner for an existing engine input; its allocation is ignored
    pub fn from_input(engine: ProjectionEngine, input: &EngineInput) -> Self {
        Self::new(engine, input.profile.clone(), input.goals.clone())
    }

    fn input_for(&self, allocation: &Allocation) -> EngineInput {
        EngineInput::new(self.profile.clone(), self.goals.clone(), allocation.clone())
    }

    /// Run a single allocation
    pub fn run(&self, allocation: &Allocation) -> EngineOutput {
        self.engine.calculate(&self.input_for(allocation))
    }

    pub fn run_named(&self, scenario: &Scenario) -> (String, EngineOutput) {
        (scenario.name.clone(), self.run(&scenario.allocation))
    }

    /// Run many scenarios in parallel. Results keep the order of `scenarios`.
    pub fn run_batch(&self, scenarios: &[Scenario]) -> Vec<(String, EngineOutput)> {
        scenarios.par_iter().map(|s| self.run_named(s)).collect()
    }

    /// Projection of one goal at each candidate contribution, all other
    /// entries of `base` unchanged.
    ///
    /// Returns an empty list when the goal is unknown or inactive.
    pub fn contribution_sweep(
        &self,
        base: &Allocation,
        goal_id: &str,
        amounts: &[Money],
    ) -> Vec<(Money, GoalProjection)> {
        let Some(goal) = self.goals.iter().find(|g| g.id == goal_id && g.is_active) else {
            return Vec::new();
        };
        let input = self.input_for(base);

        amounts
            .par_iter()
            .filter_map(|amount| {
                let output = self.engine.simulate_allocation_change(&goal.id, *amount, &input);
                output
                    .projections
                    .get(&goal.id)
                    .cloned()
                    .map(|projection| (*amount, projection))
            })
            .collect()
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    pub fn profile(&self) -> &FinancialProfile {
        &self.profile
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }
}

/// `steps` evenly spaced contributions from the minimum meaningful amount up
/// to `max` inclusive
pub fn default_sweep_amounts(max: Money, steps: u32) -> Vec<Money> {
    if steps == 0 || max < MIN_MEANINGFUL_CONTRIBUTION {
        return Vec::new();
    }
    if steps == 1 {
        return vec![max];
    }

    let span = max - MIN_MEANINGFUL_CONTRIBUTION;
    let step = span / Decimal::from(steps - 1);

    (0..steps)
        .map(|i| MIN_MEANINGFUL_CONTRIBUTION + step * Decimal::from(i))
        .collect()
}
