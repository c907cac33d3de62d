//! Projection engine: runs the calculation library across a household's goals

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{EngineInput, EngineOutput, GoalProjection};
use super::warnings::EngineWarning;
use crate::allocation::Allocation;
use crate::calculations::{
    completion_date, future_value, months_to_reach_target_within,
    required_monthly_contribution_from, today,
};
use crate::constants::MAX_PROJECTION_MONTHS;
use crate::household::{FinancialProfile, Goal};
use crate::money::Money;

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Months to project before a goal is declared unreachable
    pub max_projection_months: u32,

    /// Date treated as "now" for completion dates and month counts.
    /// Today (UTC) when not set.
    pub as_of: Option<NaiveDate>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_projection_months: MAX_PROJECTION_MONTHS,
            as_of: None,
        }
    }
}

/// Outputs of the same household under two allocations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub first: EngineOutput,
    pub second: EngineOutput,
}

impl ScenarioComparison {
    /// Months the first scenario takes beyond the second for one goal.
    /// Negative when the first finishes sooner. `None` unless both reach it.
    pub fn months_difference(&self, goal_id: &str) -> Option<i64> {
        let first = self.first.projection(goal_id)?.months_to_complete?;
        let second = self.second.projection(goal_id)?.months_to_complete?;
        Some(i64::from(first) - i64::from(second))
    }

    pub fn remaining_disposable_difference(&self) -> Money {
        self.first.remaining_disposable - self.second.remaining_disposable
    }
}

/// Stateless goal projection engine
///
/// Holds only its configuration; every operation is a pure function of its
/// arguments, so one engine can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: EngineConfig,
}

impl ProjectionEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine pinned to a fixed "now"
    pub fn as_of(date: NaiveDate) -> Self {
        Self::new(EngineConfig {
            as_of: Some(date),
            ..Default::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn reference_date(&self) -> NaiveDate {
        self.config.as_of.unwrap_or_else(today)
    }

    /// Project every active goal and collect plan warnings.
    ///
    /// Warnings are raised in a fixed order: negative disposable income,
    /// over-allocation, then per goal (in input order) missing contribution
    /// followed by unreachable. Inactive goals are skipped entirely.
    pub fn calculate(&self, input: &EngineInput) -> EngineOutput {
        let now = self.reference_date();
        let profile = &input.profile;
        let total_allocated = input.allocation.total_allocated();
        let disposable = profile.monthly_disposable();
        let mut warnings = Vec::new();

        debug!(
            "calculating {} goals, allocated {} of disposable {}",
            input.goals.len(),
            total_allocated,
            disposable
        );

        if profile.has_deficit() {
            warnings.push(EngineWarning::NegativeDisposable);
        }

        if total_allocated > disposable {
            warnings.push(EngineWarning::OverAllocated {
                excess: total_allocated - disposable,
            });
        }

        let mut projections = BTreeMap::new();

        for goal in input.goals.iter().filter(|g| g.is_active) {
            let contribution = input.allocation.amount_for(&goal.id);

            if contribution.is_zero() {
                warnings.push(EngineWarning::NoContributionForGoal {
                    goal_id: goal.id.clone(),
                    goal_name: goal.name.clone(),
                });
            }

            let projection = self.project_goal(goal, contribution, now);

            if !projection.is_reachable {
                warnings.push(EngineWarning::GoalUnreachable {
                    goal_id: goal.id.clone(),
                    goal_name: goal.name.clone(),
                });
            }

            projections.insert(goal.id.clone(), projection);
        }

        EngineOutput {
            projections,
            total_allocated,
            remaining_disposable: (disposable - total_allocated).max(Decimal::ZERO),
            warnings,
            calculated_at: Utc::now(),
        }
    }

    /// Project a single goal at the given monthly contribution
    pub fn calculate_goal_projection(
        &self,
        goal: &Goal,
        monthly_contribution: Money,
    ) -> GoalProjection {
        self.project_goal(goal, monthly_contribution, self.reference_date())
    }

    fn project_goal(
        &self,
        goal: &Goal,
        monthly_contribution: Money,
        now: NaiveDate,
    ) -> GoalProjection {
        if goal.is_complete() {
            return GoalProjection::complete(
                goal.id.clone(),
                goal.current_amount,
                monthly_contribution,
                now,
            );
        }

        let horizon = self.config.max_projection_months;
        let months = months_to_reach_target_within(
            goal.target_amount,
            goal.current_amount,
            monthly_contribution,
            goal.effective_return_rate,
            horizon,
        );

        match months {
            Some(months) => {
                debug!("goal '{}' reached in {} months", goal.id, months);
                GoalProjection {
                    goal_id: goal.id.clone(),
                    months_to_complete: Some(months),
                    completion_date: Some(completion_date(months, now)),
                    projected_final_value: goal.target_amount,
                    monthly_contribution,
                    is_reachable: true,
                }
            }
            None => {
                debug!("goal '{}' unreachable within {} months", goal.id, horizon);
                GoalProjection {
                    goal_id: goal.id.clone(),
                    months_to_complete: None,
                    completion_date: None,
                    projected_final_value: future_value(
                        goal.current_amount,
                        monthly_contribution,
                        goal.effective_return_rate,
                        i64::from(horizon),
                    ),
                    monthly_contribution,
                    is_reachable: false,
                }
            }
        }
    }

    /// Monthly contribution needed for `goal` to be funded by `target_date`
    pub fn required_monthly_contribution(
        &self,
        goal: &Goal,
        target_date: NaiveDate,
    ) -> Option<Money> {
        required_monthly_contribution_from(
            goal.target_amount,
            goal.current_amount,
            self.reference_date(),
            target_date,
            goal.effective_return_rate,
        )
    }

    /// Run the same household under two allocations
    pub fn compare_scenarios(
        &self,
        scenario_a: &Allocation,
        scenario_b: &Allocation,
        profile: &FinancialProfile,
        goals: &[Goal],
    ) -> ScenarioComparison {
        let run = |allocation: &Allocation| {
            self.calculate(&EngineInput::new(
                profile.clone(),
                goals.to_vec(),
                allocation.clone(),
            ))
        };

        ScenarioComparison {
            first: run(scenario_a),
            second: run(scenario_b),
        }
    }

    /// Recalculate as if one goal's allocation were `new_amount`.
    /// `input` is left untouched.
    pub fn simulate_allocation_change(
        &self,
        goal_id: &str,
        new_amount: Money,
        input: &EngineInput,
    ) -> EngineOutput {
        let changed = EngineInput {
            allocation: input.allocation.replaced(goal_id, new_amount),
            ..input.clone()
        };
        self.calculate(&changed)
    }
}
