//! Engine input and output structures

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::warnings::EngineWarning;
use crate::allocation::Allocation;
use crate::error::{PlannerError, Result};
use crate::household::{FinancialProfile, Goal};
use crate::money::Money;

/// Everything one calculation needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineInput {
    pub profile: FinancialProfile,

    /// Goals in display order; projections and warnings follow this order
    pub goals: Vec<Goal>,

    /// Monthly contribution per goal id
    pub allocation: Allocation,
}

impl EngineInput {
    pub fn new(profile: FinancialProfile, goals: Vec<Goal>, allocation: Allocation) -> Self {
        Self {
            profile,
            goals,
            allocation,
        }
    }

    /// Check the preconditions the engine assumes.
    ///
    /// Negative money amounts and repeated goal ids are errors. Allocation
    /// entries for unknown goals are only logged: they still count toward
    /// the total allocated.
    pub fn validate(&self) -> Result<()> {
        let profile = &self.profile;
        for (field, amount) in [
            ("monthly_income", profile.monthly_income),
            ("monthly_needs", profile.monthly_needs),
            ("monthly_wants", profile.monthly_wants),
        ] {
            if amount < Decimal::ZERO {
                return Err(PlannerError::invalid(field, format!("{} is negative", amount)));
            }
        }

        let mut seen = HashSet::new();
        for goal in &self.goals {
            if !seen.insert(goal.id.as_str()) {
                return Err(PlannerError::DuplicateGoal(goal.id.clone()));
            }
            if goal.target_amount < Decimal::ZERO {
                return Err(PlannerError::invalid(
                    format!("target_amount of goal '{}'", goal.id),
                    "must not be negative",
                ));
            }
            if goal.current_amount < Decimal::ZERO {
                return Err(PlannerError::invalid(
                    format!("current_amount of goal '{}'", goal.id),
                    "must not be negative",
                ));
            }
        }

        for (goal_id, amount) in &self.allocation {
            if *amount < Decimal::ZERO {
                return Err(PlannerError::NegativeAllocation {
                    goal_id: goal_id.clone(),
                    amount: *amount,
                });
            }
            if !seen.contains(goal_id.as_str()) {
                warn!("allocation references unknown goal '{}'", goal_id);
            }
        }

        Ok(())
    }
}

/// Projected outcome for one goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProjection {
    pub goal_id: String,

    /// Months until the target is met; `None` when beyond the horizon
    pub months_to_complete: Option<u32>,

    /// Calendar date the target is met
    pub completion_date: Option<NaiveDate>,

    /// Target amount when reachable, otherwise the balance at the horizon
    pub projected_final_value: Money,

    /// Contribution used for the projection
    pub monthly_contribution: Money,

    pub is_reachable: bool,
}

impl GoalProjection {
    /// Projection for a goal that is already funded
    pub fn complete(
        goal_id: impl Into<String>,
        current_amount: Money,
        monthly_contribution: Money,
        today: NaiveDate,
    ) -> Self {
        Self {
            goal_id: goal_id.into(),
            months_to_complete: Some(0),
            completion_date: Some(today),
            projected_final_value: current_amount,
            monthly_contribution,
            is_reachable: true,
        }
    }

    /// Whole years to completion, rounded up
    pub fn years_to_complete(&self) -> Option<u32> {
        self.months_to_complete.map(|months| months.div_ceil(12))
    }
}

/// Result of one engine calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOutput {
    /// Projection per active goal, keyed by goal id
    pub projections: BTreeMap<String, GoalProjection>,

    /// Sum of all allocation entries
    pub total_allocated: Money,

    /// Disposable income left after allocations, floored at zero
    pub remaining_disposable: Money,

    /// Warnings in the order they were raised
    pub warnings: Vec<EngineWarning>,

    /// When the calculation ran; informational only
    pub calculated_at: DateTime<Utc>,
}

impl EngineOutput {
    pub fn projection(&self, goal_id: &str) -> Option<&GoalProjection> {
        self.projections.get(goal_id)
    }

    pub fn has_blockers(&self) -> bool {
        self.warnings.iter().any(EngineWarning::is_blocker)
    }

    pub fn blocking_warnings(&self) -> impl Iterator<Item = &EngineWarning> {
        self.warnings.iter().filter(|w| w.is_blocker())
    }

    pub fn advisory_warnings(&self) -> impl Iterator<Item = &EngineWarning> {
        self.warnings.iter().filter(|w| !w.is_blocker())
    }
}
