//! Plan warnings raised during a calculation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::{round_cents, Money};

/// A problem with the proposed plan.
///
/// Blockers mean the plan is not self-consistent (spending more than is
/// available). Advisories flag individual goals. None of them stop the
/// calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineWarning {
    /// Allocations exceed disposable income
    OverAllocated { excess: Money },

    /// Goal cannot be reached within the projection horizon
    GoalUnreachable { goal_id: String, goal_name: String },

    /// Active goal receives no monthly contribution
    NoContributionForGoal { goal_id: String, goal_name: String },

    /// Expenses exceed income
    NegativeDisposable,
}

impl EngineWarning {
    pub fn is_blocker(&self) -> bool {
        matches!(
            self,
            EngineWarning::OverAllocated { .. } | EngineWarning::NegativeDisposable
        )
    }

    /// Goal this warning refers to, if any
    pub fn goal_id(&self) -> Option<&str> {
        match self {
            EngineWarning::GoalUnreachable { goal_id, .. }
            | EngineWarning::NoContributionForGoal { goal_id, .. } => Some(goal_id.as_str()),
            EngineWarning::OverAllocated { .. } | EngineWarning::NegativeDisposable => None,
        }
    }

    pub fn message(&self) -> String {
        match self {
            EngineWarning::OverAllocated { excess } => format!(
                "Allocations exceed disposable income by {}",
                round_cents(*excess)
            ),
            EngineWarning::GoalUnreachable { goal_name, .. } => format!(
                "{} cannot be reached within 50 years at the current contribution",
                goal_name
            ),
            EngineWarning::NoContributionForGoal { goal_name, .. } => {
                format!("{} has no monthly contribution", goal_name)
            }
            EngineWarning::NegativeDisposable => {
                "Monthly expenses exceed monthly income".to_string()
            }
        }
    }
}

impl fmt::Display for EngineWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}
