//! Household profile and savings goal data structures

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::PlannerError;
use crate::money::{Money, Rate};

/// Monthly income and spending for the household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub monthly_income: Money,
    /// Essential spending (housing, groceries, insurance)
    pub monthly_needs: Money,
    /// Discretionary spending
    pub monthly_wants: Money,
}

impl FinancialProfile {
    pub fn new(monthly_income: Money, monthly_needs: Money, monthly_wants: Money) -> Self {
        Self {
            monthly_income,
            monthly_needs,
            monthly_wants,
        }
    }

    pub fn monthly_expenses(&self) -> Money {
        self.monthly_needs + self.monthly_wants
    }

    /// Income left after expenses. Negative when the household runs a deficit.
    pub fn monthly_disposable(&self) -> Money {
        self.monthly_income - self.monthly_expenses()
    }

    pub fn has_deficit(&self) -> bool {
        self.monthly_income < self.monthly_expenses()
    }
}

/// Kind of savings goal, used to pick a default expected return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    EmergencyFund,
    HouseDownPayment,
    Retirement,
    Education,
    Vacation,
    Wedding,
    Vehicle,
    DebtPayoff,
    Custom,
}

impl GoalType {
    /// Annual return assumed when the goal carries no override
    pub fn default_return_rate(&self) -> Rate {
        match self {
            GoalType::EmergencyFund => EMERGENCY_FUND_RETURN_RATE,
            GoalType::HouseDownPayment => HOUSE_DOWN_PAYMENT_RETURN_RATE,
            GoalType::Retirement => RETIREMENT_RETURN_RATE,
            GoalType::Education => EDUCATION_RETURN_RATE,
            GoalType::Vacation => VACATION_RETURN_RATE,
            GoalType::Wedding => WEDDING_RETURN_RATE,
            GoalType::Vehicle => VEHICLE_RETURN_RATE,
            GoalType::DebtPayoff => DEBT_PAYOFF_RETURN_RATE,
            GoalType::Custom => DEFAULT_RETURN_RATE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::EmergencyFund => "emergency_fund",
            GoalType::HouseDownPayment => "house_down_payment",
            GoalType::Retirement => "retirement",
            GoalType::Education => "education",
            GoalType::Vacation => "vacation",
            GoalType::Wedding => "wedding",
            GoalType::Vehicle => "vehicle",
            GoalType::DebtPayoff => "debt_payoff",
            GoalType::Custom => "custom",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "emergency_fund" | "emergency" => Ok(GoalType::EmergencyFund),
            "house_down_payment" | "house" | "down_payment" => Ok(GoalType::HouseDownPayment),
            "retirement" => Ok(GoalType::Retirement),
            "education" => Ok(GoalType::Education),
            "vacation" | "travel" => Ok(GoalType::Vacation),
            "wedding" => Ok(GoalType::Wedding),
            "vehicle" | "car" => Ok(GoalType::Vehicle),
            "debt_payoff" | "debt" => Ok(GoalType::DebtPayoff),
            "custom" | "other" => Ok(GoalType::Custom),
            _ => Err(PlannerError::UnknownGoalType(s.to_string())),
        }
    }
}

/// Pick the annual return for a goal: the override if set, else the type default
pub fn resolve_return_rate(goal_type: GoalType, rate_override: Option<Rate>) -> Rate {
    rate_override.unwrap_or_else(|| goal_type.default_return_rate())
}

/// A savings goal as seen by the engine
///
/// `effective_return_rate` is already resolved; the engine never looks at
/// `goal_type` when projecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub goal_type: GoalType,
    pub target_amount: Money,
    /// May exceed `target_amount`
    pub current_amount: Money,
    pub effective_return_rate: Rate,
    pub is_active: bool,
}

impl Goal {
    /// Create an active goal using the type's default return rate
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        goal_type: GoalType,
        target_amount: Money,
        current_amount: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            goal_type,
            target_amount,
            current_amount,
            effective_return_rate: goal_type.default_return_rate(),
            is_active: true,
        }
    }

    pub fn with_return_rate(mut self, annual_rate: Rate) -> Self {
        self.effective_return_rate = annual_rate;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Amount still needed, floored at zero
    pub fn remaining(&self) -> Money {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Fraction saved so far, clamped to [0, 1]
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ONE;
        }
        (self.current_amount / self.target_amount).clamp(Decimal::ZERO, Decimal::ONE)
    }
}
