//! Load household plans from JSON and goal lists from CSV
//!
//! Money is read from decimal strings so amounts stay exact end to end.

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::Reader;
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{resolve_return_rate, FinancialProfile, Goal, GoalType};
use crate::allocation::Allocation;
use crate::error::{PlannerError, Result};
use crate::money::{Money, Rate};
use crate::projection::EngineInput;
use crate::scenario::Scenario;

fn default_active() -> bool {
    true
}

/// Goal as stored in a plan file, before its return rate is resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRecord {
    pub id: String,
    pub name: String,
    pub goal_type: GoalType,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
    #[serde(default)]
    pub return_rate_override: Option<Rate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl GoalRecord {
    pub fn into_goal(self) -> Goal {
        Goal {
            effective_return_rate: resolve_return_rate(self.goal_type, self.return_rate_override),
            id: self.id,
            name: self.name,
            goal_type: self.goal_type,
            target_amount: self.target_amount,
            current_amount: self.current_amount,
            is_active: self.is_active,
        }
    }
}

/// A named allocation in a plan file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub name: String,
    pub allocation: Allocation,
}

/// A household plan: profile, goals, the current allocation and optional
/// alternative scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanFile {
    pub profile: FinancialProfile,
    pub goals: Vec<GoalRecord>,
    #[serde(default)]
    pub allocation: Allocation,
    #[serde(default)]
    pub scenarios: Vec<ScenarioRecord>,
    /// Date to project from; today when absent
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl PlanFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolve goal rates and validate the resulting engine input
    pub fn into_input(self) -> Result<EngineInput> {
        let goals = self.goals.into_iter().map(GoalRecord::into_goal).collect();
        let input = EngineInput::new(self.profile, goals, self.allocation);
        input.validate()?;
        Ok(input)
    }

    /// Named scenarios, with the plan's own allocation first as "current"
    pub fn scenarios(&self) -> Vec<Scenario> {
        std::iter::once(Scenario::new("current", self.allocation.clone()))
            .chain(
                self.scenarios
                    .iter()
                    .map(|s| Scenario::new(s.name.clone(), s.allocation.clone())),
            )
            .collect()
    }
}

/// Read a plan from a JSON file
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<PlanFile> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let plan = PlanFile::from_json_str(&contents)?;
    info!("loaded plan with {} goals from {}", plan.goals.len(), path.display());
    Ok(plan)
}

/// Raw CSV row for bulk goal import
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Id")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "GoalType")]
    goal_type: String,
    #[serde(rename = "TargetAmount")]
    target_amount: String,
    #[serde(rename = "CurrentAmount")]
    current_amount: String,
    #[serde(rename = "ReturnRateOverride")]
    return_rate_override: String,
    #[serde(rename = "IsActive")]
    is_active: String,
}

impl CsvRow {
    fn to_goal(self) -> Result<Goal> {
        let goal_type = GoalType::from_str(&self.goal_type)?;
        let target_amount = parse_money("TargetAmount", &self.target_amount)?;
        let current_amount = if self.current_amount.trim().is_empty() {
            Decimal::ZERO
        } else {
            parse_money("CurrentAmount", &self.current_amount)?
        };
        let return_rate_override = match self.return_rate_override.trim() {
            "" => None,
            rate => Some(parse_money("ReturnRateOverride", rate)?),
        };
        let is_active = match self.is_active.trim().to_ascii_lowercase().as_str() {
            "" | "true" | "yes" | "1" => true,
            "false" | "no" | "0" => false,
            other => {
                return Err(PlannerError::invalid(
                    "IsActive",
                    format!("expected true/false, got '{}'", other),
                ))
            }
        };

        Ok(GoalRecord {
            id: self.id,
            name: self.name,
            goal_type,
            target_amount,
            current_amount,
            return_rate_override,
            is_active,
        }
        .into_goal())
    }
}

fn parse_money(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| PlannerError::invalid(field, format!("'{}': {}", raw, e)))
}

/// Load goals from a CSV file
pub fn load_goals_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Goal>> {
    let reader = Reader::from_path(path)?;
    read_goals(reader)
}

/// Load goals from any reader (string buffer, upload stream)
pub fn load_goals_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Goal>> {
    read_goals(Reader::from_reader(reader))
}

fn read_goals<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Goal>> {
    let mut goals = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        goals.push(row.to_goal()?);
    }

    Ok(goals)
}

/// Parse a YYYY-MM-DD date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| PlannerError::InvalidDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const PLAN: &str = r#"{
        "profile": {
            "monthly_income": "8000.00",
            "monthly_needs": "3000.00",
            "monthly_wants": "1500.00"
        },
        "goals": [
            {
                "id": "house",
                "name": "House down payment",
                "goal_type": "house_down_payment",
                "target_amount": "24000",
                "return_rate_override": "0.06"
            },
            {
                "id": "retire",
                "name": "Retirement",
                "goal_type": "retirement",
                "target_amount": "1000000",
                "current_amount": "85000.50",
                "is_active": false
            }
        ],
        "allocation": { "house": "500" },
        "scenarios": [
            { "name": "aggressive", "allocation": { "house": "1500" } }
        ],
        "as_of": "2025-01-01"
    }"#;

    #[test]
    fn test_parse_plan() {
        let plan = PlanFile::from_json_str(PLAN).unwrap();
        assert_eq!(plan.as_of, NaiveDate::from_ymd_opt(2025, 1, 1));

        let scenarios = plan.scenarios();
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "current");
        assert_eq!(scenarios[1].allocation.amount_for("house"), dec!(1500));

        let input = plan.into_input().unwrap();
        assert_eq!(input.profile.monthly_disposable(), dec!(3500));
        assert_eq!(input.goals[0].effective_return_rate, dec!(0.06));
        assert_eq!(input.goals[0].current_amount, Decimal::ZERO);
        assert!(input.goals[0].is_active);
        assert_eq!(input.goals[1].effective_return_rate, dec!(0.07));
        assert_eq!(input.goals[1].current_amount, dec!(85000.50));
        assert!(!input.goals[1].is_active);
    }

    #[test]
    fn test_negative_allocation_rejected() {
        let json = PLAN.replace(r#""house": "500""#, r#""house": "-500""#);
        let err = PlanFile::from_json_str(&json).unwrap_err();
        assert!(matches!(&err, PlannerError::Json(_)));
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_negative_scenario_allocation_rejected() {
        let json = PLAN.replace(r#""house": "1500""#, r#""house": "-100""#);
        let err = PlanFile::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_duplicate_allocation_key_rejected() {
        let json = PLAN.replace(
            r#""allocation": { "house": "500" }"#,
            r#""allocation": { "house": "500", "house": "700" }"#,
        );
        let err = PlanFile::from_json_str(&json).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_duplicate_goal_rejected() {
        let json = PLAN.replace(r#""id": "retire""#, r#""id": "house""#);
        let plan = PlanFile::from_json_str(&json).unwrap();
        assert!(matches!(plan.into_input(), Err(PlannerError::DuplicateGoal(id)) if id == "house"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(PlanFile::from_json_str("{"), Err(PlannerError::Json(_))));
    }

    #[test]
    fn test_load_goals_csv() {
        let data = "\
Id,Name,GoalType,TargetAmount,CurrentAmount,ReturnRateOverride,IsActive
ef,Emergency fund,emergency_fund,15000,2500.25,,true
car,New car,Vehicle,28000,,0.01,no
";
        let goals = load_goals_from_reader(data.as_bytes()).unwrap();
        assert_eq!(goals.len(), 2);

        assert_eq!(goals[0].current_amount, dec!(2500.25));
        assert_eq!(goals[0].effective_return_rate, dec!(0.045));
        assert!(goals[0].is_active);

        assert_eq!(goals[1].goal_type, GoalType::Vehicle);
        assert_eq!(goals[1].current_amount, Decimal::ZERO);
        assert_eq!(goals[1].effective_return_rate, dec!(0.01));
        assert!(!goals[1].is_active);
    }

    #[test]
    fn test_csv_bad_amount() {
        let data = "\
Id,Name,GoalType,TargetAmount,CurrentAmount,ReturnRateOverride,IsActive
ef,Emergency fund,emergency_fund,lots,0,,true
";
        let result = load_goals_from_reader(data.as_bytes());
        assert!(matches!(
            result,
            Err(PlannerError::InvalidInput { field, .. }) if field == "TargetAmount"
        ));
    }

    #[test]
    fn test_csv_unknown_goal_type() {
        let data = "\
Id,Name,GoalType,TargetAmount,CurrentAmount,ReturnRateOverride,IsActive
x,Yacht,yacht,1,0,,true
";
        assert!(matches!(
            load_goals_from_reader(data.as_bytes()),
            Err(PlannerError::UnknownGoalType(_))
        ));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-03-15").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
        );
        assert!(matches!(parse_date("03/15/2026"), Err(PlannerError::InvalidDate(_))));
    }
}
