//! CSV export of goal projections

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::household::Goal;
use crate::money::round_cents;
use crate::projection::EngineOutput;

#[derive(Debug, Serialize)]
struct ProjectionRow<'a> {
    #[serde(rename = "GoalId")]
    goal_id: &'a str,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: String,
    #[serde(rename = "MonthsToComplete")]
    months_to_complete: Option<u32>,
    #[serde(rename = "CompletionDate")]
    completion_date: Option<String>,
    #[serde(rename = "ProjectedFinalValue")]
    projected_final_value: String,
    #[serde(rename = "Reachable")]
    reachable: bool,
}

/// Write one row per projected goal, in goal order. Goals without a
/// projection (inactive) are left out.
pub fn write_projection_csv<W: Write>(
    output: &EngineOutput,
    goals: &[Goal],
    writer: W,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for goal in goals {
        let Some(projection) = output.projection(&goal.id) else {
            continue;
        };

        csv_writer.serialize(ProjectionRow {
            goal_id: &goal.id,
            name: &goal.name,
            monthly_contribution: round_cents(projection.monthly_contribution).to_string(),
            months_to_complete: projection.months_to_complete,
            completion_date: projection
                .completion_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            projected_final_value: round_cents(projection.projected_final_value).to_string(),
            reachable: projection.is_reachable,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
