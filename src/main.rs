//! Goal Projection CLI
//!
//! Command-line interface for running goal projections from a plan file

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use goal_projection::household::loader::parse_date;
use goal_projection::household::{load_goals_csv, load_plan};
use goal_projection::money::round_cents;
use goal_projection::report::write_projection_csv;
use goal_projection::{EngineConfig, EngineInput, EngineOutput, ProjectionEngine, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "goal-projection", version, about = "Project savings goals for a household plan")]
struct Args {
    /// Plan file (JSON) with profile, goals and allocation
    #[arg(long)]
    plan: PathBuf,

    /// Replace the plan's goals with goals from this CSV file
    #[arg(long)]
    goals_csv: Option<PathBuf>,

    /// Project from this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    as_of: Option<String>,

    /// Write per-goal projections to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the full engine output as JSON
    #[arg(long)]
    json: bool,

    /// Run every scenario in the plan and print them side by side
    #[arg(long)]
    compare: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let plan = load_plan(&args.plan)
        .with_context(|| format!("failed to load plan {}", args.plan.display()))?;

    let as_of = match &args.as_of {
        Some(raw) => Some(parse_date(raw)?),
        None => plan.as_of,
    };
    let engine = ProjectionEngine::new(EngineConfig {
        as_of,
        ..Default::default()
    });

    let scenarios = plan.scenarios();
    let mut input = plan.into_input().context("invalid plan")?;

    if let Some(path) = &args.goals_csv {
        let goals = load_goals_csv(path)
            .with_context(|| format!("failed to load goals from {}", path.display()))?;
        info!("replacing plan goals with {} goals from CSV", goals.len());
        input = EngineInput::new(input.profile, goals, input.allocation);
        input.validate().context("invalid goals")?;
    }

    if args.compare {
        let runner = ScenarioRunner::from_input(engine, &input);
        for (name, output) in runner.run_batch(&scenarios) {
            println!("== {} ==", name);
            print_summary(&input, &output);
            println!();
        }
        return Ok(());
    }

    let output = engine.calculate(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&input, &output);
    }

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        write_projection_csv(&output, &input.goals, BufWriter::new(file))?;
        println!("\nProjections written to: {}", path.display());
    }

    Ok(())
}

fn print_summary(input: &EngineInput, output: &EngineOutput) {
    println!(
        "Disposable: {}  Allocated: {}  Remaining: {}",
        round_cents(input.profile.monthly_disposable()),
        round_cents(output.total_allocated),
        round_cents(output.remaining_disposable),
    );
    println!();
    println!(
        "{:<24} {:>12} {:>8} {:>12} {:>14}",
        "Goal", "Monthly", "Months", "Completion", "Final value"
    );
    println!("{}", "-".repeat(74));

    for goal in &input.goals {
        let Some(projection) = output.projection(&goal.id) else {
            continue;
        };
        let months = projection
            .months_to_complete
            .map(|m| m.to_string())
            .unwrap_or_else(|| "-".to_string());
        let completion = projection
            .completion_date
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "{:<24} {:>12} {:>8} {:>12} {:>14}",
            goal.name,
            round_cents(projection.monthly_contribution).to_string(),
            months,
            completion,
            round_cents(projection.projected_final_value).to_string(),
        );
    }

    if !output.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &output.warnings {
            let marker = if warning.is_blocker() { "!" } else { "-" };
            println!("  {} {}", marker, warning);
        }
    }
}
