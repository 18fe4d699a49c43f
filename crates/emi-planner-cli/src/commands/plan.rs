use clap::{Args, ValueEnum};
use serde_json::{json, Value};
use tracing::info;

use emi_planner_core::plan::{apply_edits, LoanPlan, PlanEdit};
use emi_planner_core::report::summarize_plan;
use emi_planner_core::simulation::simulate_plan;
use emi_planner_core::validation::validate_plan;

use crate::input::{self, PlanSource};
use crate::storage::PlanStore;

use super::CommandResult;

/// Arguments for plan validation
#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: PlanSource,
}

/// Which schedule `simulate` prints
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScheduleChoice {
    Yearly,
    Monthly,
}

/// Arguments for running the amortisation simulation
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub source: PlanSource,

    /// Print only this schedule instead of the full result
    #[arg(long)]
    pub schedule: Option<ScheduleChoice>,
}

/// Arguments for the report summary
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: PlanSource,
}

/// Arguments for applying edits to a plan
#[derive(Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub source: PlanSource,

    /// JSON or YAML file holding an array of edits, e.g. [{"op": "setLoanTenure", "value": 5}]
    #[arg(long)]
    pub edits: String,
}

pub fn run_validate(args: ValidateArgs, store: &PlanStore) -> CommandResult {
    let plan = input::load_plan(&args.source, store)?;
    let value = match validate_plan(&plan) {
        None => json!({ "valid": true, "message": Value::Null, "kind": Value::Null }),
        Some(violation) => json!({
            "valid": false,
            "message": violation.to_string(),
            "kind": violation.kind(),
        }),
    };
    Ok(value.into())
}

pub fn run_simulate(args: SimulateArgs, store: &PlanStore) -> CommandResult {
    let plan = input::load_plan(&args.source, store)?;
    let output = simulate_plan(&plan)?;
    info!(
        years = output.result.yearly_avg.len(),
        months = output.result.monthly_avg.len(),
        "simulation complete"
    );

    let mut value = serde_json::to_value(&output)?;
    if let Some(choice) = args.schedule {
        let schedule = match choice {
            ScheduleChoice::Yearly => &output.result.yearly_avg,
            ScheduleChoice::Monthly => &output.result.monthly_avg,
        };
        value["result"] = serde_json::to_value(schedule)?;
    }
    Ok(value.into())
}

pub fn run_summary(args: SummaryArgs, store: &PlanStore) -> CommandResult {
    let plan = input::load_plan(&args.source, store)?;
    let output = summarize_plan(&plan)?;
    Ok(serde_json::to_value(&output)?.into())
}

pub fn run_edit(args: EditArgs, store: &PlanStore) -> CommandResult {
    let plan = input::load_plan(&args.source, store)?;
    let edits: Vec<PlanEdit> = input::file::read_document(&args.edits)?;
    let count = edits.len();
    let edited = apply_edits(&plan, edits)?;
    info!(count, "applied plan edits");
    Ok(serde_json::to_value(&edited)?.into())
}

/// A blank plan to fill in.
pub fn run_new() -> CommandResult {
    Ok(serde_json::to_value(LoanPlan::default())?.into())
}
