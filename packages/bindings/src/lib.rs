use napi::Result as NapiResult;
use napi_derive::napi;

use emi_planner_core::export::{render_latex, schedule_csv, ExportOptions, ScheduleKind};
use emi_planner_core::plan::{LoanPlan, PlanEdit};
use emi_planner_core::report::{exclude_own_columns, project_report};
use emi_planner_core::simulation::run_simulation;
use emi_planner_core::validation::ensure_valid;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_plan(plan_json: &str) -> NapiResult<LoanPlan> {
    serde_json::from_str(plan_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Validation and editing
// ---------------------------------------------------------------------------

/// `{valid, message, kind}`; `message` and `kind` are null for a valid plan.
#[napi]
pub fn validate_plan(plan_json: String) -> NapiResult<String> {
    let plan = parse_plan(&plan_json)?;
    let value = match emi_planner_core::validation::validate_plan(&plan) {
        None => serde_json::json!({ "valid": true, "message": null, "kind": null }),
        Some(violation) => serde_json::json!({
            "valid": false,
            "message": violation.to_string(),
            "kind": violation.kind(),
        }),
    };
    serde_json::to_string(&value).map_err(to_napi_error)
}

#[napi]
pub fn apply_plan_edits(plan_json: String, edits_json: String) -> NapiResult<String> {
    let plan = parse_plan(&plan_json)?;
    let edits: Vec<PlanEdit> = serde_json::from_str(&edits_json).map_err(to_napi_error)?;
    let edited = emi_planner_core::plan::apply_edits(&plan, edits).map_err(to_napi_error)?;
    serde_json::to_string(&edited).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulation and report
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_plan(plan_json: String) -> NapiResult<String> {
    let plan = parse_plan(&plan_json)?;
    let output = emi_planner_core::simulation::simulate_plan(&plan).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn summarize_plan(plan_json: String) -> NapiResult<String> {
    let plan = parse_plan(&plan_json)?;
    let output = emi_planner_core::report::summarize_plan(&plan).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Render the LaTeX report. `options_json` follows `ExportOptions`
/// (`title`, `generated_on`, `include_monthly`), all optional.
#[napi]
pub fn export_latex(plan_json: String, options_json: Option<String>) -> NapiResult<String> {
    let plan = parse_plan(&plan_json)?;
    let options: ExportOptions = match options_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => ExportOptions::default(),
    };
    ensure_valid(&plan).map_err(to_napi_error)?;
    let sim = run_simulation(&plan);
    let summary = project_report(&plan, &sim).map_err(to_napi_error)?;
    render_latex(&plan, &sim, &summary, &options).map_err(to_napi_error)
}

#[napi]
pub fn export_schedule_csv(plan_json: String, monthly: bool) -> NapiResult<String> {
    let plan = parse_plan(&plan_json)?;
    ensure_valid(&plan).map_err(to_napi_error)?;
    let sim = run_simulation(&plan);
    let exclude_own = exclude_own_columns(&sim.yearly_avg);
    let (entries, kind) = if monthly {
        (&sim.monthly_avg, ScheduleKind::Monthly)
    } else {
        (&sim.yearly_avg, ScheduleKind::Yearly)
    };
    schedule_csv(entries, kind, exclude_own).map_err(to_napi_error)
}
