use chrono::Utc;
use clap::{Args, ValueEnum};
use serde_json::json;
use std::fs;
use tracing::info;

use emi_planner_core::export::{render_latex, schedule_csv, ExportOptions, ScheduleKind};
use emi_planner_core::report::{exclude_own_columns, project_report};
use emi_planner_core::simulation::run_simulation;
use emi_planner_core::validation::ensure_valid;

use crate::input::{self, PlanSource};
use crate::storage::PlanStore;

use super::{CommandOutput, CommandResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Latex,
    Csv,
}

/// Arguments for exporting a report
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: PlanSource,

    /// Document format
    #[arg(long, default_value = "latex")]
    pub format: ExportFormat,

    /// Include the month-by-month schedule (LaTeX) or export it instead of the yearly one (CSV)
    #[arg(long)]
    pub monthly: bool,

    /// Report title (LaTeX only)
    #[arg(long)]
    pub title: Option<String>,

    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run_export(args: ExportArgs, store: &PlanStore) -> CommandResult {
    let plan = input::load_plan(&args.source, store)?;
    ensure_valid(&plan)?;
    let sim = run_simulation(&plan);

    let document = match args.format {
        ExportFormat::Latex => {
            let summary = project_report(&plan, &sim)?;
            let options = ExportOptions {
                title: args.title,
                generated_on: Some(Utc::now().date_naive()),
                include_monthly: args.monthly,
            };
            render_latex(&plan, &sim, &summary, &options)?
        }
        ExportFormat::Csv => {
            let exclude_own = exclude_own_columns(&sim.yearly_avg);
            if args.monthly {
                schedule_csv(&sim.monthly_avg, ScheduleKind::Monthly, exclude_own)?
            } else {
                schedule_csv(&sim.yearly_avg, ScheduleKind::Yearly, exclude_own)?
            }
        }
    };

    match args.out {
        Some(path) => {
            fs::write(&path, &document)
                .map_err(|e| format!("Failed to write '{}': {}", path, e))?;
            info!(path, bytes = document.len(), "wrote export");
            Ok(json!({ "written": path, "bytes": document.len() }).into())
        }
        None => Ok(CommandOutput::Text(document)),
    }
}
