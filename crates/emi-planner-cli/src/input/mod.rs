pub mod file;
pub mod stdin;

use clap::Args;
use emi_planner_core::plan::LoanPlan;
use tracing::debug;

use crate::storage::PlanStore;

/// Where a command reads its plan from
#[derive(Args, Debug, Clone, Default)]
pub struct PlanSource {
    /// Path to a JSON or YAML plan file
    #[arg(long, conflicts_with = "saved")]
    pub input: Option<String>,

    /// Id of a plan in the saved-plans store
    #[arg(long)]
    pub saved: Option<String>,
}

/// Load the plan named by `source`, falling back to piped stdin.
pub fn load_plan(
    source: &PlanSource,
    store: &PlanStore,
) -> Result<LoanPlan, Box<dyn std::error::Error>> {
    if let Some(ref path) = source.input {
        debug!(path, "reading plan file");
        return file::read_document(path);
    }
    if let Some(ref id) = source.saved {
        debug!(id, "loading saved plan");
        return Ok(store.load(id)?);
    }
    match stdin::read_stdin()? {
        Some(data) => Ok(serde_json::from_value(data)?),
        None => Err("No plan given: pass --input <file>, --saved <id>, or pipe a plan on stdin".into()),
    }
}
