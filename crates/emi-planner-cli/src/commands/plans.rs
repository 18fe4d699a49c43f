use clap::Subcommand;
use serde_json::json;

use emi_planner_core::validation::ensure_valid;

use crate::input::{self, PlanSource};
use crate::storage::PlanStore;

use super::CommandResult;

/// Saved-plan store operations
#[derive(Subcommand)]
pub enum PlansCommand {
    /// List saved plans, oldest first
    List,
    /// Save a valid plan; its id is the save time
    Save {
        #[command(flatten)]
        source: PlanSource,
    },
    /// Print a saved plan
    Load {
        /// Plan id as shown by `plans list`
        id: String,
    },
    /// Remove a saved plan
    Delete {
        /// Plan id as shown by `plans list`
        id: String,
    },
}

pub fn run_plans(command: PlansCommand, store: &PlanStore) -> CommandResult {
    let value = match command {
        PlansCommand::List => {
            let rows: Vec<_> = store
                .list()?
                .iter()
                .map(|saved| {
                    let plan = &saved.loan_plan;
                    json!({
                        "id": saved.id,
                        "loanType": plan.loan_label(),
                        "loanAmount": plan.loan_amount,
                        "loanTenure": plan.loan_tenure,
                        "ownTenure": plan.own_tenure,
                    })
                })
                .collect();
            json!(rows)
        }
        PlansCommand::Save { source } => {
            let plan = input::load_plan(&source, store)?;
            ensure_valid(&plan)?;
            let saved = store.save(&plan)?;
            json!({ "id": saved.id, "message": format!("Saved plan {}", saved.id) })
        }
        PlansCommand::Load { id } => serde_json::to_value(store.load(&id)?)?,
        PlansCommand::Delete { id } => {
            let removed = store.delete(&id)?;
            json!({ "id": removed.id, "message": format!("Deleted plan {}", removed.id) })
        }
    };
    Ok(value.into())
}
