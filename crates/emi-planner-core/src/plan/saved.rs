use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::plan::model::LoanPlan;

/// A plan as kept in the saved-plans list: `{id, loanPlan}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPlan {
    /// ISO-8601 UTC timestamp of the save, millisecond precision
    pub id: String,
    pub loan_plan: LoanPlan,
}

impl SavedPlan {
    pub fn new(loan_plan: LoanPlan, saved_at: DateTime<Utc>) -> Self {
        Self {
            id: plan_id(saved_at),
            loan_plan,
        }
    }
}

/// Format a save time as a plan id, e.g. `2024-03-01T09:30:00.125Z`.
pub fn plan_id(saved_at: DateTime<Utc>) -> String {
    saved_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
