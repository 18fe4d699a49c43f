use thiserror::Error;

use crate::validation::PlanViolation;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid plan: {0}")]
    InvalidPlan(PlanViolation),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<PlanViolation> for PlannerError {
    fn from(v: PlanViolation) -> Self {
        PlannerError::InvalidPlan(v)
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(e: serde_json::Error) -> Self {
        PlannerError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "export")]
impl From<csv::Error> for PlannerError {
    fn from(e: csv::Error) -> Self {
        PlannerError::Export(e.to_string())
    }
}
