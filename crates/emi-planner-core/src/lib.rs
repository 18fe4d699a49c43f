pub mod error;
pub mod plan;
pub mod simulation;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "report")]
pub mod report;

#[cfg(feature = "export")]
pub mod export;

pub use error::PlannerError;
pub use types::*;

/// Standard result type for all planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
