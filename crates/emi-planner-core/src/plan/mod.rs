pub mod edit;
pub mod model;
pub mod saved;

pub use edit::{apply_edit, apply_edits, PlanEdit};
pub use model::{Frequency, LineItem, LoanPlan, MANUAL_LOAN_TYPE, MIN_LINE_ITEMS};
pub use saved::SavedPlan;
