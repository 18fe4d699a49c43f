pub mod format;
pub mod projector;

pub use format::{format_amount, format_percent};
pub use projector::{exclude_own_columns, project_report, summarize_plan, ProfitLossPoint, ReportSummary};
