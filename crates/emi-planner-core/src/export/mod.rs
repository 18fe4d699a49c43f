pub mod columns;
pub mod csv_schedule;
pub mod latex;

pub use csv_schedule::{schedule_csv, ScheduleKind};
pub use latex::{escape_latex, render_latex, ExportOptions};
