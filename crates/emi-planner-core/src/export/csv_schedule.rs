use crate::error::PlannerError;
use crate::export::columns::{schedule_headers, schedule_row};
use crate::simulation::PeriodEntry;
use crate::PlannerResult;

/// Which schedule a CSV export covers; sets the first column's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleKind {
    Yearly,
    Monthly,
}

impl ScheduleKind {
    fn period_label(self) -> &'static str {
        match self {
            ScheduleKind::Yearly => "Year",
            ScheduleKind::Monthly => "Month",
        }
    }
}

/// Render a schedule as CSV with display-formatted figures.
pub fn schedule_csv(
    entries: &[PeriodEntry],
    kind: ScheduleKind,
    exclude_own: bool,
) -> PlannerResult<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(schedule_headers(kind.period_label(), exclude_own))?;
    for entry in entries {
        wtr.write_record(schedule_row(entry, exclude_own))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| PlannerError::Export(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| PlannerError::Export(e.to_string()))
}
