use crate::report::format::format_amount;
use crate::simulation::PeriodEntry;

/// Column headers shared by the LaTeX and CSV schedules.
pub fn schedule_headers(period_label: &str, exclude_own: bool) -> Vec<String> {
    let mut headers = vec![
        period_label.to_string(),
        "Revenue".to_string(),
        "Expenses".to_string(),
    ];
    if !exclude_own {
        headers.extend([
            "Own Amount".to_string(),
            "Own Repayment".to_string(),
            "Own Interest".to_string(),
        ]);
    }
    headers.extend([
        "Loan Amount".to_string(),
        "Loan Repayment".to_string(),
        "Loan Interest".to_string(),
        "P/L".to_string(),
    ]);
    headers
}

/// One formatted schedule row, matching [`schedule_headers`].
pub fn schedule_row(entry: &PeriodEntry, exclude_own: bool) -> Vec<String> {
    let mut row = vec![
        entry.period.to_string(),
        format_amount(entry.revenue),
        format_amount(entry.expenses),
    ];
    if !exclude_own {
        row.extend([
            format_amount(entry.own_amount),
            format_amount(entry.own_repayment),
            format_amount(entry.own_interest),
        ]);
    }
    row.extend([
        format_amount(entry.loan_amount),
        format_amount(entry.loan_repayment),
        format_amount(entry.loan_interest),
        format_amount(entry.pl),
    ]);
    row
}
