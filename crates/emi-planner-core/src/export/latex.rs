use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

use crate::error::PlannerError;
use crate::plan::{Frequency, LineItem, LoanPlan};
use crate::report::format::{
    format_amount, format_optional_amount, format_optional_percent, format_percent,
};
use crate::report::ReportSummary;
use crate::export::columns::{schedule_headers, schedule_row};
use crate::simulation::{PeriodEntry, SimulationResult};
use crate::PlannerResult;

/// Knobs for the LaTeX report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Report title; defaults to "Loan Plan: <label>"
    #[serde(default)]
    pub title: Option<String>,
    /// Date printed under the title
    #[serde(default)]
    pub generated_on: Option<NaiveDate>,
    /// Append the month-by-month schedule after the yearly one
    #[serde(default)]
    pub include_monthly: bool,
}

/// Escape text for use inside a LaTeX document body.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a standalone LaTeX article for a plan.
///
/// Every figure comes from `sim` or `summary`; nothing is recomputed here.
pub fn render_latex(
    plan: &LoanPlan,
    sim: &SimulationResult,
    summary: &ReportSummary,
    options: &ExportOptions,
) -> PlannerResult<String> {
    let mut doc = String::new();
    write_document(&mut doc, plan, sim, summary, options)
        .map_err(|e| PlannerError::Export(format!("LaTeX rendering failed: {e}")))?;
    Ok(doc)
}

fn write_document(
    doc: &mut String,
    plan: &LoanPlan,
    sim: &SimulationResult,
    summary: &ReportSummary,
    options: &ExportOptions,
) -> std::fmt::Result {
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| format!("Loan Plan: {}", summary.loan_label));

    writeln!(doc, r"\documentclass[a4paper,10pt]{{article}}")?;
    writeln!(doc, r"\usepackage[margin=1.5cm,landscape]{{geometry}}")?;
    writeln!(doc, r"\usepackage{{booktabs}}")?;
    writeln!(doc, r"\usepackage{{longtable}}")?;
    writeln!(doc, r"\title{{{}}}", escape_latex(&title))?;
    match options.generated_on {
        Some(date) => writeln!(doc, r"\date{{{}}}", date.format("%d %B %Y"))?,
        None => writeln!(doc, r"\date{{}}")?,
    }
    writeln!(doc, r"\begin{{document}}")?;
    writeln!(doc, r"\maketitle")?;
    writeln!(doc)?;

    write_parameters(doc, plan, summary)?;
    write_line_items(doc, "Revenues", &plan.revenues)?;
    write_line_items(doc, "Expenses", &plan.expenses)?;
    write_summary(doc, summary)?;
    write_schedule(doc, "Yearly Schedule", "Year", &sim.yearly_avg, summary.exclude_own_columns)?;
    if options.include_monthly {
        write_schedule(doc, "Monthly Schedule", "Month", &sim.monthly_avg, summary.exclude_own_columns)?;
    }

    writeln!(doc, r"\end{{document}}")
}

fn write_parameters(doc: &mut String, plan: &LoanPlan, summary: &ReportSummary) -> std::fmt::Result {
    writeln!(doc, r"\section*{{Loan Parameters}}")?;
    writeln!(doc, r"\begin{{tabular}}{{lr}}")?;
    writeln!(doc, r"\toprule")?;
    let rows = [
        ("Loan type", summary.loan_label.clone()),
        ("Loan amount", format_amount(plan.loan_amount)),
        ("Bank share", format_percent(plan.bank_percent)),
        ("Own-funds share", format_percent(plan.own_percent)),
        ("Bank principal", format_amount(summary.bank_principal)),
        ("Own-funds principal", format_amount(summary.own_principal)),
        ("Bank interest p.a.", format_percent(plan.interest_per_annum)),
        ("Own-funds interest p.a.", format_percent(plan.own_funds_interest_rate)),
        ("Bank tenure (years)", plan.loan_tenure.to_string()),
        ("Own-funds tenure (years)", plan.own_tenure.to_string()),
        ("GST", format_optional_percent(plan.gst_percentage)),
    ];
    for (label, value) in rows {
        writeln!(doc, r"{} & {} \\", label, escape_latex(&value))?;
    }
    writeln!(doc, r"\bottomrule")?;
    writeln!(doc, r"\end{{tabular}}")?;
    writeln!(doc)
}

fn write_line_items(doc: &mut String, heading: &str, items: &[LineItem]) -> std::fmt::Result {
    writeln!(doc, r"\section*{{{heading}}}")?;
    writeln!(doc, r"\begin{{tabular}}{{llr}}")?;
    writeln!(doc, r"\toprule")?;
    writeln!(doc, r"Name & Period & Amount \\")?;
    writeln!(doc, r"\midrule")?;
    for item in items {
        let period = match item.period {
            Frequency::Monthly => "Monthly",
            Frequency::Yearly => "Yearly",
        };
        writeln!(
            doc,
            r"{} & {} & {} \\",
            escape_latex(&item.name),
            period,
            format_amount(item.amount)
        )?;
    }
    writeln!(doc, r"\bottomrule")?;
    writeln!(doc, r"\end{{tabular}}")?;
    writeln!(doc)
}

fn write_summary(doc: &mut String, s: &ReportSummary) -> std::fmt::Result {
    writeln!(doc, r"\section*{{Summary}}")?;
    writeln!(doc, r"\begin{{tabular}}{{lrr}}")?;
    writeln!(doc, r"\toprule")?;
    writeln!(doc, r" & Bank & Own funds \\")?;
    writeln!(doc, r"\midrule")?;
    let rows = [
        ("Year 1 principal", s.bank_year1_principal, s.own_year1_principal),
        ("Year 1 interest", s.bank_year1_interest, s.own_year1_interest),
        ("Year 1 total", s.bank_year1_total, s.own_year1_total),
        ("Lifetime interest", s.total_bank_interest, s.total_own_interest),
        ("Lifetime repayment", s.total_bank_repayment, s.total_own_repayment),
    ];
    for (label, bank, own) in rows {
        writeln!(doc, r"{} & {} & {} \\", label, format_amount(bank), format_amount(own))?;
    }
    writeln!(
        doc,
        r"Equivalent level EMI & {} & {} \\",
        format_optional_amount(s.bank_level_emi),
        format_optional_amount(s.own_level_emi)
    )?;
    writeln!(doc, r"\midrule")?;
    writeln!(doc, r"Total interest & \multicolumn{{2}}{{r}}{{{}}} \\", format_amount(s.total_interest))?;
    writeln!(doc, r"\bottomrule")?;
    writeln!(doc, r"\end{{tabular}}")?;
    writeln!(doc)
}

fn write_schedule(
    doc: &mut String,
    heading: &str,
    period_label: &str,
    entries: &[PeriodEntry],
    exclude_own: bool,
) -> std::fmt::Result {
    let headers = schedule_headers(period_label, exclude_own);
    writeln!(doc, r"\section*{{{heading}}}")?;
    writeln!(doc, r"\begin{{longtable}}{{{}}}", "r".repeat(headers.len()))?;
    writeln!(doc, r"\toprule")?;
    writeln!(doc, r"{} \\", headers.join(" & "))?;
    writeln!(doc, r"\midrule")?;
    writeln!(doc, r"\endhead")?;
    for entry in entries {
        writeln!(doc, r"{} \\", schedule_row(entry, exclude_own).join(" & "))?;
    }
    writeln!(doc, r"\bottomrule")?;
    writeln!(doc, r"\end{{longtable}}")?;
    writeln!(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::project_report;
    use crate::simulation::run_simulation;
    use rust_decimal_macros::dec;

    fn plan() -> LoanPlan {
        LoanPlan {
            loan_type: "term".into(),
            loan_amount: dec!(240_000),
            bank_percent: dec!(50),
            own_percent: dec!(50),
            interest_per_annum: dec!(10),
            own_funds_interest_rate: dec!(5),
            loan_tenure: 2,
            own_tenure: 1,
            revenues: vec![
                LineItem::new("Sales & services", dec!(30_000), Frequency::Monthly),
                LineItem::new("Royalties", dec!(6_000), Frequency::Yearly),
            ],
            expenses: vec![
                LineItem::new("Rent", dec!(5_000), Frequency::Monthly),
                LineItem::new("Audit_fees", dec!(1_200), Frequency::Yearly),
            ],
            gst_percentage: Some(dec!(18)),
            ..LoanPlan::default()
        }
    }

    #[test]
    fn test_escape_latex() {
        assert_eq!(escape_latex("R&D 100% #1"), r"R\&D 100\% \#1");
        assert_eq!(escape_latex(r"a\b"), r"a\textbackslash{}b");
    }

    #[test]
    fn test_render_contains_sections() {
        let plan = plan();
        let sim = run_simulation(&plan);
        let summary = project_report(&plan, &sim).unwrap();
        let options = ExportOptions {
            generated_on: NaiveDate::from_ymd_opt(2024, 3, 1),
            ..ExportOptions::default()
        };
        let doc = render_latex(&plan, &sim, &summary, &options).unwrap();

        assert!(doc.starts_with(r"\documentclass"));
        assert!(doc.contains(r"\title{Loan Plan: term}"));
        assert!(doc.contains(r"\date{01 March 2024}"));
        assert!(doc.contains(r"Sales \& services"));
        assert!(doc.contains(r"Audit\_fees"));
        assert!(doc.contains("Own Interest"));
        assert!(!doc.contains("Monthly Schedule"));
        assert!(doc.trim_end().ends_with(r"\end{document}"));
    }

    #[test]
    fn test_monthly_schedule_optional() {
        let plan = plan();
        let sim = run_simulation(&plan);
        let summary = project_report(&plan, &sim).unwrap();
        let options = ExportOptions {
            include_monthly: true,
            ..ExportOptions::default()
        };
        let doc = render_latex(&plan, &sim, &summary, &options).unwrap();
        assert!(doc.contains("Monthly Schedule"));
    }
}
