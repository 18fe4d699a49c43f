use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::plan::LoanPlan;
use crate::simulation::{plan_warnings, run_simulation, PeriodEntry, SimulationResult};
use crate::time_value::level_emi;
use crate::types::*;
use crate::validation::ensure_valid;
use crate::PlannerResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Per-year profit/loss with its running total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitLossPoint {
    pub year: u32,
    pub pl: Money,
    pub cumulative_pl: Money,
}

/// Scalars and series derived from a simulation, for tables and exports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub loan_label: String,
    pub loan_amount: Money,
    pub bank_principal: Money,
    pub own_principal: Money,
    pub bank_year1_principal: Money,
    pub bank_year1_interest: Money,
    pub bank_year1_total: Money,
    pub own_year1_principal: Money,
    pub own_year1_interest: Money,
    pub own_year1_total: Money,
    pub total_bank_interest: Money,
    pub total_own_interest: Money,
    pub total_interest: Money,
    /// Principal + interest over the whole bank tenure
    pub total_bank_repayment: Money,
    /// Principal + interest over the whole own-funds tenure
    pub total_own_repayment: Money,
    pub total_revenue: Money,
    pub total_expenses: Money,
    /// Textbook annuity EMI for the bank track, for comparison only.
    /// `None` when the compounding factor leaves the decimal range.
    pub bank_level_emi: Option<Money>,
    /// Textbook annuity EMI for the own-funds track, for comparison only
    pub own_level_emi: Option<Money>,
    pub profit_loss: Vec<ProfitLossPoint>,
    /// Own-funds columns carry nothing and can be dropped from tables
    pub exclude_own_columns: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_percentage: Option<Percent>,
}

/// True when no yearly entry has an own-funds principal or interest.
pub fn exclude_own_columns(yearly: &[PeriodEntry]) -> bool {
    yearly
        .iter()
        .all(|e| e.own_amount.is_zero() && e.own_interest.is_zero())
}

fn total(entries: &[PeriodEntry], field: impl Fn(&PeriodEntry) -> Money) -> Money {
    entries.iter().map(field).sum()
}

fn reference_emi(
    track: &str,
    principal: Money,
    annual_pct: Percent,
    tenure_years: u32,
) -> Option<Money> {
    match level_emi(principal, annual_pct, tenure_years) {
        Ok(emi) => Some(emi),
        Err(e) => {
            debug!(track, error = %e, "level EMI unavailable");
            None
        }
    }
}

/// Derive the report summary from a plan and its simulation.
pub fn project_report(plan: &LoanPlan, sim: &SimulationResult) -> PlannerResult<ReportSummary> {
    let mut cumulative = Decimal::ZERO;
    let profit_loss = sim
        .yearly_avg
        .iter()
        .map(|e| {
            cumulative += e.pl;
            ProfitLossPoint {
                year: e.period,
                pl: e.pl,
                cumulative_pl: cumulative,
            }
        })
        .collect();

    let bank_principal = plan.bank_principal();
    let own_principal = plan.own_principal();

    Ok(ReportSummary {
        loan_label: plan.loan_label().to_string(),
        loan_amount: plan.loan_amount,
        bank_principal,
        own_principal,
        bank_year1_principal: sim.bank_year1_principal,
        bank_year1_interest: sim.bank_year1_interest,
        bank_year1_total: sim.bank_year1_total,
        own_year1_principal: sim.own_year1_principal,
        own_year1_interest: sim.own_year1_interest,
        own_year1_total: sim.own_year1_total,
        total_bank_interest: sim.total_bank_interest,
        total_own_interest: sim.total_own_interest,
        total_interest: sim.total_bank_interest + sim.total_own_interest,
        total_bank_repayment: total(&sim.yearly_avg, |e| e.loan_repayment),
        total_own_repayment: total(&sim.yearly_avg, |e| e.own_repayment),
        total_revenue: total(&sim.yearly_avg, |e| e.revenue),
        total_expenses: total(&sim.yearly_avg, |e| e.expenses),
        bank_level_emi: reference_emi(
            "bank",
            bank_principal,
            plan.interest_per_annum,
            plan.loan_tenure,
        ),
        own_level_emi: reference_emi(
            "own",
            own_principal,
            plan.own_funds_interest_rate,
            plan.own_tenure,
        ),
        profit_loss,
        exclude_own_columns: exclude_own_columns(&sim.yearly_avg),
        gst_percentage: plan.gst_percentage,
    })
}

/// Validate, simulate and summarise a plan in one call.
pub fn summarize_plan(plan: &LoanPlan) -> PlannerResult<ComputationOutput<ReportSummary>> {
    let start = Instant::now();
    ensure_valid(plan)?;

    let sim = run_simulation(plan);
    let summary = project_report(plan, &sim)?;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan plan report summary",
        &serde_json::json!({
            "loan_label": summary.loan_label,
            "years": sim.yearly_avg.len(),
            "months": sim.monthly_avg.len(),
        }),
        plan_warnings(plan),
        elapsed,
        summary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{Frequency, LineItem};
    use rust_decimal_macros::dec;

    fn bank_only_plan() -> LoanPlan {
        LoanPlan {
            loan_type: "working-capital".into(),
            loan_amount: dec!(120_000),
            bank_percent: dec!(100),
            own_percent: dec!(0),
            interest_per_annum: dec!(12),
            own_funds_interest_rate: dec!(8),
            loan_tenure: 2,
            own_tenure: 1,
            revenues: vec![
                LineItem::new("Sales", dec!(15_000), Frequency::Monthly),
                LineItem::new("Other", dec!(0), Frequency::Monthly),
            ],
            expenses: vec![
                LineItem::new("Wages", dec!(4_000), Frequency::Monthly),
                LineItem::new("Other", dec!(0), Frequency::Yearly),
            ],
            ..LoanPlan::default()
        }
    }

    #[test]
    fn test_exclude_own_columns_for_bank_only() {
        let plan = bank_only_plan();
        let sim = run_simulation(&plan);
        let summary = project_report(&plan, &sim).unwrap();
        assert!(summary.exclude_own_columns);
        assert_eq!(summary.own_level_emi, Some(Decimal::ZERO));
        assert_eq!(summary.total_own_interest, Decimal::ZERO);
    }

    #[test]
    fn test_cumulative_pl() {
        let plan = bank_only_plan();
        let sim = run_simulation(&plan);
        let summary = project_report(&plan, &sim).unwrap();
        assert_eq!(summary.profit_loss.len(), 2);
        let p = &summary.profit_loss;
        assert_eq!(p[1].cumulative_pl, p[0].pl + p[1].pl);
    }

    #[test]
    fn test_totals() {
        let plan = bank_only_plan();
        let sim = run_simulation(&plan);
        let summary = project_report(&plan, &sim).unwrap();
        // Straight line: 5000/month principal, interest on 120000, 115000, ... at 1%
        // Sum of balances = 5000 * (24 + 23 + ... + 1) = 1_500_000 => interest 15_000
        assert_eq!(summary.total_bank_interest, dec!(15_000));
        assert_eq!(summary.total_bank_repayment, dec!(135_000));
        assert_eq!(summary.total_revenue, dec!(360_000));
        assert_eq!(summary.total_expenses, dec!(96_000));
    }
}
