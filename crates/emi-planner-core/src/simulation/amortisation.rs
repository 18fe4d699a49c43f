use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, trace};

use crate::plan::LoanPlan;
use crate::time_value::monthly_rate;
use crate::types::*;
use crate::validation::ensure_valid;
use crate::PlannerResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month or one year of the projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEntry {
    /// 1-based month or year number
    pub period: u32,
    pub revenue: Money,
    pub expenses: Money,
    /// Original own-funds principal, repeated on every entry
    pub own_amount: Money,
    /// Original bank principal, repeated on every entry
    pub loan_amount: Money,
    /// Own-funds principal + interest due in the period
    pub own_repayment: Money,
    /// Bank principal + interest due in the period
    pub loan_repayment: Money,
    pub own_interest: Money,
    pub loan_interest: Money,
    pub pl: Money,
}

impl PeriodEntry {
    pub fn own_principal(&self) -> Money {
        self.own_repayment - self.own_interest
    }

    pub fn loan_principal(&self) -> Money {
        self.loan_repayment - self.loan_interest
    }
}

/// Full projection for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub yearly_avg: Vec<PeriodEntry>,
    pub monthly_avg: Vec<PeriodEntry>,
    pub bank_year1_principal: Money,
    pub bank_year1_interest: Money,
    pub bank_year1_total: Money,
    pub own_year1_principal: Money,
    pub own_year1_interest: Money,
    pub own_year1_total: Money,
    pub total_bank_interest: Money,
    pub total_own_interest: Money,
}

// ---------------------------------------------------------------------------
// Funding tracks
// ---------------------------------------------------------------------------

/// Principal and interest paid on one track in one month.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Instalment {
    principal: Money,
    interest: Money,
}

impl Instalment {
    fn total(&self) -> Money {
        self.principal + self.interest
    }
}

/// A straight-line amortising balance: constant principal each month,
/// interest on the balance outstanding at the start of the month.
#[derive(Debug, Clone)]
struct Track {
    remaining: Money,
    fixed_principal: Money,
    monthly_rate: Rate,
    tenure_months: u32,
    lifetime_interest: Money,
}

impl Track {
    fn new(principal: Money, annual_pct: Percent, tenure_years: u32) -> Self {
        let tenure_months = tenure_years.saturating_mul(MONTHS_PER_YEAR);
        // A zero tenure leaves the track inactive rather than dividing by zero
        let fixed_principal = if tenure_months == 0 {
            Decimal::ZERO
        } else {
            principal / Decimal::from(tenure_months)
        };
        Self {
            remaining: principal,
            fixed_principal,
            monthly_rate: monthly_rate(annual_pct),
            tenure_months,
            lifetime_interest: Decimal::ZERO,
        }
    }

    fn step(&mut self, month: u32) -> Instalment {
        if month > self.tenure_months {
            self.remaining = self.remaining.max(Decimal::ZERO);
            return Instalment::default();
        }
        let interest = self.remaining * self.monthly_rate;
        self.remaining = (self.remaining - self.fixed_principal).max(Decimal::ZERO);
        self.lifetime_interest += interest;
        Instalment {
            principal: self.fixed_principal,
            interest,
        }
    }
}

/// Running principal/interest for the year being built.
#[derive(Debug, Clone, Copy, Default)]
struct YearBucket {
    bank: Instalment,
    own: Instalment,
}

impl YearBucket {
    fn add(&mut self, bank: Instalment, own: Instalment) {
        self.bank.principal += bank.principal;
        self.bank.interest += bank.interest;
        self.own.principal += own.principal;
        self.own.interest += own.interest;
    }
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// Months simulated: the longer of the two tenures, and never less than one.
pub fn simulation_months(plan: &LoanPlan) -> u32 {
    let loan_months = plan.loan_tenure.saturating_mul(MONTHS_PER_YEAR);
    let own_months = plan.own_tenure.saturating_mul(MONTHS_PER_YEAR);
    loan_months.max(own_months).max(1)
}

/// Project a plan month by month and roll the months into years.
///
/// Pure: the same plan always gives the same result. The plan is assumed to
/// be valid; zero tenures are tolerated but make the track inactive.
///
/// The yearly P/L subtracts the year's principal + interest and, on top of
/// that, the interest accumulated so far spread over the longer tenure. The
/// interest is therefore counted twice in yearly figures; monthly P/L does
/// not carry the spreading term.
pub fn run_simulation(plan: &LoanPlan) -> SimulationResult {
    let bank_principal = plan.bank_principal();
    let own_principal = plan.own_principal();

    let mut bank = Track::new(bank_principal, plan.interest_per_annum, plan.loan_tenure);
    let mut own = Track::new(own_principal, plan.own_funds_interest_rate, plan.own_tenure);

    let max_months = simulation_months(plan);
    let spread_years = Decimal::from(plan.loan_tenure.max(plan.own_tenure));

    let monthly_revenue = plan.monthly_revenue();
    let monthly_expenses = plan.monthly_expenses();
    let yearly_revenue = plan.yearly_revenue();
    let yearly_expenses = plan.yearly_expenses();

    debug!(
        %bank_principal,
        %own_principal,
        loan_tenure = plan.loan_tenure,
        own_tenure = plan.own_tenure,
        max_months,
        "running amortisation"
    );

    let year_count = max_months.div_ceil(MONTHS_PER_YEAR);
    let mut monthly_avg = Vec::with_capacity(max_months as usize);
    let mut yearly_avg = Vec::with_capacity(year_count as usize);

    let mut bucket = YearBucket::default();
    let mut year1: Option<YearBucket> = None;
    let mut year = 1u32;

    for month in 1..=max_months {
        let b = bank.step(month);
        let o = own.step(month);

        monthly_avg.push(PeriodEntry {
            period: month,
            revenue: monthly_revenue,
            expenses: monthly_expenses,
            own_amount: own_principal,
            loan_amount: bank_principal,
            own_repayment: o.total(),
            loan_repayment: b.total(),
            own_interest: o.interest,
            loan_interest: b.interest,
            pl: monthly_revenue - monthly_expenses - o.total() - b.total(),
        });

        bucket.add(b, o);

        if month % MONTHS_PER_YEAR == 0 || month == max_months {
            let interest_so_far = bank.lifetime_interest + own.lifetime_interest;
            let adjustment = if spread_years.is_zero() {
                Decimal::ZERO
            } else {
                interest_so_far / spread_years
            };
            let year_repayment = bucket.bank.total() + bucket.own.total();

            yearly_avg.push(PeriodEntry {
                period: year,
                revenue: yearly_revenue,
                expenses: yearly_expenses,
                own_amount: own_principal,
                loan_amount: bank_principal,
                own_repayment: bucket.own.total(),
                loan_repayment: bucket.bank.total(),
                own_interest: bucket.own.interest,
                loan_interest: bucket.bank.interest,
                pl: yearly_revenue - (year_repayment + adjustment + yearly_expenses),
            });
            trace!(year, %year_repayment, %adjustment, "closed year");

            if year1.is_none() {
                year1 = Some(bucket);
            }
            bucket = YearBucket::default();
            year += 1;
        }
    }

    let first = year1.unwrap_or_default();

    SimulationResult {
        yearly_avg,
        monthly_avg,
        bank_year1_principal: first.bank.principal,
        bank_year1_interest: first.bank.interest,
        bank_year1_total: first.bank.total(),
        own_year1_principal: first.own.principal,
        own_year1_interest: first.own.interest,
        own_year1_total: first.own.total(),
        total_bank_interest: bank.lifetime_interest,
        total_own_interest: own.lifetime_interest,
    }
}

/// Validate a plan, run the simulation and wrap it in the output envelope.
pub fn simulate_plan(plan: &LoanPlan) -> PlannerResult<ComputationOutput<SimulationResult>> {
    let start = Instant::now();
    ensure_valid(plan)?;

    let warnings = plan_warnings(plan);
    let result = run_simulation(plan);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Straight-line blended amortisation (bank + own funds)",
        &serde_json::json!({
            "loan_amount": plan.loan_amount.to_string(),
            "bank_percent": plan.bank_percent.to_string(),
            "own_percent": plan.own_percent.to_string(),
            "interest_per_annum": plan.interest_per_annum.to_string(),
            "own_funds_interest_rate": plan.own_funds_interest_rate.to_string(),
            "loan_tenure_years": plan.loan_tenure,
            "own_tenure_years": plan.own_tenure,
            "months_simulated": simulation_months(plan),
        }),
        warnings,
        elapsed,
        result,
    ))
}

/// Notes about a valid plan that do not block simulation.
pub fn plan_warnings(plan: &LoanPlan) -> Vec<String> {
    let mut warnings = Vec::new();
    if let Some(gst) = plan.gst_percentage {
        warnings.push(format!(
            "GST of {gst}% is recorded for display only and is not applied to cash flows"
        ));
    }
    if plan.own_percent.is_zero() && plan.own_tenure > plan.loan_tenure {
        warnings.push(
            "Own-funds share is zero but its tenure extends the projection beyond the bank tenure"
                .into(),
        );
    }
    if plan.loan_amount.is_zero() {
        warnings.push("Loan amount is zero; repayments will be zero throughout".into());
    }
    warnings
}
