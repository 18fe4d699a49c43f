use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::plan::model::{LineItem, LoanPlan};
use crate::types::{Money, Percent};
use crate::PlannerResult;

/// One user edit to a plan. Hosts dispatch these instead of poking fields
/// by name; each variant has exactly one effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "value", rename_all = "camelCase")]
pub enum PlanEdit {
    SetLoanType(String),
    SetCustomLoanType(String),
    SetLoanAmount(Money),
    SetBankPercent(Percent),
    SetOwnPercent(Percent),
    SetInterestPerAnnum(Percent),
    SetOwnFundsInterestRate(Percent),
    SetLoanTenure(u32),
    SetOwnTenure(u32),
    SetGstPercentage(Option<Percent>),
    AddRevenue(LineItem),
    RemoveRevenueAt(usize),
    UpdateRevenueAt { index: usize, item: LineItem },
    AddExpense(LineItem),
    RemoveExpenseAt(usize),
    UpdateExpenseAt { index: usize, item: LineItem },
}

/// Apply a single edit, returning the edited copy. The input plan is left
/// untouched.
pub fn apply_edit(plan: &LoanPlan, edit: PlanEdit) -> PlannerResult<LoanPlan> {
    let mut next = plan.clone();
    match edit {
        PlanEdit::SetLoanType(v) => next.loan_type = v,
        PlanEdit::SetCustomLoanType(v) => next.custom_loan_type = v,
        PlanEdit::SetLoanAmount(v) => next.loan_amount = v,
        PlanEdit::SetBankPercent(v) => next.bank_percent = v,
        PlanEdit::SetOwnPercent(v) => next.own_percent = v,
        PlanEdit::SetInterestPerAnnum(v) => next.interest_per_annum = v,
        PlanEdit::SetOwnFundsInterestRate(v) => next.own_funds_interest_rate = v,
        PlanEdit::SetLoanTenure(v) => next.loan_tenure = v,
        PlanEdit::SetOwnTenure(v) => next.own_tenure = v,
        PlanEdit::SetGstPercentage(v) => next.gst_percentage = v,
        PlanEdit::AddRevenue(item) => next.revenues.push(item),
        PlanEdit::RemoveRevenueAt(index) => {
            check_index("revenues", index, next.revenues.len())?;
            next.revenues.remove(index);
        }
        PlanEdit::UpdateRevenueAt { index, item } => {
            check_index("revenues", index, next.revenues.len())?;
            next.revenues[index] = item;
        }
        PlanEdit::AddExpense(item) => next.expenses.push(item),
        PlanEdit::RemoveExpenseAt(index) => {
            check_index("expenses", index, next.expenses.len())?;
            next.expenses.remove(index);
        }
        PlanEdit::UpdateExpenseAt { index, item } => {
            check_index("expenses", index, next.expenses.len())?;
            next.expenses[index] = item;
        }
    }
    Ok(next)
}

/// Apply edits in order. Stops at the first failing edit.
pub fn apply_edits(
    plan: &LoanPlan,
    edits: impl IntoIterator<Item = PlanEdit>,
) -> PlannerResult<LoanPlan> {
    edits
        .into_iter()
        .try_fold(plan.clone(), |acc, edit| apply_edit(&acc, edit))
}

fn check_index(field: &str, index: usize, len: usize) -> PlannerResult<()> {
    if index >= len {
        return Err(PlannerError::InvalidInput {
            field: field.into(),
            reason: format!("Index {index} out of range for {len} rows"),
        });
    }
    Ok(())
}
