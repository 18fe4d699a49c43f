//! Plan validation.
//!
//! Rules are checked in a fixed order and only the first violation is
//! reported, so a form can show one message at a time. `None` is the
//! all-clear that permits saving and exporting.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PlannerError;
use crate::plan::{LineItem, LoanPlan, MIN_LINE_ITEMS};
use crate::PlannerResult;

/// Largest loan or line-item amount accepted.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Longest tenure accepted, in years.
pub const MAX_TENURE_YEARS: u32 = 100;

/// Highest annual interest rate accepted, in percent.
pub const MAX_RATE_PERCENT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Coarse classification of a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    SelectionMissing,
    PercentageImbalance,
    OutOfRange,
    NonPositiveTenure,
    NegativeAmount,
    InsufficientLineItems,
}

/// The first rule a plan breaks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum PlanViolation {
    LoanTypeMissing,
    CustomLoanTypeMissing,
    PercentSplit,
    NegativeLoanAmount,
    LoanAmountTooLarge,
    BankPercentRange,
    OwnPercentRange,
    LoanTenure,
    OwnTenure,
    LoanTenureTooLong,
    OwnTenureTooLong,
    NegativeInterestRate,
    NegativeOwnFundsRate,
    InterestRateTooHigh,
    OwnFundsRateTooHigh,
    NegativeRevenue { name: String },
    NegativeExpense { name: String },
    RevenueTooLarge { name: String },
    ExpenseTooLarge { name: String },
    TooFewRevenues { count: usize },
    TooFewExpenses { count: usize },
}

impl PlanViolation {
    pub fn kind(&self) -> ViolationKind {
        use PlanViolation::*;
        match self {
            LoanTypeMissing | CustomLoanTypeMissing => ViolationKind::SelectionMissing,
            PercentSplit => ViolationKind::PercentageImbalance,
            NegativeLoanAmount
            | LoanAmountTooLarge
            | BankPercentRange
            | OwnPercentRange
            | LoanTenureTooLong
            | OwnTenureTooLong
            | NegativeInterestRate
            | NegativeOwnFundsRate
            | InterestRateTooHigh
            | OwnFundsRateTooHigh
            | RevenueTooLarge { .. }
            | ExpenseTooLarge { .. } => ViolationKind::OutOfRange,
            LoanTenure | OwnTenure => ViolationKind::NonPositiveTenure,
            NegativeRevenue { .. } | NegativeExpense { .. } => ViolationKind::NegativeAmount,
            TooFewRevenues { .. } | TooFewExpenses { .. } => ViolationKind::InsufficientLineItems,
        }
    }
}

impl fmt::Display for PlanViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PlanViolation::*;
        match self {
            LoanTypeMissing => write!(f, "Please select a loan type"),
            CustomLoanTypeMissing => write!(f, "Please enter a name for the manual loan type"),
            PercentSplit => write!(f, "Bank and own-funds percentages must add up to 100"),
            NegativeLoanAmount => write!(f, "Loan amount cannot be negative"),
            LoanAmountTooLarge => write!(f, "Loan amount cannot exceed {MAX_AMOUNT}"),
            BankPercentRange => write!(f, "Bank percentage must be between 0 and 100"),
            OwnPercentRange => write!(f, "Own-funds percentage must be between 0 and 100"),
            LoanTenure => write!(f, "Loan tenure must be greater than 0 years"),
            OwnTenure => write!(f, "Own-funds tenure must be greater than 0 years"),
            LoanTenureTooLong => write!(f, "Loan tenure cannot exceed {MAX_TENURE_YEARS} years"),
            OwnTenureTooLong => {
                write!(f, "Own-funds tenure cannot exceed {MAX_TENURE_YEARS} years")
            }
            NegativeInterestRate => write!(f, "Interest per annum cannot be negative"),
            NegativeOwnFundsRate => write!(f, "Own-funds interest rate cannot be negative"),
            InterestRateTooHigh => {
                write!(f, "Interest per annum cannot exceed {MAX_RATE_PERCENT}%")
            }
            OwnFundsRateTooHigh => {
                write!(f, "Own-funds interest rate cannot exceed {MAX_RATE_PERCENT}%")
            }
            NegativeRevenue { name } => write!(f, "Revenue '{name}' cannot have a negative amount"),
            NegativeExpense { name } => write!(f, "Expense '{name}' cannot have a negative amount"),
            RevenueTooLarge { name } => {
                write!(f, "Revenue '{name}' cannot exceed {MAX_AMOUNT}")
            }
            ExpenseTooLarge { name } => {
                write!(f, "Expense '{name}' cannot exceed {MAX_AMOUNT}")
            }
            TooFewRevenues { count } => write!(
                f,
                "At least {MIN_LINE_ITEMS} revenue entries are required (found {count})"
            ),
            TooFewExpenses { count } => write!(
                f,
                "At least {MIN_LINE_ITEMS} expense entries are required (found {count})"
            ),
        }
    }
}

impl std::error::Error for PlanViolation {}

/// Check a plan against every rule, returning the first violation.
pub fn validate_plan(plan: &LoanPlan) -> Option<PlanViolation> {
    if plan.loan_type.trim().is_empty() {
        return Some(PlanViolation::LoanTypeMissing);
    }
    if plan.is_manual_type() && plan.custom_loan_type.trim().is_empty() {
        return Some(PlanViolation::CustomLoanTypeMissing);
    }

    if plan.bank_percent.checked_add(plan.own_percent) != Some(Decimal::ONE_HUNDRED) {
        return Some(PlanViolation::PercentSplit);
    }

    if plan.loan_amount < Decimal::ZERO {
        return Some(PlanViolation::NegativeLoanAmount);
    }
    if plan.loan_amount > MAX_AMOUNT {
        return Some(PlanViolation::LoanAmountTooLarge);
    }

    if !in_percent_range(plan.bank_percent) {
        return Some(PlanViolation::BankPercentRange);
    }
    if !in_percent_range(plan.own_percent) {
        return Some(PlanViolation::OwnPercentRange);
    }

    if plan.loan_tenure == 0 {
        return Some(PlanViolation::LoanTenure);
    }
    if plan.own_tenure == 0 {
        return Some(PlanViolation::OwnTenure);
    }
    if plan.loan_tenure > MAX_TENURE_YEARS {
        return Some(PlanViolation::LoanTenureTooLong);
    }
    if plan.own_tenure > MAX_TENURE_YEARS {
        return Some(PlanViolation::OwnTenureTooLong);
    }

    if plan.interest_per_annum < Decimal::ZERO {
        return Some(PlanViolation::NegativeInterestRate);
    }
    if plan.own_funds_interest_rate < Decimal::ZERO {
        return Some(PlanViolation::NegativeOwnFundsRate);
    }
    if plan.interest_per_annum > MAX_RATE_PERCENT {
        return Some(PlanViolation::InterestRateTooHigh);
    }
    if plan.own_funds_interest_rate > MAX_RATE_PERCENT {
        return Some(PlanViolation::OwnFundsRateTooHigh);
    }

    if let Some(item) = first_negative(&plan.revenues) {
        return Some(PlanViolation::NegativeRevenue {
            name: item.name.clone(),
        });
    }
    if let Some(item) = first_negative(&plan.expenses) {
        return Some(PlanViolation::NegativeExpense {
            name: item.name.clone(),
        });
    }
    if let Some(item) = first_oversized(&plan.revenues) {
        return Some(PlanViolation::RevenueTooLarge {
            name: item.name.clone(),
        });
    }
    if let Some(item) = first_oversized(&plan.expenses) {
        return Some(PlanViolation::ExpenseTooLarge {
            name: item.name.clone(),
        });
    }

    if plan.revenues.len() < MIN_LINE_ITEMS {
        return Some(PlanViolation::TooFewRevenues {
            count: plan.revenues.len(),
        });
    }
    if plan.expenses.len() < MIN_LINE_ITEMS {
        return Some(PlanViolation::TooFewExpenses {
            count: plan.expenses.len(),
        });
    }

    None
}

/// [`validate_plan`] as a `Result`, for callers that propagate with `?`.
pub fn ensure_valid(plan: &LoanPlan) -> PlannerResult<()> {
    match validate_plan(plan) {
        Some(violation) => Err(PlannerError::InvalidPlan(violation)),
        None => Ok(()),
    }
}

fn in_percent_range(pct: Decimal) -> bool {
    pct >= Decimal::ZERO && pct <= Decimal::ONE_HUNDRED
}

fn first_negative(items: &[LineItem]) -> Option<&LineItem> {
    items.iter().find(|i| i.amount < Decimal::ZERO)
}

fn first_oversized(items: &[LineItem]) -> Option<&LineItem> {
    items.iter().find(|i| i.amount > MAX_AMOUNT)
}
