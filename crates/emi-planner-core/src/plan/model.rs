use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{percent_to_rate, Money, Percent, MONTHS_PER_YEAR};

/// Loan type selector value that asks for a free-text label instead.
pub const MANUAL_LOAN_TYPE: &str = "manual";

/// Minimum number of revenue rows and of expense rows on a plan.
pub const MIN_LINE_ITEMS: usize = 2;

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// How often a line item's amount recurs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
    Yearly,
}

/// A single revenue or expense stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub amount: Money,
    pub period: Frequency,
}

impl LineItem {
    pub fn new(name: impl Into<String>, amount: Money, period: Frequency) -> Self {
        Self {
            name: name.into(),
            amount,
            period,
        }
    }

    /// Amount this item contributes to one month.
    pub fn monthly_amount(&self) -> Money {
        match self.period {
            Frequency::Monthly => self.amount,
            Frequency::Yearly => self.amount / Decimal::from(MONTHS_PER_YEAR),
        }
    }

    /// Amount this item contributes to one year.
    pub fn yearly_amount(&self) -> Money {
        match self.period {
            Frequency::Monthly => self.amount * Decimal::from(MONTHS_PER_YEAR),
            Frequency::Yearly => self.amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Loan plan
// ---------------------------------------------------------------------------

/// A blended loan: a bank-financed share and an own-funds share, each
/// amortised over its own tenure, set against revenue and expense streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPlan {
    /// Selector value, e.g. "term", "working-capital" or [`MANUAL_LOAN_TYPE`]
    #[serde(default)]
    pub loan_type: String,
    /// Free-text label, only meaningful for manual entry
    #[serde(default)]
    pub custom_loan_type: String,
    pub loan_amount: Money,
    pub bank_percent: Percent,
    pub own_percent: Percent,
    /// Bank track annual nominal rate, percent
    pub interest_per_annum: Percent,
    /// Own-funds track annual nominal rate, percent
    pub own_funds_interest_rate: Percent,
    /// Bank track tenure in years
    pub loan_tenure: u32,
    /// Own-funds track tenure in years
    pub own_tenure: u32,
    #[serde(default)]
    pub revenues: Vec<LineItem>,
    #[serde(default)]
    pub expenses: Vec<LineItem>,
    /// Recorded and displayed only; never applied to cash flows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gst_percentage: Option<Percent>,
}

impl Default for LoanPlan {
    fn default() -> Self {
        Self {
            loan_type: String::new(),
            custom_loan_type: String::new(),
            loan_amount: Decimal::ZERO,
            bank_percent: Decimal::ONE_HUNDRED,
            own_percent: Decimal::ZERO,
            interest_per_annum: Decimal::ZERO,
            own_funds_interest_rate: Decimal::ZERO,
            loan_tenure: 1,
            own_tenure: 1,
            revenues: vec![LineItem::default(); MIN_LINE_ITEMS],
            expenses: vec![LineItem::default(); MIN_LINE_ITEMS],
            gst_percentage: None,
        }
    }
}

impl LoanPlan {
    pub fn is_manual_type(&self) -> bool {
        self.loan_type == MANUAL_LOAN_TYPE
    }

    /// Label shown on reports: the free-text label for manual entry,
    /// otherwise the selector value.
    pub fn loan_label(&self) -> &str {
        if self.is_manual_type() {
            self.custom_loan_type.trim()
        } else {
            self.loan_type.trim()
        }
    }

    pub fn bank_principal(&self) -> Money {
        self.loan_amount * percent_to_rate(self.bank_percent)
    }

    pub fn own_principal(&self) -> Money {
        self.loan_amount * percent_to_rate(self.own_percent)
    }

    pub fn monthly_revenue(&self) -> Money {
        self.revenues.iter().map(LineItem::monthly_amount).sum()
    }

    pub fn yearly_revenue(&self) -> Money {
        self.revenues.iter().map(LineItem::yearly_amount).sum()
    }

    pub fn monthly_expenses(&self) -> Money {
        self.expenses.iter().map(LineItem::monthly_amount).sum()
    }

    pub fn yearly_expenses(&self) -> Money {
        self.expenses.iter().map(LineItem::yearly_amount).sum()
    }
}
