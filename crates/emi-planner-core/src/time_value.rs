use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::PlannerError;
use crate::types::{percent_to_rate, Money, Percent, Rate, MONTHS_PER_YEAR};
use crate::PlannerResult;

/// Monthly rate for a nominal annual percentage (9 => 0.0075).
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    percent_to_rate(annual_pct) / Decimal::from(MONTHS_PER_YEAR)
}

/// Payment (PMT)
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> PlannerResult<Money> {
    if nper == 0 {
        return Err(PlannerError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        let total = present_value
            .checked_add(future_value)
            .ok_or_else(|| overflow("present plus future value"))?;
        return Ok(-total / Decimal::from(nper));
    }

    let one_plus_r = Decimal::ONE
        .checked_add(rate)
        .ok_or_else(|| overflow("1 + rate"))?;
    let factor = one_plus_r
        .checked_powd(Decimal::from(nper))
        .ok_or_else(|| overflow("(1 + rate)^nper"))?;
    let annuity_factor = (factor - Decimal::ONE)
        .checked_div(rate)
        .ok_or_else(|| overflow("annuity factor"))?;

    if annuity_factor.is_zero() {
        return Err(PlannerError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let future_value_of_pv = present_value
        .checked_mul(factor)
        .and_then(|v| v.checked_add(future_value))
        .ok_or_else(|| overflow("present value growth"))?;
    Ok(-future_value_of_pv / annuity_factor)
}

fn overflow(what: &str) -> PlannerError {
    PlannerError::InvalidInput {
        field: "pmt".into(),
        reason: format!("{what} exceeds decimal range"),
    }
}

/// Level (annuity) EMI for a principal repaid monthly over `tenure_years`.
///
/// Returned as a positive outflow. This is the textbook EMI; the simulator
/// itself amortises principal in straight line, so the two differ.
pub fn level_emi(principal: Money, annual_pct: Percent, tenure_years: u32) -> PlannerResult<Money> {
    if principal.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let months = tenure_years.saturating_mul(MONTHS_PER_YEAR);
    Ok(-pmt(monthly_rate(annual_pct), months, principal, Decimal::ZERO)?)
}
