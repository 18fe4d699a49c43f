//! Presentation formatting. Amounts are carried at full precision through
//! the engine and only rounded here.

use rust_decimal::RoundingStrategy;

use crate::types::{Money, Percent};

/// Two decimal places, or none when the rounded value is whole.
pub fn format_amount(value: Money) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.fract().is_zero() {
        // -0 must not leak into tables
        let whole = rounded.trunc();
        if whole.is_zero() {
            return "0".to_string();
        }
        format!("{}", whole.normalize())
    } else {
        format!("{:.2}", rounded)
    }
}

pub fn format_percent(value: Percent) -> String {
    format!("{}%", format_amount(value))
}

/// Format an optional amount, with a dash for `None`.
pub fn format_optional_amount(value: Option<Money>) -> String {
    value.map(format_amount).unwrap_or_else(|| "-".to_string())
}

/// Format an optional percentage, with a dash for `None`.
pub fn format_optional_percent(value: Option<Percent>) -> String {
    value.map(format_percent).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_whole_values_have_no_decimals() {
        assert_eq!(format_amount(dec!(1575.0000)), "1575");
        assert_eq!(format_amount(dec!(2500)), "2500");
        assert_eq!(format_amount(dec!(-0.001)), "0");
    }

    #[test]
    fn test_fractional_values_have_two_decimals() {
        assert_eq!(format_amount(dec!(2777.777777)), "2777.78");
        assert_eq!(format_amount(dec!(10.5)), "10.50");
        assert_eq!(format_amount(dec!(0.125)), "0.13");
        assert_eq!(format_amount(dec!(-42.333)), "-42.33");
    }

    #[test]
    fn test_percent_and_optional() {
        assert_eq!(format_percent(dec!(9)), "9%");
        assert_eq!(format_optional_percent(None), "-");
        assert_eq!(format_optional_percent(Some(dec!(18))), "18%");
        assert_eq!(format_optional_amount(None), "-");
        assert_eq!(format_optional_amount(Some(dec!(8884.876))), "8884.88");
    }
}
