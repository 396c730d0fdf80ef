use rust_decimal::Decimal;
use thiserror::Error;

use equity_tax_core::calculations::common::round_half_up;

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a string into a [`Decimal`].
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`).
/// Empty or whitespace-only input is treated as 0.
/// Usable directly as a clap `value_parser`.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::debug!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount as dollars and cents with comma thousands separators.
///
/// The value is rounded half-up to the cent first, so `1234.565` prints as
/// `1,234.57` and `-0.004` prints as `0.00`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_half_up(value);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

/// Formats a fractional rate as a percentage: `0.1023` becomes `10.23%`.
pub fn format_rate(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_decimal_accepts_comma_thousands_separator() {
        assert_eq!(parse_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_decimal("150,000").unwrap(), dec!(150000));
    }

    #[test]
    fn parse_decimal_trim_whitespace() {
        assert_eq!(parse_decimal("  123.45  ").unwrap(), dec!(123.45));
    }

    #[test]
    fn parse_decimal_empty_treated_as_zero() {
        assert_eq!(parse_decimal("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_decimal("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_decimal_keeps_negative_sign() {
        assert_eq!(parse_decimal("-5").unwrap(), dec!(-5));
    }

    #[test]
    fn parse_decimal_invalid_returns_error() {
        let err = parse_decimal("12abc").unwrap_err();

        assert!(err.to_string().starts_with("invalid decimal '12abc'"));
    }

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(0)), "0.00");
        assert_eq!(format_currency(dec!(999.5)), "999.50");
        assert_eq!(format_currency(dec!(1000)), "1,000.00");
        assert_eq!(format_currency(dec!(17400)), "17,400.00");
        assert_eq!(format_currency(dec!(1234567.891)), "1,234,567.89");
    }

    #[test]
    fn format_currency_rounds_half_up() {
        assert_eq!(format_currency(dec!(15137.285)), "15,137.29");
        assert_eq!(format_currency(dec!(-5322.715)), "-5,322.72");
    }

    #[test]
    fn format_currency_drops_sign_of_amounts_that_round_to_zero() {
        assert_eq!(format_currency(dec!(-0.004)), "0.00");
    }

    #[test]
    fn format_rate_as_percentage() {
        assert_eq!(format_rate(dec!(0.1023)), "10.23%");
        assert_eq!(format_rate(dec!(0.2200)), "22%");
        assert_eq!(format_rate(dec!(0.093)), "9.3%");
    }
}
