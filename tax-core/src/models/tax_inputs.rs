use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::FilingStatus;

/// Largest currency amount accepted on any input field: 1,000,000,000,000.
pub const MAX_INPUT_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest RSU or ISO unit count accepted.
pub const MAX_UNIT_COUNT: u64 = 1_000_000_000;

/// A rejected input field. Every variant names the field it came from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{field} must not exceed {max}, got {value}")]
    AmountTooLarge {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },

    #[error("{field} must not exceed {max} units, got {value}")]
    UnitCountTooLarge {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

impl InputError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NegativeAmount { field, .. }
            | Self::AmountTooLarge { field, .. }
            | Self::UnitCountTooLarge { field, .. } => field,
        }
    }
}

/// Income events for the projected tax year.
///
/// A single fair market value applies to both RSU vesting and ISO exercise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxInputs {
    /// Wages outside of RSU proceeds.
    pub regular_income: Decimal,
    /// Number of RSUs vesting during the year.
    pub rsu_unit_count: u64,
    /// Number of ISOs exercised during the year.
    pub iso_unit_count: u64,
    pub fair_market_value_per_unit: Decimal,
    pub iso_strike_price_per_unit: Decimal,
    /// Prior-year federal AMT credit available to offset AMT.
    pub federal_amt_credit_available: Decimal,
    /// California AMT credit carried over from prior years.
    pub ca_amt_credit_carryover: Decimal,
    pub filing_status: FilingStatus,
}

impl TaxInputs {
    /// Checks every field against the accepted range.
    ///
    /// Nothing is clamped: the first field outside its range is reported.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use equity_tax_core::{InputError, TaxInputs};
    ///
    /// let inputs = TaxInputs {
    ///     regular_income: dec!(-1),
    ///     ..TaxInputs::default()
    /// };
    ///
    /// let err = inputs.validate().unwrap_err();
    /// assert_eq!(err.field(), "regular_income");
    /// ```
    pub fn validate(&self) -> Result<(), InputError> {
        check_amount("regular_income", self.regular_income)?;
        check_units("rsu_unit_count", self.rsu_unit_count)?;
        check_units("iso_unit_count", self.iso_unit_count)?;
        check_amount(
            "fair_market_value_per_unit",
            self.fair_market_value_per_unit,
        )?;
        check_amount(
            "iso_strike_price_per_unit",
            self.iso_strike_price_per_unit,
        )?;
        check_amount(
            "federal_amt_credit_available",
            self.federal_amt_credit_available,
        )?;
        check_amount("ca_amt_credit_carryover", self.ca_amt_credit_carryover)?;
        Ok(())
    }
}

fn check_amount(
    field: &'static str,
    value: Decimal,
) -> Result<(), InputError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(InputError::NegativeAmount { field, value });
    }
    if value > MAX_INPUT_AMOUNT {
        return Err(InputError::AmountTooLarge {
            field,
            value,
            max: MAX_INPUT_AMOUNT,
        });
    }
    Ok(())
}

fn check_units(
    field: &'static str,
    value: u64,
) -> Result<(), InputError> {
    if value > MAX_UNIT_COUNT {
        return Err(InputError::UnitCountTooLarge {
            field,
            value,
            max: MAX_UNIT_COUNT,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn valid_inputs() -> TaxInputs {
        TaxInputs {
            regular_income: dec!(150000),
            rsu_unit_count: 1000,
            iso_unit_count: 500,
            fair_market_value_per_unit: dec!(50),
            iso_strike_price_per_unit: dec!(10),
            federal_amt_credit_available: dec!(2500),
            ca_amt_credit_carryover: dec!(1000),
            filing_status: FilingStatus::Single,
        }
    }

    #[test]
    fn validate_accepts_typical_inputs() {
        assert_eq!(valid_inputs().validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_all_zero_inputs() {
        assert_eq!(TaxInputs::default().validate(), Ok(()));
    }

    #[test]
    fn validate_accepts_negative_zero() {
        let mut inputs = valid_inputs();
        inputs.iso_strike_price_per_unit = -Decimal::ZERO;

        assert_eq!(inputs.validate(), Ok(()));
    }

    #[test]
    fn validate_names_negative_field() {
        let mut inputs = valid_inputs();
        inputs.ca_amt_credit_carryover = dec!(-0.01);

        assert_eq!(
            inputs.validate(),
            Err(InputError::NegativeAmount {
                field: "ca_amt_credit_carryover",
                value: dec!(-0.01),
            })
        );
    }

    #[test]
    fn validate_reports_first_offending_field() {
        let mut inputs = valid_inputs();
        inputs.fair_market_value_per_unit = dec!(-5);
        inputs.federal_amt_credit_available = dec!(-5);

        let err = inputs.validate().unwrap_err();

        assert_eq!(err.field(), "fair_market_value_per_unit");
    }

    #[test]
    fn amount_ceiling_is_one_trillion() {
        assert_eq!(MAX_INPUT_AMOUNT, dec!(1000000000000));
        assert_eq!(MAX_INPUT_AMOUNT.scale(), 0);
    }

    #[test]
    fn validate_rejects_amount_above_ceiling() {
        let mut inputs = valid_inputs();
        inputs.regular_income = MAX_INPUT_AMOUNT + dec!(1);

        assert_eq!(
            inputs.validate(),
            Err(InputError::AmountTooLarge {
                field: "regular_income",
                value: MAX_INPUT_AMOUNT + dec!(1),
                max: MAX_INPUT_AMOUNT,
            })
        );
    }

    #[test]
    fn validate_accepts_amount_at_ceiling() {
        let mut inputs = valid_inputs();
        inputs.regular_income = MAX_INPUT_AMOUNT;

        assert_eq!(inputs.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unit_count_above_ceiling() {
        let mut inputs = valid_inputs();
        inputs.iso_unit_count = MAX_UNIT_COUNT + 1;

        let err = inputs.validate().unwrap_err();

        assert_eq!(err.field(), "iso_unit_count");
        assert!(matches!(err, InputError::UnitCountTooLarge { .. }));
    }
}
