//! Federal and California tax projection for a year with RSU vesting and
//! ISO exercise events.
//!
//! # Steps
//!
//! | Step | Figure |
//! |------|--------|
//! | 1    | RSU income, ISO bargain element and ISO adjustment |
//! | 2    | Filing-status parameters (deductions, exemption, schedules) |
//! | 3    | Federal taxable income (ISO adjustment excluded) and regular tax |
//! | 4    | AMT income (ISO adjustment included) and tentative AMT |
//! | 5    | Additional federal tax: AMT over regular tax, net of credit |
//! | 6    | Federal withholding and federal balance due |
//! | 7    | California taxable income (ISO adjustment included) and tax |
//! | 8    | California credit, withholding and state balance due |
//! | 9    | Total balance due |
//!
//! Balances due may be negative (over-withholding); they are never clamped.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use equity_tax_core::{FilingStatus, TaxInputs, TaxTables};
//! use equity_tax_core::calculations::TaxProjectionEngine;
//!
//! let tables = TaxTables::default();
//! let engine = TaxProjectionEngine::new(&tables);
//!
//! let inputs = TaxInputs {
//!     regular_income: dec!(100000),
//!     iso_unit_count: 1000,
//!     fair_market_value_per_unit: dec!(60),
//!     iso_strike_price_per_unit: dec!(10),
//!     filing_status: FilingStatus::Single,
//!     ..TaxInputs::default()
//! };
//!
//! let result = engine.project(&inputs).unwrap();
//!
//! assert_eq!(result.income.iso_adjustment, dec!(50000));
//! assert_eq!(result.income.federal_taxable_income, dec!(86000));
//! assert_eq!(result.income.amt_income, dec!(69000));
//! assert_eq!(result.federal.additional_federal_tax, dec!(3712.5));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::amt::compute_amt_tax;
use crate::calculations::bracket::compute_bracket_tax;
use crate::calculations::common::floor_at_zero;
use crate::{
    FederalSummary, FilingStatusParameters, IncomeBreakdown, InputError, StateSummary,
    TablesError, TaxInputs, TaxProjectionResult, TaxTables,
};

/// Errors that stop a projection before any arithmetic happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("invalid tax tables: {0}")]
    InvalidTables(#[from] TablesError),
}

/// Runs projections against a borrowed set of [`TaxTables`].
///
/// Holds no mutable state, so one engine can serve any number of threads.
#[derive(Debug, Clone, Copy)]
pub struct TaxProjectionEngine<'a> {
    tables: &'a TaxTables,
}

impl<'a> TaxProjectionEngine<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }

    /// Projects the year described by `inputs`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError::InvalidTables`] if the tables fail
    /// validation and [`ProjectionError::InvalidInput`] naming the first
    /// field that is negative or out of range.
    pub fn project(
        &self,
        inputs: &TaxInputs,
    ) -> Result<TaxProjectionResult, ProjectionError> {
        self.tables.validate()?;
        inputs.validate()?;

        // Step 1
        let rsu_income = self.rsu_income(
            inputs.rsu_unit_count,
            inputs.fair_market_value_per_unit,
        );
        let iso_bargain_element = self.iso_bargain_element(
            inputs.fair_market_value_per_unit,
            inputs.iso_strike_price_per_unit,
        );
        let iso_adjustment = self.iso_adjustment(inputs.iso_unit_count, iso_bargain_element);

        // Step 2
        let params = self.tables.parameters(inputs.filing_status);

        // Step 3
        let federal_taxable_income = self.federal_taxable_income(
            inputs.regular_income,
            rsu_income,
            params.federal_standard_deduction,
        );
        let regular_federal_tax =
            compute_bracket_tax(federal_taxable_income, &params.federal_brackets);

        // Step 4
        let amt_income = self.amt_income(
            inputs.regular_income,
            rsu_income,
            iso_adjustment,
            params.amt_exemption,
        );
        let tentative_amt_tax = compute_amt_tax(amt_income, &self.tables.amt);

        // Step 5
        let additional_federal_tax = self.additional_federal_tax(
            tentative_amt_tax,
            inputs.federal_amt_credit_available,
            regular_federal_tax,
        );
        let total_federal_tax = regular_federal_tax + additional_federal_tax;

        // Step 6
        let federal_withholding = self.federal_withholding(inputs.regular_income, rsu_income);
        let additional_federal_due = total_federal_tax - federal_withholding;

        // Step 7
        let ca_taxable_income =
            self.ca_taxable_income(inputs.regular_income, rsu_income, iso_adjustment, params);
        let ca_tax_liability = compute_bracket_tax(ca_taxable_income, &params.ca_brackets);

        // Step 8
        let ca_tax_liability_after_credit =
            floor_at_zero(ca_tax_liability - inputs.ca_amt_credit_carryover);
        let ca_withholding = self.ca_withholding(inputs.regular_income, rsu_income);
        let additional_state_due = ca_tax_liability_after_credit - ca_withholding;

        // Step 9
        let total_additional_due = additional_federal_due + additional_state_due;

        let result = TaxProjectionResult {
            tax_year: self.tables.tax_year,
            filing_status: inputs.filing_status,
            income: IncomeBreakdown {
                rsu_income,
                iso_bargain_element,
                iso_adjustment,
                federal_taxable_income,
                amt_income,
            },
            federal: FederalSummary {
                regular_federal_tax,
                tentative_amt_tax,
                federal_amt_credit_available: inputs.federal_amt_credit_available,
                additional_federal_tax,
                total_federal_tax,
                federal_withholding,
                additional_federal_due,
            },
            state: StateSummary {
                ca_taxable_income,
                ca_tax_liability,
                ca_amt_credit_carryover: inputs.ca_amt_credit_carryover,
                ca_tax_liability_after_credit,
                ca_withholding,
                additional_state_due,
            },
            total_additional_due,
        };

        debug!(
            filing_status = inputs.filing_status.as_str(),
            amt_applies = result.federal.amt_applies(),
            %total_additional_due,
            "tax projection computed"
        );

        Ok(result)
    }

    /// RSUs are ordinary income at fair market value on vest.
    fn rsu_income(
        &self,
        rsu_unit_count: u64,
        fair_market_value: Decimal,
    ) -> Decimal {
        Decimal::from(rsu_unit_count) * fair_market_value
    }

    /// Spread per ISO at exercise; underwater options contribute nothing.
    fn iso_bargain_element(
        &self,
        fair_market_value: Decimal,
        strike_price: Decimal,
    ) -> Decimal {
        floor_at_zero(fair_market_value - strike_price)
    }

    fn iso_adjustment(
        &self,
        iso_unit_count: u64,
        bargain_element: Decimal,
    ) -> Decimal {
        Decimal::from(iso_unit_count) * bargain_element
    }

    /// Regular federal base. The ISO spread stays out of it, as under a
    /// qualifying disposition.
    fn federal_taxable_income(
        &self,
        regular_income: Decimal,
        rsu_income: Decimal,
        standard_deduction: Decimal,
    ) -> Decimal {
        floor_at_zero(regular_income + rsu_income - standard_deduction)
    }

    /// AMT base. The ISO spread is the preference item that drives AMT.
    fn amt_income(
        &self,
        regular_income: Decimal,
        rsu_income: Decimal,
        iso_adjustment: Decimal,
        exemption: Decimal,
    ) -> Decimal {
        floor_at_zero(regular_income + rsu_income + iso_adjustment - exemption)
    }

    /// AMT owed on top of the regular tax once the credit is used.
    fn additional_federal_tax(
        &self,
        tentative_amt_tax: Decimal,
        amt_credit: Decimal,
        regular_federal_tax: Decimal,
    ) -> Decimal {
        floor_at_zero(tentative_amt_tax - amt_credit - regular_federal_tax)
    }

    /// Flat payroll rate on wages plus the supplemental rate on RSU income.
    fn federal_withholding(
        &self,
        regular_income: Decimal,
        rsu_income: Decimal,
    ) -> Decimal {
        let rates = &self.tables.withholding;
        regular_income * rates.federal_regular + rsu_income * rates.federal_supplemental
    }

    /// California taxes the ISO spread unconditionally.
    fn ca_taxable_income(
        &self,
        regular_income: Decimal,
        rsu_income: Decimal,
        iso_adjustment: Decimal,
        params: &FilingStatusParameters,
    ) -> Decimal {
        floor_at_zero(regular_income + rsu_income + iso_adjustment - params.ca_standard_deduction)
    }

    fn ca_withholding(
        &self,
        regular_income: Decimal,
        rsu_income: Decimal,
    ) -> Decimal {
        (regular_income + rsu_income) * self.tables.withholding.california
    }
}
