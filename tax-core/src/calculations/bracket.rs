//! Progressive marginal-rate bracket tax.
//!
//! The same routine serves the federal regular tax and the California tax;
//! only the [`BracketSchedule`] differs.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use equity_tax_core::TaxTables;
//! use equity_tax_core::calculations::compute_bracket_tax;
//!
//! let tables = TaxTables::default();
//! let tax = compute_bracket_tax(dec!(100000), &tables.single.federal_brackets);
//!
//! // 11000×10% + 33725×12% + 50650×22% + 4625×24%
//! assert_eq!(tax, dec!(17400.00));
//! ```

use rust_decimal::Decimal;

use crate::BracketSchedule;
use crate::calculations::common::floor_at_zero;

/// Applies `schedule` to `taxable_income`, slice by slice.
///
/// Every bracket the income passes contributes its full width at its rate.
/// The bracket containing the income contributes the partial slice and ends
/// the walk. Income above the last bound is taxed at the schedule's top
/// rate. Negative income is taxed as zero.
pub fn compute_bracket_tax(
    taxable_income: Decimal,
    schedule: &BracketSchedule,
) -> Decimal {
    let income = floor_at_zero(taxable_income);
    let mut tax = Decimal::ZERO;
    let mut lower_limit = Decimal::ZERO;

    for bracket in schedule.brackets() {
        if income > bracket.upper_bound {
            tax += (bracket.upper_bound - lower_limit) * bracket.rate;
            lower_limit = bracket.upper_bound;
        } else {
            tax += (income - lower_limit) * bracket.rate;
            return tax;
        }
    }

    tax + (income - lower_limit) * schedule.top_rate()
}
