//! Simplified Alternative Minimum Tax.
//!
//! Two flat tiers only. Exemption phase-out and the other Form 6251
//! adjustments are not modeled; the exemption itself is subtracted by the
//! projection engine before this is called.

use rust_decimal::Decimal;

use crate::AmtSchedule;

/// Tentative minimum tax on `amt_income`.
///
/// ```
/// use rust_decimal_macros::dec;
/// use equity_tax_core::AmtSchedule;
/// use equity_tax_core::calculations::compute_amt_tax;
///
/// let schedule = AmtSchedule::default();
///
/// assert_eq!(compute_amt_tax(dec!(200000), &schedule), dec!(52000));
/// assert_eq!(compute_amt_tax(dec!(300000), &schedule), dec!(80000));
/// ```
pub fn compute_amt_tax(
    amt_income: Decimal,
    schedule: &AmtSchedule,
) -> Decimal {
    if amt_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if amt_income <= schedule.threshold {
        return amt_income * schedule.base_rate;
    }
    schedule.threshold * schedule.base_rate
        + (amt_income - schedule.threshold) * schedule.surtax_rate
}
