//! Decimal helpers shared by the calculators.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to cents, with exact midpoints rounded away from zero.
///
/// The calculators never round; this is for presenting their results.
///
/// ```
/// use rust_decimal_macros::dec;
/// use equity_tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(30940.125)), dec!(30940.13));
/// assert_eq!(round_half_up(dec!(-1234.565)), dec!(-1234.57));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a derived amount at zero.
///
/// Taxable bases and credited liabilities cannot go negative; this is a
/// business rule, not input sanitising.
///
/// ```
/// use rust_decimal_macros::dec;
/// use equity_tax_core::calculations::common::floor_at_zero;
///
/// assert_eq!(floor_at_zero(dec!(-14000)), dec!(0));
/// assert_eq!(floor_at_zero(dec!(186000)), dec!(186000));
/// ```
pub fn floor_at_zero(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
