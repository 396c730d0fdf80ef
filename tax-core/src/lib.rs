//! Projected federal and California tax for a year with wage income, RSU
//! vesting and ISO exercise events.
//!
//! Everything here is pure, synchronous computation over
//! [`rust_decimal::Decimal`]; no I/O and no shared state.

pub mod calculations;
pub mod models;

pub use calculations::{ProjectionError, TaxProjectionEngine, compute_amt_tax, compute_bracket_tax};
pub use models::*;
