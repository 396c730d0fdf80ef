//! Tax calculators: progressive bracket tax, simplified AMT, and the
//! projection engine that combines them.

pub mod amt;
pub mod bracket;
pub mod common;
pub mod projection;

pub use amt::compute_amt_tax;
pub use bracket::compute_bracket_tax;
pub use projection::{ProjectionError, TaxProjectionEngine};
