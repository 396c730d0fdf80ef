use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a bracket schedule breaks its partition invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("bracket {index}: upper bound must be positive, got {upper_bound}")]
    NonPositiveBound { index: usize, upper_bound: Decimal },

    #[error("bracket {index}: upper bound {upper_bound} must exceed the previous bound {previous}")]
    NonIncreasingBound {
        index: usize,
        upper_bound: Decimal,
        previous: Decimal,
    },

    #[error("bracket {index}: rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("top rate must be between 0 and 1, got {0}")]
    InvalidTopRate(Decimal),

    /// A rate lower than the one below it would make the schedule regressive.
    #[error("rate {rate} is lower than the preceding rate {previous}")]
    RegressiveRate { rate: Decimal, previous: Decimal },
}

/// One slice of a progressive schedule: income up to `upper_bound` (and above
/// the previous bound) is taxed at `rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub upper_bound: Decimal,
    pub rate: Decimal,
}

impl Bracket {
    pub fn new(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self { upper_bound, rate }
    }
}

/// A progressive marginal-rate schedule.
///
/// The bounds partition `[0, ∞)` into contiguous slices; `top_rate` applies to
/// everything above the last bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSchedule {
    top_rate: Decimal,
    brackets: Vec<Bracket>,
}

impl BracketSchedule {
    /// Builds a schedule, rejecting bounds that are not strictly increasing
    /// and rates outside `[0, 1]` or lower than the slice beneath them.
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use equity_tax_core::{Bracket, BracketSchedule, ScheduleError};
    ///
    /// let schedule = BracketSchedule::new(
    ///     vec![Bracket::new(dec!(10000), dec!(0.10))],
    ///     dec!(0.20),
    /// );
    /// assert!(schedule.is_ok());
    ///
    /// let backwards = BracketSchedule::new(
    ///     vec![
    ///         Bracket::new(dec!(10000), dec!(0.10)),
    ///         Bracket::new(dec!(5000), dec!(0.20)),
    ///     ],
    ///     dec!(0.30),
    /// );
    /// assert!(matches!(backwards, Err(ScheduleError::NonIncreasingBound { index: 1, .. })));
    /// ```
    pub fn new(
        brackets: Vec<Bracket>,
        top_rate: Decimal,
    ) -> Result<Self, ScheduleError> {
        let schedule = Self { top_rate, brackets };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Shorthand for tables written as `(upper_bound, rate)` pairs.
    pub fn from_pairs(
        pairs: &[(Decimal, Decimal)],
        top_rate: Decimal,
    ) -> Result<Self, ScheduleError> {
        let brackets = pairs
            .iter()
            .map(|&(upper_bound, rate)| Bracket::new(upper_bound, rate))
            .collect();
        Self::new(brackets, top_rate)
    }

    /// Builds a schedule from whole-dollar bounds and rates in hundredths of a
    /// percent (`9_30` is 9.3%). Only used for the built-in tables, whose
    /// validity is covered by tests.
    pub(crate) fn from_table(
        table: &[(i64, i64)],
        top_rate: i64,
    ) -> Self {
        Self {
            brackets: table
                .iter()
                .map(|&(bound, rate)| Bracket::new(Decimal::new(bound, 0), Decimal::new(rate, 4)))
                .collect(),
            top_rate: Decimal::new(top_rate, 4),
        }
    }

    /// Re-checks the invariants. Needed for schedules that arrive through
    /// deserialization rather than [`BracketSchedule::new`].
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.upper_bound <= Decimal::ZERO {
                return Err(ScheduleError::NonPositiveBound {
                    index,
                    upper_bound: bracket.upper_bound,
                });
            }
            if index > 0 && bracket.upper_bound <= previous_bound {
                return Err(ScheduleError::NonIncreasingBound {
                    index,
                    upper_bound: bracket.upper_bound,
                    previous: previous_bound,
                });
            }
            if !is_fraction(bracket.rate) {
                return Err(ScheduleError::InvalidRate {
                    index,
                    rate: bracket.rate,
                });
            }
            if bracket.rate < previous_rate {
                return Err(ScheduleError::RegressiveRate {
                    rate: bracket.rate,
                    previous: previous_rate,
                });
            }
            previous_bound = bracket.upper_bound;
            previous_rate = bracket.rate;
        }

        if !is_fraction(self.top_rate) {
            return Err(ScheduleError::InvalidTopRate(self.top_rate));
        }
        if self.top_rate < previous_rate {
            return Err(ScheduleError::RegressiveRate {
                rate: self.top_rate,
                previous: previous_rate,
            });
        }
        Ok(())
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    pub fn top_rate(&self) -> Decimal {
        self.top_rate
    }

    /// The bound above which only `top_rate` applies, or zero for a flat schedule.
    pub fn top_threshold(&self) -> Decimal {
        self.brackets
            .last()
            .map_or(Decimal::ZERO, |b| b.upper_bound)
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}
