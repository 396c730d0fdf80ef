//! Parameter tables the projection engine runs on.
//!
//! The built-in tables are illustrative approximations of recent federal and
//! California schedules. They can be replaced wholesale (for example from a
//! TOML file) as long as the replacement passes [`TaxTables::validate`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{BracketSchedule, FilingStatus, ScheduleError};

/// Errors that make a set of tax tables unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TablesError {
    #[error("{status} {schedule} schedule: {source}")]
    Schedule {
        status: FilingStatus,
        schedule: &'static str,
        #[source]
        source: ScheduleError,
    },

    #[error("{status}: {field} must be non-negative, got {value}")]
    NegativeAmount {
        status: FilingStatus,
        field: &'static str,
        value: Decimal,
    },

    #[error("AMT threshold must be positive, got {0}")]
    InvalidAmtThreshold(Decimal),

    #[error("{field} must be between 0 and 1, got {value}")]
    InvalidRate { field: &'static str, value: Decimal },
}

/// Everything that varies by filing status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilingStatusParameters {
    pub federal_standard_deduction: Decimal,
    pub amt_exemption: Decimal,
    pub ca_standard_deduction: Decimal,
    pub federal_brackets: BracketSchedule,
    pub ca_brackets: BracketSchedule,
}

impl FilingStatusParameters {
    fn validate(
        &self,
        status: FilingStatus,
    ) -> Result<(), TablesError> {
        for (field, value) in [
            ("federal_standard_deduction", self.federal_standard_deduction),
            ("amt_exemption", self.amt_exemption),
            ("ca_standard_deduction", self.ca_standard_deduction),
        ] {
            if value < Decimal::ZERO {
                return Err(TablesError::NegativeAmount {
                    status,
                    field,
                    value,
                });
            }
        }

        self.federal_brackets
            .validate()
            .map_err(|source| TablesError::Schedule {
                status,
                schedule: "federal",
                source,
            })?;
        self.ca_brackets
            .validate()
            .map_err(|source| TablesError::Schedule {
                status,
                schedule: "california",
                source,
            })
    }
}

/// Simplified two-tier AMT rate structure.
///
/// AMT income up to `threshold` is taxed at `base_rate`, the excess at
/// `surtax_rate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmtSchedule {
    pub threshold: Decimal,
    pub base_rate: Decimal,
    pub surtax_rate: Decimal,
}

impl Default for AmtSchedule {
    fn default() -> Self {
        Self {
            threshold: Decimal::new(200_000, 0),
            base_rate: Decimal::new(26, 2),
            surtax_rate: Decimal::new(28, 2),
        }
    }
}

impl AmtSchedule {
    pub fn validate(&self) -> Result<(), TablesError> {
        if self.threshold <= Decimal::ZERO {
            return Err(TablesError::InvalidAmtThreshold(self.threshold));
        }
        check_rate("amt.base_rate", self.base_rate)?;
        check_rate("amt.surtax_rate", self.surtax_rate)
    }
}

/// Flat withholding assumptions. These are payroll rates, not bracket based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithholdingRates {
    /// Federal withholding on regular wages.
    pub federal_regular: Decimal,
    /// Federal supplemental-wage withholding on RSU income.
    pub federal_supplemental: Decimal,
    /// California withholding on regular wages plus RSU income.
    pub california: Decimal,
}

impl Default for WithholdingRates {
    fn default() -> Self {
        Self {
            federal_regular: Decimal::new(22, 2),
            federal_supplemental: Decimal::new(37, 2),
            california: Decimal::new(1023, 4),
        }
    }
}

impl WithholdingRates {
    pub fn validate(&self) -> Result<(), TablesError> {
        check_rate("withholding.federal_regular", self.federal_regular)?;
        check_rate(
            "withholding.federal_supplemental",
            self.federal_supplemental,
        )?;
        check_rate("withholding.california", self.california)
    }
}

/// The full parameter set for one projected tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTables {
    pub tax_year: i32,
    pub single: FilingStatusParameters,
    pub married_filing_jointly: FilingStatusParameters,
    #[serde(default)]
    pub amt: AmtSchedule,
    #[serde(default)]
    pub withholding: WithholdingRates,
}

impl TaxTables {
    /// Looks up the parameters for a filing status.
    pub fn parameters(
        &self,
        status: FilingStatus,
    ) -> &FilingStatusParameters {
        match status {
            FilingStatus::Single => &self.single,
            FilingStatus::MarriedFilingJointly => &self.married_filing_jointly,
        }
    }

    /// Validates every schedule, deduction and rate.
    pub fn validate(&self) -> Result<(), TablesError> {
        for &status in FilingStatus::all() {
            self.parameters(status).validate(status)?;
        }
        self.amt.validate()?;
        self.withholding.validate()
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self {
            tax_year: 2025,
            single: FilingStatusParameters {
                federal_standard_deduction: Decimal::new(14_000, 0),
                amt_exemption: Decimal::new(81_000, 0),
                ca_standard_deduction: Decimal::new(5_000, 0),
                federal_brackets: BracketSchedule::from_table(
                    &[
                        (11_000, 10_00),
                        (44_725, 12_00),
                        (95_375, 22_00),
                        (182_100, 24_00),
                        (231_250, 32_00),
                        (578_125, 35_00),
                    ],
                    37_00,
                ),
                ca_brackets: BracketSchedule::from_table(
                    &[
                        (9_324, 1_00),
                        (22_107, 2_00),
                        (34_892, 4_00),
                        (48_435, 6_00),
                        (61_215, 8_00),
                        (312_686, 9_30),
                        (375_221, 10_30),
                        (625_369, 11_30),
                    ],
                    12_30,
                ),
            },
            married_filing_jointly: FilingStatusParameters {
                federal_standard_deduction: Decimal::new(28_000, 0),
                amt_exemption: Decimal::new(126_500, 0),
                ca_standard_deduction: Decimal::new(10_000, 0),
                federal_brackets: BracketSchedule::from_table(
                    &[
                        (22_000, 10_00),
                        (89_450, 12_00),
                        (190_750, 22_00),
                        (364_200, 24_00),
                        (462_500, 32_00),
                        (693_750, 35_00),
                    ],
                    37_00,
                ),
                ca_brackets: BracketSchedule::from_table(
                    &[
                        (18_650, 1_00),
                        (44_214, 2_00),
                        (69_784, 4_00),
                        (96_870, 6_00),
                        (122_428, 8_00),
                        (625_372, 9_30),
                        (750_442, 10_30),
                        (1_250_738, 11_30),
                    ],
                    12_30,
                ),
            },
            amt: AmtSchedule::default(),
            withholding: WithholdingRates::default(),
        }
    }
}

fn check_rate(
    field: &'static str,
    value: Decimal,
) -> Result<(), TablesError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(TablesError::InvalidRate { field, value });
    }
    Ok(())
}
