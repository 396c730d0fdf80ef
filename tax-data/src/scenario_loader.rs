//! CSV loader for projection scenarios.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Values are
//! trimmed. Optional columns may be left out entirely or left empty; either
//! way they count as zero.
//!
//! | Column                    | Required | Type    | Notes                          |
//! |---------------------------|----------|---------|--------------------------------|
//! | `label`                   | no       | string  | Defaults to `row N`            |
//! | `filing_status`           | yes      | string  | `S` or `MFJ`                   |
//! | `regular_income`          | yes      | decimal | Wages outside RSU proceeds     |
//! | `rsu_units`               | no       | integer | RSUs vesting                   |
//! | `iso_units`               | no       | integer | ISOs exercised                 |
//! | `fair_market_value`       | no       | decimal | Per unit, RSUs and ISOs alike  |
//! | `iso_strike_price`        | no       | decimal | Per ISO                        |
//! | `federal_amt_credit`      | no       | decimal | Available federal AMT credit   |
//! | `ca_amt_credit_carryover` | no       | decimal | California AMT credit          |
//!
//! ### Example
//!
//! ```csv
//! label,filing_status,regular_income,rsu_units,iso_units,fair_market_value,iso_strike_price
//! vest only,S,150000,1000,,50,
//! exercise,MFJ,300000,,2000,100,20
//! ```

use std::io::Read;
use std::path::Path;

use equity_tax_core::{FilingStatus, InputError, TaxInputs};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading scenarios.
#[derive(Debug, Error)]
pub enum ScenarioLoadError {
    #[error("cannot read scenarios: {0}")]
    Io(#[from] std::io::Error),

    /// Structural CSV problems: missing required column, bad number, etc.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// `row` is 1-based; the header is row 0.
    #[error("unrecognised filing status '{status}' on row {row}")]
    InvalidFilingStatus { status: String, row: usize },

    #[error("row {row}: {source}")]
    InvalidInput {
        row: usize,
        #[source]
        source: InputError,
    },
}

/// One labelled set of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub label: String,
    pub inputs: TaxInputs,
}

// Decimal columns are read as text and parsed directly. Left to csv's type
// inference they would pass through `f64` and lose digits.
#[derive(Debug, Deserialize)]
struct CsvRow {
    label: Option<String>,
    filing_status: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    regular_income: Decimal,
    rsu_units: Option<u64>,
    iso_units: Option<u64>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    fair_market_value: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    iso_strike_price: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    federal_amt_credit: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    ca_amt_credit_carryover: Option<Decimal>,
}

fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_optional_decimal(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("missing decimal value"))
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<Scenario, ScenarioLoadError> {
    let filing_status = FilingStatus::parse(&row.filing_status).ok_or_else(|| {
        ScenarioLoadError::InvalidFilingStatus {
            status: row.filing_status.clone(),
            row: row_number,
        }
    })?;

    let inputs = TaxInputs {
        regular_income: row.regular_income,
        rsu_unit_count: row.rsu_units.unwrap_or_default(),
        iso_unit_count: row.iso_units.unwrap_or_default(),
        fair_market_value_per_unit: row.fair_market_value.unwrap_or_default(),
        iso_strike_price_per_unit: row.iso_strike_price.unwrap_or_default(),
        federal_amt_credit_available: row.federal_amt_credit.unwrap_or_default(),
        ca_amt_credit_carryover: row.ca_amt_credit_carryover.unwrap_or_default(),
        filing_status,
    };
    inputs
        .validate()
        .map_err(|source| ScenarioLoadError::InvalidInput {
            row: row_number,
            source,
        })?;

    let label = row
        .label
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| format!("row {row_number}"));

    Ok(Scenario { label, inputs })
}

/// Parses scenarios from any reader. Rows come back in file order.
///
/// # Errors
///
/// * [`ScenarioLoadError::Parse`] if the CSV is malformed or a required
///   column is missing.
/// * [`ScenarioLoadError::InvalidFilingStatus`] for an unknown status code.
/// * [`ScenarioLoadError::InvalidInput`] for negative or out-of-range values.
pub fn parse<R: Read>(reader: R) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(reader);

    let scenarios = csv_reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = scenarios.len(), "parsed scenarios");
    Ok(scenarios)
}

pub fn load_from_str(input: &str) -> Result<Vec<Scenario>, ScenarioLoadError> {
    parse(input.as_bytes())
}

pub fn load_from_file(path: &Path) -> Result<Vec<Scenario>, ScenarioLoadError> {
    let file = std::fs::File::open(path)?;
    parse(file)
}
