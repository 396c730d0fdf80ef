//! TOML loader for [`TaxTables`].
//!
//! The document mirrors the `TaxTables` field names. Decimals may be written
//! as TOML numbers or as strings; strings keep rates like `0.093` exact.
//! `[amt]` and `[withholding]` may be omitted to use the built-in values.
//!
//! ```toml
//! tax_year = 2026
//!
//! [single]
//! federal_standard_deduction = "14000"
//! amt_exemption = "81000"
//! ca_standard_deduction = "5000"
//!
//! [single.federal_brackets]
//! top_rate = "0.37"
//! brackets = [
//!     { upper_bound = "11000", rate = "0.10" },
//!     { upper_bound = "44725", rate = "0.12" },
//! ]
//! ```

use std::path::{Path, PathBuf};

use equity_tax_core::{TablesError, TaxTables};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum TablesLoadError {
    #[error("cannot read tax tables from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid tax tables: {0}")]
    Invalid(#[from] TablesError),

    #[error("cannot serialize tax tables: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Parses and validates tables from a TOML document.
pub fn load_tables_from_str(input: &str) -> Result<TaxTables, TablesLoadError> {
    let tables: TaxTables = toml::from_str(input)?;
    tables.validate()?;
    debug!(tax_year = tables.tax_year, "parsed tax tables");
    Ok(tables)
}

/// Reads, parses and validates a TOML table file.
pub fn load_tables_from_file(path: &Path) -> Result<TaxTables, TablesLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| TablesLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tables = load_tables_from_str(&contents)?;
    info!(path = %path.display(), tax_year = tables.tax_year, "loaded tax tables");
    Ok(tables)
}

/// Renders tables in the same format [`load_tables_from_str`] reads, so the
/// built-in set can be dumped and edited.
pub fn tables_to_toml(tables: &TaxTables) -> Result<String, TablesLoadError> {
    Ok(toml::to_string_pretty(tables)?)
}

#[cfg(test)]
mod tests {
    use equity_tax_core::{FilingStatus, ScheduleError};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const SMALL_TABLES: &str = r#"
tax_year = 2030

[single]
federal_standard_deduction = "10000"
amt_exemption = "50000"
ca_standard_deduction = 4000
[single.federal_brackets]
top_rate = "0.30"
brackets = [
    { upper_bound = "20000", rate = "0.10" },
    { upper_bound = "80000", rate = "0.20" },
]
[single.ca_brackets]
top_rate = "0.093"
brackets = []

[married_filing_jointly]
federal_standard_deduction = "20000"
amt_exemption = "100000"
ca_standard_deduction = "8000"
[married_filing_jointly.federal_brackets]
top_rate = "0.30"
brackets = [{ upper_bound = "40000", rate = "0.10" }]
[married_filing_jointly.ca_brackets]
top_rate = "0.05"
brackets = []
"#;

    #[test]
    fn loads_tables_and_defaults_missing_sections() {
        let tables = load_tables_from_str(SMALL_TABLES).expect("should load");

        assert_eq!(tables.tax_year, 2030);
        assert_eq!(tables.single.ca_standard_deduction, dec!(4000));
        assert_eq!(tables.single.federal_brackets.top_threshold(), dec!(80000));
        assert_eq!(tables.single.ca_brackets.top_rate(), dec!(0.093));
        assert_eq!(tables.amt, TaxTables::default().amt);
        assert_eq!(tables.withholding, TaxTables::default().withholding);
    }

    #[test]
    fn built_in_tables_survive_a_dump_and_reload() {
        let original = TaxTables::default();

        let text = tables_to_toml(&original).expect("should serialize");
        let reloaded = load_tables_from_str(&text).expect("should reload");

        assert_eq!(reloaded, original);
    }

    #[test]
    fn invalid_schedule_is_rejected_after_parsing() {
        let broken = SMALL_TABLES.replace(
            r#"{ upper_bound = "80000", rate = "0.20" }"#,
            r#"{ upper_bound = "15000", rate = "0.20" }"#,
        );

        let err = load_tables_from_str(&broken).unwrap_err();

        match err {
            TablesLoadError::Invalid(TablesError::Schedule {
                status,
                schedule,
                source,
            }) => {
                assert_eq!(status, FilingStatus::Single);
                assert_eq!(schedule, "federal");
                assert!(matches!(source, ScheduleError::NonIncreasingBound { index: 1, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_withholding_rate_is_rejected() {
        let with_withholding = format!(
            "{SMALL_TABLES}\n[withholding]\nfederal_regular = \"0.22\"\nfederal_supplemental = \"1.5\"\ncalifornia = \"0.1\"\n"
        );

        let err = load_tables_from_str(&with_withholding).unwrap_err();

        assert!(matches!(
            err,
            TablesLoadError::Invalid(TablesError::InvalidRate {
                field: "withholding.federal_supplemental",
                ..
            })
        ));
    }

    #[test]
    fn missing_filing_status_section_is_a_parse_error() {
        let err = load_tables_from_str("tax_year = 2025\n").unwrap_err();

        assert!(matches!(err, TablesLoadError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/definitely/not/here/tables.toml");

        let err = load_tables_from_file(path).unwrap_err();

        match err {
            TablesLoadError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
