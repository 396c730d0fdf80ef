//! Loads the fixture files and runs them through the projection engine.

use std::io::Write;
use std::path::PathBuf;

use equity_tax_core::{FilingStatus, TaxProjectionEngine, TaxTables};
use equity_tax_data::{load_tables_from_file, load_tables_from_str, scenario_loader, tables_to_toml};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

const FLAT_TABLES: &str = include_str!("../test-data/tables_flat.toml");

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test-data")
        .join(name)
}

#[test]
fn fixture_scenarios_load_in_file_order() {
    let scenarios = scenario_loader::load_from_file(&fixture_path("scenarios.csv"))
        .expect("fixture scenarios should load");

    let labels: Vec<_> = scenarios.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "rsu vest",
            "iso exercise",
            "iso exercise with credit",
            "joint exercise",
        ]
    );
    assert_eq!(scenarios[3].inputs.filing_status, FilingStatus::MarriedFilingJointly);
    assert_eq!(scenarios[2].inputs.federal_amt_credit_available, dec!(2000));
}

#[test]
fn fixture_scenarios_project_with_built_in_tables() {
    let tables = TaxTables::default();
    let engine = TaxProjectionEngine::new(&tables);
    let scenarios = scenario_loader::load_from_file(&fixture_path("scenarios.csv")).unwrap();

    let totals: Vec<_> = scenarios
        .iter()
        .map(|s| engine.project(&s.inputs).unwrap().total_additional_due)
        .collect();

    assert_eq!(
        totals,
        vec![
            dec!(-18470.715),
            dec!(-3802.715),
            dec!(-5802.715),
            dec!(28544.576),
        ]
    );
}

#[test]
fn flat_fixture_tables_drive_the_engine() {
    let tables = load_tables_from_file(&fixture_path("tables_flat.toml"))
        .expect("fixture tables should load");
    let engine = TaxProjectionEngine::new(&tables);
    let scenarios = scenario_loader::load_from_file(&fixture_path("scenarios.csv")).unwrap();

    let rsu = engine.project(&scenarios[0].inputs).unwrap();
    assert_eq!(rsu.tax_year, 2030);
    assert_eq!(rsu.federal.regular_federal_tax, dec!(38000));
    assert_eq!(rsu.federal.tentative_amt_tax, dec!(39000));
    assert_eq!(rsu.federal.additional_federal_tax, dec!(1000));
    assert_eq!(rsu.federal.additional_federal_due, dec!(-1000));
    assert_eq!(rsu.state.additional_state_due, dec!(-250));
    assert_eq!(rsu.total_additional_due, dec!(-1250));

    let iso = engine.project(&scenarios[1].inputs).unwrap();
    assert_eq!(iso.income.federal_taxable_income, dec!(90000));
    assert_eq!(iso.income.amt_income, dec!(100000));
    assert_eq!(iso.federal.additional_federal_tax, dec!(8000));
    assert_eq!(iso.state.ca_taxable_income, dec!(145000));
    assert_eq!(iso.total_additional_due, dec!(8250));
}

#[test]
fn include_str_and_file_loading_agree() {
    let from_str = load_tables_from_str(FLAT_TABLES).unwrap();
    let from_file = load_tables_from_file(&fixture_path("tables_flat.toml")).unwrap();

    assert_eq!(from_str, from_file);
}

#[test]
fn dumped_tables_reload_from_disk() {
    let tables = TaxTables::default();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(tables_to_toml(&tables).unwrap().as_bytes())
        .unwrap();

    let reloaded = load_tables_from_file(file.path()).unwrap();

    assert_eq!(reloaded, tables);
}

#[test]
fn scenario_file_with_bad_row_fails_whole_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "filing_status,regular_income").unwrap();
    writeln!(file, "S,1000").unwrap();
    writeln!(file, "S,-1000").unwrap();

    let err = scenario_loader::load_from_file(file.path()).unwrap_err();

    assert_eq!(err.to_string(), "row 2: regular_income must be non-negative, got -1000");
}
