//! End-to-end runs of the `tax-projection` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn tax_projection() -> Command {
    let mut cmd = Command::cargo_bin("tax-projection").expect("binary should build");
    cmd.env_remove("EQUITY_TAX_TABLES").env_remove("RUST_LOG");
    cmd
}

#[test]
fn project_prints_the_three_summary_tables() {
    tax_projection()
        .args([
            "project",
            "--regular-income",
            "150,000",
            "--rsu-units",
            "1000",
            "--fmv",
            "50",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Federal Tax Summary"))
        .stdout(predicate::str::contains("California State Tax Summary"))
        .stdout(predicate::str::contains("Overall Tax Impact"))
        .stdout(predicate::str::contains("38,352.00"))
        .stdout(predicate::str::contains("-18,470.72"))
        .stdout(predicate::str::contains("Disclaimer:"));
}

#[test]
fn project_json_for_married_filers() {
    tax_projection()
        .args([
            "--format",
            "json",
            "project",
            "--status",
            "mfj",
            "--regular-income",
            "300000",
            "--iso-units",
            "2000",
            "--fmv",
            "100",
            "--strike",
            "20",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"filing_status\": \"MarriedFilingJointly\""))
        .stdout(predicate::str::contains("\"additional_federal_tax\""));
}

#[test]
fn negative_input_fails_with_field_name() {
    tax_projection()
        .args(["project", "--regular-income", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("regular_income"));
}

#[test]
fn unparseable_amount_is_rejected_by_argument_parsing() {
    tax_projection()
        .args(["project", "--fmv", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid decimal 'lots'"));
}

#[test]
fn batch_projects_each_row() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "label,filing_status,regular_income,iso_units,fair_market_value,iso_strike_price").unwrap();
    writeln!(file, "no equity,S,80000,,,").unwrap();
    writeln!(file, "exercise,S,100000,1000,60,10").unwrap();

    tax_projection()
        .arg("batch")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("=== no equity (2025, Single) ==="))
        .stdout(predicate::str::contains("=== exercise (2025, Single) ==="))
        .stdout(predicate::str::contains("3,712.50"));
}

#[test]
fn batch_reports_bad_rows() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "filing_status,regular_income").unwrap();
    writeln!(file, "XYZ,1000").unwrap();

    tax_projection()
        .arg("batch")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognised filing status 'XYZ' on row 1"));
}

#[test]
fn assumptions_lists_both_filing_statuses() {
    tax_projection()
        .arg("assumptions")
        .assert()
        .success()
        .stdout(predicate::str::contains("Filing status: Single"))
        .stdout(predicate::str::contains("Filing status: Married Filing Jointly"))
        .stdout(predicate::str::contains("Federal standard deduction: $14,000.00"));
}

#[test]
fn tables_file_replaces_built_in_tables() {
    let mut tables = tempfile::NamedTempFile::new().unwrap();
    let toml = std::fs::read_to_string(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../tax-data/test-data/tables_flat.toml"
    ))
    .unwrap();
    tables.write_all(toml.as_bytes()).unwrap();

    tax_projection()
        .arg("--tables")
        .arg(tables.path())
        .args(["project", "--regular-income", "100000", "--iso-units", "1000", "--fmv", "60", "--strike", "10"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2030 Tax Projection (Single)"))
        .stdout(predicate::str::contains("8,250.00"));
}

#[test]
fn tables_env_var_is_honoured() {
    tax_projection()
        .env("EQUITY_TAX_TABLES", "/no/such/tables.toml")
        .arg("assumptions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/tables.toml"));
}

#[test]
fn log_file_receives_events() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("projection.log");

    tax_projection()
        .args(["--log-level", "info", "--log-file"])
        .arg(&log)
        .args(["project", "--regular-income", "50000"])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&log).unwrap();
    assert!(contents.contains("projected"));
}
