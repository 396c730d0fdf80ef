//! Text and JSON renderings of projection results.
//!
//! Text output mirrors the dashboard layout: three description/amount tables,
//! the assumptions behind them, and a disclaimer. Amounts are rounded half-up
//! to the cent for display only; JSON carries the unrounded figures.

use std::fmt;

use equity_tax_core::{BracketSchedule, FilingStatus, TaxProjectionResult, TaxTables};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::{format_currency, format_rate};

pub const DISCLAIMER: &str = "Disclaimer: This tool is based on simplified assumptions and \
illustrative rates for demonstration purposes. Actual tax computations are more complex and \
depend on numerous factors (deductions, credits, filing status, actual AMT rules, etc.). \
Please consult a tax professional for accurate tax projections.";

/// The three summary tables for one projection.
pub struct SummaryTables<'a> {
    result: &'a TaxProjectionResult,
    tables: &'a TaxTables,
}

impl<'a> SummaryTables<'a> {
    pub fn new(
        result: &'a TaxProjectionResult,
        tables: &'a TaxTables,
    ) -> Self {
        Self { result, tables }
    }

    fn federal_rows(&self) -> Vec<(String, Decimal)> {
        let federal = &self.result.federal;
        vec![
            ("Regular Federal Tax".to_string(), federal.regular_federal_tax),
            (
                "Tentative AMT Tax (including ISO adjustment)".to_string(),
                federal.tentative_amt_tax,
            ),
            (
                "Federal AMT Credit Available".to_string(),
                federal.federal_amt_credit_available,
            ),
            (
                "Additional Federal Tax (from AMT)".to_string(),
                federal.additional_federal_tax,
            ),
            ("Total Federal Tax Liability".to_string(), federal.total_federal_tax),
            ("Federal Withholding".to_string(), federal.federal_withholding),
            (
                "Additional Federal Tax Due (or refund negative)".to_string(),
                federal.additional_federal_due,
            ),
        ]
    }

    fn state_rows(&self) -> Vec<(String, Decimal)> {
        let state = &self.result.state;
        vec![
            ("CA Taxable Income".to_string(), state.ca_taxable_income),
            ("CA Tax Liability (before credit)".to_string(), state.ca_tax_liability),
            ("CA AMT Credit Carryover".to_string(), state.ca_amt_credit_carryover),
            (
                "CA Tax Liability (after credit)".to_string(),
                state.ca_tax_liability_after_credit,
            ),
            (
                format!(
                    "CA Withholding ({})",
                    format_rate(self.tables.withholding.california)
                ),
                state.ca_withholding,
            ),
            (
                "Additional CA Tax Due (or refund negative)".to_string(),
                state.additional_state_due,
            ),
        ]
    }

    fn overall_rows(&self) -> Vec<(String, Decimal)> {
        vec![(
            format!(
                "Total Additional Tax Due for {} (or refund negative)",
                self.result.tax_year
            ),
            self.result.total_additional_due,
        )]
    }
}

impl fmt::Display for SummaryTables<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_table(f, "Federal Tax Summary", &self.federal_rows())?;
        writeln!(f)?;
        write_table(f, "California State Tax Summary", &self.state_rows())?;
        writeln!(f)?;
        write_table(f, "Overall Tax Impact", &self.overall_rows())
    }
}

fn write_table(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    rows: &[(String, Decimal)],
) -> fmt::Result {
    const DESCRIPTION: &str = "Description";
    const AMOUNT: &str = "Amount ($)";

    let amounts: Vec<String> = rows.iter().map(|(_, value)| format_currency(*value)).collect();
    let desc_width = rows
        .iter()
        .map(|(desc, _)| desc.len())
        .chain([DESCRIPTION.len()])
        .max()
        .unwrap_or_default();
    let amount_width = amounts
        .iter()
        .map(String::len)
        .chain([AMOUNT.len()])
        .max()
        .unwrap_or_default();

    writeln!(f, "{title}")?;
    writeln!(f, "{DESCRIPTION:<desc_width$}  {AMOUNT:>amount_width$}")?;
    writeln!(f, "{}", "-".repeat(desc_width + 2 + amount_width))?;
    for ((desc, _), amount) in rows.iter().zip(&amounts) {
        writeln!(f, "{desc:<desc_width$}  {amount:>amount_width$}")?;
    }
    Ok(())
}

/// The table parameters behind a projection for one filing status.
pub struct Assumptions<'a> {
    tables: &'a TaxTables,
    status: FilingStatus,
}

impl<'a> Assumptions<'a> {
    pub fn new(
        tables: &'a TaxTables,
        status: FilingStatus,
    ) -> Self {
        Self { tables, status }
    }

    pub fn lines(&self) -> Vec<String> {
        let params = self.tables.parameters(self.status);
        let amt = &self.tables.amt;
        let withholding = &self.tables.withholding;

        vec![
            format!("Tax year: {}", self.tables.tax_year),
            format!("Filing status: {}", self.status),
            format!(
                "Federal standard deduction: ${}",
                format_currency(params.federal_standard_deduction)
            ),
            format!("Federal brackets: {}", describe_schedule(&params.federal_brackets)),
            format!(
                "Federal AMT exemption: ${}; AMT rates: {} up to ${}, {} thereafter",
                format_currency(params.amt_exemption),
                format_rate(amt.base_rate),
                format_currency(amt.threshold),
                format_rate(amt.surtax_rate),
            ),
            format!(
                "California standard deduction: ${}",
                format_currency(params.ca_standard_deduction)
            ),
            format!("California brackets: {}", describe_schedule(&params.ca_brackets)),
            format!(
                "Withholding: {} federal on wages, {} federal supplemental on RSU income, {} California on wages and RSU income",
                format_rate(withholding.federal_regular),
                format_rate(withholding.federal_supplemental),
                format_rate(withholding.california),
            ),
            "ISO bargain element = FMV - option strike price; included in AMT and California income, excluded from regular federal income".to_string(),
        ]
    }
}

impl fmt::Display for Assumptions<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Assumptions:")?;
        for line in self.lines() {
            writeln!(f, "- {line}")?;
        }
        Ok(())
    }
}

/// `10% up to $11,000.00, ..., 37% above $578,125.00`
fn describe_schedule(schedule: &BracketSchedule) -> String {
    let mut parts: Vec<String> = schedule
        .brackets()
        .iter()
        .map(|b| format!("{} up to ${}", format_rate(b.rate), format_currency(b.upper_bound)))
        .collect();
    if schedule.brackets().is_empty() {
        parts.push(format!("{} flat", format_rate(schedule.top_rate())));
    } else {
        parts.push(format!(
            "{} above ${}",
            format_rate(schedule.top_rate()),
            format_currency(schedule.top_threshold())
        ));
    }
    parts.join(", ")
}

/// A single projection: heading, summary tables, assumptions and disclaimer.
pub struct ProjectionReport<'a> {
    result: &'a TaxProjectionResult,
    tables: &'a TaxTables,
}

impl<'a> ProjectionReport<'a> {
    pub fn new(
        result: &'a TaxProjectionResult,
        tables: &'a TaxTables,
    ) -> Self {
        Self { result, tables }
    }
}

impl fmt::Display for ProjectionReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(
            f,
            "{} Tax Projection ({})",
            self.result.tax_year, self.result.filing_status
        )?;
        writeln!(f)?;
        write!(f, "{}", SummaryTables::new(self.result, self.tables))?;
        writeln!(f)?;
        write!(f, "{}", Assumptions::new(self.tables, self.result.filing_status))?;
        writeln!(f)?;
        writeln!(f, "{DISCLAIMER}")
    }
}

/// One row of `batch` output.
#[derive(Debug, Serialize)]
pub struct LabelledProjection<'a> {
    pub label: &'a str,
    pub result: &'a TaxProjectionResult,
}

/// Several labelled projections sharing one set of tables.
pub struct BatchReport<'a> {
    projections: &'a [LabelledProjection<'a>],
    tables: &'a TaxTables,
}

impl<'a> BatchReport<'a> {
    pub fn new(
        projections: &'a [LabelledProjection<'a>],
        tables: &'a TaxTables,
    ) -> Self {
        Self {
            projections,
            tables,
        }
    }
}

impl fmt::Display for BatchReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for projection in self.projections {
            writeln!(
                f,
                "=== {} ({}, {}) ===",
                projection.label, projection.result.tax_year, projection.result.filing_status
            )?;
            writeln!(f)?;
            write!(f, "{}", SummaryTables::new(projection.result, self.tables))?;
            writeln!(f)?;
        }

        for &status in FilingStatus::all() {
            if self
                .projections
                .iter()
                .any(|p| p.result.filing_status == status)
            {
                write!(f, "{}", Assumptions::new(self.tables, status))?;
                writeln!(f)?;
            }
        }
        writeln!(f, "{DISCLAIMER}")
    }
}

/// The `assumptions` command: every filing status in the tables.
pub struct TablesReport<'a> {
    tables: &'a TaxTables,
}

impl<'a> TablesReport<'a> {
    pub fn new(tables: &'a TaxTables) -> Self {
        Self { tables }
    }
}

impl fmt::Display for TablesReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for (i, &status) in FilingStatus::all().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", Assumptions::new(self.tables, status))?;
        }
        Ok(())
    }
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}
