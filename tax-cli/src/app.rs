use std::path::Path;

use anyhow::{Context, Result};
use equity_tax_core::{TaxInputs, TaxProjectionEngine, TaxTables};
use equity_tax_data::{load_tables_from_file, scenario_loader};
use tracing::{debug, info};

use crate::report::{
    BatchReport, LabelledProjection, ProjectionReport, TablesReport, to_json,
};

/// How command output is rendered on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Loads tables from `path`, or falls back to the built-in set.
pub fn load_tables(path: Option<&Path>) -> Result<TaxTables> {
    match path {
        Some(path) => load_tables_from_file(path)
            .with_context(|| format!("failed to load tax tables from {}", path.display())),
        None => {
            debug!("using built-in tax tables");
            Ok(TaxTables::default())
        }
    }
}

/// Projects one set of inputs.
pub fn project(
    tables: &TaxTables,
    inputs: &TaxInputs,
    format: OutputFormat,
) -> Result<String> {
    let result = TaxProjectionEngine::new(tables)
        .project(inputs)
        .context("projection failed")?;
    info!(
        filing_status = inputs.filing_status.as_str(),
        total_additional_due = %result.total_additional_due,
        "projected"
    );

    match format {
        OutputFormat::Table => Ok(ProjectionReport::new(&result, tables).to_string()),
        OutputFormat::Json => Ok(to_json(&result)?),
    }
}

/// Projects every scenario in a CSV file, in file order.
pub fn batch(
    tables: &TaxTables,
    scenario_file: &Path,
    format: OutputFormat,
) -> Result<String> {
    let scenarios = scenario_loader::load_from_file(scenario_file)
        .with_context(|| format!("failed to load scenarios from {}", scenario_file.display()))?;
    info!(count = scenarios.len(), "loaded scenarios");

    let engine = TaxProjectionEngine::new(tables);
    let results = scenarios
        .iter()
        .map(|scenario| {
            engine
                .project(&scenario.inputs)
                .with_context(|| format!("projection failed for '{}'", scenario.label))
        })
        .collect::<Result<Vec<_>>>()?;

    let projections: Vec<LabelledProjection<'_>> = scenarios
        .iter()
        .zip(&results)
        .map(|(scenario, result)| LabelledProjection {
            label: &scenario.label,
            result,
        })
        .collect();

    match format {
        OutputFormat::Table => Ok(BatchReport::new(&projections, tables).to_string()),
        OutputFormat::Json => Ok(to_json(&projections)?),
    }
}

/// Describes the tables in use.
pub fn assumptions(
    tables: &TaxTables,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(TablesReport::new(tables).to_string()),
        OutputFormat::Json => Ok(to_json(tables)?),
    }
}
