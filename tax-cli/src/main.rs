use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::debug;

use equity_tax_cli::app::{self, OutputFormat};
use equity_tax_cli::logging;
use equity_tax_cli::utils::parse_decimal;
use equity_tax_core::{FilingStatus, TaxInputs};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Federal and California tax projection for a year with RSU vesting and
/// ISO exercise.
///
/// Reports are written to stdout; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "tax-projection", version)]
struct Cli {
    /// TOML file with replacement tax tables.
    #[arg(long, global = true, env = "EQUITY_TAX_TABLES")]
    tables: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value = "table")]
    format: CliFormat,

    /// Log filter, e.g. `info` or `equity_tax_core=debug`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append logs to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project a single year.
    Project(ProjectArgs),

    /// Project every scenario in a CSV file.
    Batch {
        /// Scenario CSV (see `equity_tax_data::scenario_loader`).
        file: PathBuf,
    },

    /// Print the tax tables in use.
    Assumptions,
}

#[derive(Debug, clap::Args)]
struct ProjectArgs {
    /// Filing status.
    #[arg(long, value_enum, default_value = "s")]
    status: CliFilingStatus,

    /// Wages outside of RSU proceeds. Commas are allowed (150,000).
    #[arg(long, value_parser = parse_decimal, default_value = "0", allow_hyphen_values = true)]
    regular_income: Decimal,

    /// RSUs vesting this year.
    #[arg(long, default_value_t = 0)]
    rsu_units: u64,

    /// ISOs exercised this year.
    #[arg(long, default_value_t = 0)]
    iso_units: u64,

    /// Fair market value per unit, shared by RSUs and ISOs.
    #[arg(long, value_parser = parse_decimal, default_value = "0", allow_hyphen_values = true)]
    fmv: Decimal,

    /// ISO strike price per unit.
    #[arg(long, value_parser = parse_decimal, default_value = "0", allow_hyphen_values = true)]
    strike: Decimal,

    /// Federal AMT credit available.
    #[arg(long, value_parser = parse_decimal, default_value = "0", allow_hyphen_values = true)]
    federal_amt_credit: Decimal,

    /// California AMT credit carryover.
    #[arg(long, value_parser = parse_decimal, default_value = "0", allow_hyphen_values = true)]
    ca_amt_credit: Decimal,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFilingStatus {
    /// Single
    S,
    /// Married filing jointly
    Mfj,
}

impl From<CliFilingStatus> for FilingStatus {
    fn from(value: CliFilingStatus) -> Self {
        match value {
            CliFilingStatus::S => FilingStatus::Single,
            CliFilingStatus::Mfj => FilingStatus::MarriedFilingJointly,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFormat {
    Table,
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(value: CliFormat) -> Self {
        match value {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

impl From<ProjectArgs> for TaxInputs {
    fn from(args: ProjectArgs) -> Self {
        TaxInputs {
            regular_income: args.regular_income,
            rsu_unit_count: args.rsu_units,
            iso_unit_count: args.iso_units,
            fair_market_value_per_unit: args.fmv,
            iso_strike_price_per_unit: args.strike,
            federal_amt_credit_available: args.federal_amt_credit,
            ca_amt_credit_carryover: args.ca_amt_credit,
            filing_status: args.status.into(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging();
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }
    debug!(?cli, "parsed arguments");

    let tables = app::load_tables(cli.tables.as_deref())?;
    let format = OutputFormat::from(cli.format);

    let output = match cli.command {
        Command::Project(args) => app::project(&tables, &TaxInputs::from(args), format)?,
        Command::Batch { file } => app::batch(&tables, &file, format)?,
        Command::Assumptions => app::assumptions(&tables, format)?,
    };
    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
