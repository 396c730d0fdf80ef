//! File loaders for the projection engine: scenario CSVs and tax-table TOML.

pub mod scenario_loader;
pub mod tables_loader;

pub use scenario_loader::{Scenario, ScenarioLoadError};
pub use tables_loader::{
    TablesLoadError, load_tables_from_file, load_tables_from_str, tables_to_toml,
};
