mod bracket_schedule;
mod filing_status;
mod tax_inputs;
mod tax_projection;
mod tax_tables;

pub use bracket_schedule::{Bracket, BracketSchedule, ScheduleError};
pub use filing_status::FilingStatus;
pub use tax_inputs::{InputError, MAX_INPUT_AMOUNT, MAX_UNIT_COUNT, TaxInputs};
pub use tax_projection::{FederalSummary, IncomeBreakdown, StateSummary, TaxProjectionResult};
pub use tax_tables::{AmtSchedule, FilingStatusParameters, TablesError, TaxTables, WithholdingRates};
