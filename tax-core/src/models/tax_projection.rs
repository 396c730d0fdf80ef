use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FilingStatus;

/// Income figures derived from the equity events, and the taxable bases
/// built from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeBreakdown {
    /// RSU units × fair market value; taxed as ordinary wages.
    pub rsu_income: Decimal,
    /// Per-unit ISO spread, `max(0, FMV − strike)`.
    pub iso_bargain_element: Decimal,
    /// ISO units × bargain element; an AMT preference item.
    pub iso_adjustment: Decimal,
    /// Regular federal base. Excludes the ISO adjustment.
    pub federal_taxable_income: Decimal,
    /// AMT base. Includes the ISO adjustment.
    pub amt_income: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalSummary {
    pub regular_federal_tax: Decimal,
    pub tentative_amt_tax: Decimal,
    pub federal_amt_credit_available: Decimal,
    /// AMT in excess of regular tax after the credit, never negative.
    pub additional_federal_tax: Decimal,
    pub total_federal_tax: Decimal,
    pub federal_withholding: Decimal,
    /// Negative when withholding exceeds the liability.
    pub additional_federal_due: Decimal,
}

impl FederalSummary {
    /// True when AMT pushes the liability above the regular tax.
    pub fn amt_applies(&self) -> bool {
        self.additional_federal_tax > Decimal::ZERO
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSummary {
    pub ca_taxable_income: Decimal,
    pub ca_tax_liability: Decimal,
    pub ca_amt_credit_carryover: Decimal,
    pub ca_tax_liability_after_credit: Decimal,
    pub ca_withholding: Decimal,
    /// Negative when withholding exceeds the liability.
    pub additional_state_due: Decimal,
}

/// Every intermediate and final figure of one projection.
///
/// Values carry full precision; round only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProjectionResult {
    pub tax_year: i32,
    pub filing_status: FilingStatus,
    pub income: IncomeBreakdown,
    pub federal: FederalSummary,
    pub state: StateSummary,
    /// Federal plus state amount still due; negative means a net refund.
    pub total_additional_due: Decimal,
}

impl TaxProjectionResult {
    pub fn is_refund(&self) -> bool {
        self.total_additional_due < Decimal::ZERO
    }
}
