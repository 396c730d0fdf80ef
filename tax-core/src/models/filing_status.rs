use serde::{Deserialize, Serialize};

/// Filing status of the taxpayer for the projected year.
///
/// Selects the bracket schedules, standard deductions and AMT exemption
/// through [`TaxTables::parameters`](crate::TaxTables::parameters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FilingStatus {
    #[default]
    Single,
    MarriedFilingJointly,
}

impl FilingStatus {
    pub fn all() -> &'static [FilingStatus] {
        &[FilingStatus::Single, FilingStatus::MarriedFilingJointly]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
        }
    }

    /// Parses a short status code. Matching is case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Some(Self::Single),
            "MFJ" => Some(Self::MarriedFilingJointly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
        }
    }
}

impl std::fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
