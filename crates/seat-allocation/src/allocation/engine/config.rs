use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How applicants sharing a priority rank are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier in the supplied roster wins.
    #[default]
    InputOrder,
    /// Lexically smaller applicant id wins.
    ApplicantId,
    /// Shared ranks fail validation.
    Reject,
}

impl TieBreak {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InputOrder => "input_order",
            Self::ApplicantId => "applicant_id",
            Self::Reject => "reject",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "input_order" | "input-order" | "stable" => Ok(Self::InputOrder),
            "applicant_id" | "applicant-id" | "id" => Ok(Self::ApplicantId),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown tie-break policy '{other}' (expected input_order, applicant_id or reject)"
            )),
        }
    }
}

/// Knobs for a single allocation run and for preference intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationConfig {
    pub tie_break: TieBreak,
}
