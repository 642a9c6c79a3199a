use serde::{Deserialize, Serialize};
use std::fmt;

use crate::candidate::CandidateKind;

/// Why a candidate was left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Argument of the count routine (`getXpathCount`)
    CountRoutine,
    /// Double-quoted argument containing a `$variable`
    InterpolatedArgument,
    /// Property concatenated with a quoted literal elsewhere
    PropertyConcatenated,
    /// Property used inside a double-quoted string elsewhere
    PropertyInterpolated,
    /// Property copied into another variable
    PropertyCopied,
    /// Variable used inside a double-quoted string elsewhere
    VariableInterpolated,
    /// Variable used next to the `.` operator elsewhere
    VariableConcatenated,
    /// The converter could not express the locator as a selector
    ConversionFailed,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::CountRoutine => "argument of the count routine",
            SkipReason::InterpolatedArgument => "interpolated argument",
            SkipReason::PropertyConcatenated => "property used in concatenation",
            SkipReason::PropertyInterpolated => "property used inside double quotes",
            SkipReason::PropertyCopied => "property assigned to another variable",
            SkipReason::VariableInterpolated => "variable used inside double quotes",
            SkipReason::VariableConcatenated => "variable used in concatenation",
            SkipReason::ConversionFailed => "conversion failed",
        };
        f.write_str(reason)
    }
}

/// Classifier verdict for one candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "verdict", content = "reason")]
pub enum Classification {
    Accept,
    Skip(SkipReason),
}

impl Classification {
    pub fn is_accept(&self) -> bool {
        matches!(self, Classification::Accept)
    }
}

/// Final record of what happened to a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub kind: CandidateKind,
    pub binding: String,
    pub locator: String,
    pub classification: Classification,
    /// Replacement literal body, set only for rewritten candidates
    pub replacement: Option<String>,
}
