//! Safety classification
//!
//! Each rule is a textual predicate over the whole file. None of them parse
//! the language; they look for the usages that would break if a locator
//! bound to a name silently became a selector:
//! - concatenated into a larger string
//! - interpolated into a double-quoted string
//! - copied into another variable and used from there
//!
//! False skips and false accepts are both possible.

use regex::Regex;

use x2c_core::{Candidate, CandidateKind, Classification, SkipReason};

/// Routine whose xpath arguments are never rewritten
pub const DEFAULT_COUNT_ROUTINE: &str = "getXpathCount";

/// Decides whether a candidate can be rewritten
#[derive(Debug, Clone)]
pub struct Classifier {
    count_routine: String,
}

impl Classifier {
    pub fn new(count_routine: impl Into<String>) -> Self {
        Self {
            count_routine: count_routine.into(),
        }
    }

    /// Classify `candidate` against the file text it was extracted from
    pub fn classify(&self, candidate: &Candidate, text: &str) -> Classification {
        let skip = match candidate.kind {
            CandidateKind::CallArgument => self.call_argument_skip(candidate),
            CandidateKind::PropertyAssignment => property_skip(&candidate.binding, text),
            CandidateKind::VariableAssignment => variable_skip(&candidate.binding, text),
        };

        skip.map_or(Classification::Accept, Classification::Skip)
    }

    fn call_argument_skip(&self, candidate: &Candidate) -> Option<SkipReason> {
        if is_count_routine(&candidate.binding, &self.count_routine) {
            Some(SkipReason::CountRoutine)
        } else if is_interpolated_argument(candidate) {
            Some(SkipReason::InterpolatedArgument)
        } else {
            None
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_COUNT_ROUTINE)
    }
}

fn property_skip(access: &str, text: &str) -> Option<SkipReason> {
    if property_concatenated(access, text) {
        Some(SkipReason::PropertyConcatenated)
    } else if property_interpolated(access, text) {
        Some(SkipReason::PropertyInterpolated)
    } else if property_copied(access, text) {
        Some(SkipReason::PropertyCopied)
    } else {
        None
    }
}

fn variable_skip(variable: &str, text: &str) -> Option<SkipReason> {
    if variable_interpolated(variable, text) {
        Some(SkipReason::VariableInterpolated)
    } else if variable_concatenated(variable, text) {
        Some(SkipReason::VariableConcatenated)
    } else {
        None
    }
}

/// The call is the count routine
pub fn is_count_routine(routine: &str, count_routine: &str) -> bool {
    routine == count_routine
}

/// Double-quoted argument with a `$variable` inside: its runtime value is
/// unknown
pub fn is_interpolated_argument(candidate: &Candidate) -> bool {
    candidate.quote.interpolates() && candidate.locator.contains('$')
}

/// `'...' . $this->_prop` or `$this->_prop . '...'`
pub fn property_concatenated(access: &str, text: &str) -> bool {
    let name = regex::escape(access);
    matches(
        &format!(r#"['"]\s*\.\s*{name}\b|{name}\b\s*\.\s*['"]"#),
        text,
    )
}

/// `"... $this->_prop ..."` on one line
pub fn property_interpolated(access: &str, text: &str) -> bool {
    used_in_double_quotes(access, text)
}

/// `$other = $this->_prop;`
pub fn property_copied(access: &str, text: &str) -> bool {
    let name = regex::escape(access);
    matches(&format!(r"\$\w+(?:->\w+)*\s*=\s*{name}\s*;"), text)
}

/// `"... $var ..."` on one line
pub fn variable_interpolated(variable: &str, text: &str) -> bool {
    used_in_double_quotes(variable, text)
}

/// `. $var` or `$var .`
pub fn variable_concatenated(variable: &str, text: &str) -> bool {
    let name = regex::escape(variable);
    matches(&format!(r"\.\s?{name}\b|{name}\b\s?\."), text)
}

fn used_in_double_quotes(name: &str, text: &str) -> bool {
    let name = regex::escape(name);
    matches(&format!(r#"".*{name}\b.*""#), text)
}

// An unbuildable pattern counts as a match: skipping is the safe answer.
fn matches(pattern: &str, text: &str) -> bool {
    Regex::new(pattern).map_or(true, |re| re.is_match(text))
}
