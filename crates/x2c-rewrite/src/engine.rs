//! Rewrite engine - runs extraction, classification and substitution
//!
//! Passes run in `CandidateKind::PASS_ORDER`. Every pass extracts from and
//! classifies against the text produced by the previous pass.

use tracing::debug;

use x2c_convert::{ConversionError, LocatorConverter, XpathToCss};
use x2c_core::{Candidate, CandidateKind, Classification, Decision, RewriteOutcome, SkipReason};

use crate::classify::{Classifier, DEFAULT_COUNT_ROUTINE};
use crate::extract;

/// Marker telling locator APIs the literal is a css selector
pub const DEFAULT_SELECTOR_PREFIX: &str = "css=";

/// Tunables for the rewrite engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Routine whose arguments are never rewritten (default: getXpathCount)
    pub count_routine: String,
    /// Prefix written in front of every converted selector (default: css=)
    pub selector_prefix: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            count_routine: DEFAULT_COUNT_ROUTINE.to_string(),
            selector_prefix: DEFAULT_SELECTOR_PREFIX.to_string(),
        }
    }
}

/// Rewrites the xpath literals of one file's text
pub struct RewriteEngine<C = XpathToCss> {
    converter: C,
    classifier: Classifier,
    selector_prefix: String,
}

impl RewriteEngine<XpathToCss> {
    pub fn new(options: RewriteOptions) -> Self {
        Self::with_converter(XpathToCss::new(), options)
    }
}

impl Default for RewriteEngine<XpathToCss> {
    fn default() -> Self {
        Self::new(RewriteOptions::default())
    }
}

impl<C: LocatorConverter> RewriteEngine<C> {
    pub fn with_converter(converter: C, options: RewriteOptions) -> Self {
        Self {
            converter,
            classifier: Classifier::new(options.count_routine),
            selector_prefix: options.selector_prefix,
        }
    }

    /// Rewrite every safe locator literal in `text`
    pub fn rewrite(&self, text: &str) -> RewriteOutcome {
        let mut outcome = RewriteOutcome::new(text);

        for kind in CandidateKind::PASS_ORDER {
            let current = std::mem::take(&mut outcome.new_text);
            outcome.new_text = self.run_pass(kind, &current, &mut outcome);
        }

        outcome
    }

    /// Literal body that replaces the candidate's locator
    ///
    /// The converted selector is escaped against the candidate's quote and
    /// prefixed with the selector marker.
    pub fn replacement(&self, candidate: &Candidate) -> Result<String, ConversionError> {
        let locator = candidate.quote.unescape(&candidate.locator);
        let selector = self.converter.convert(&locator)?;
        Ok(format!(
            "{}{}",
            self.selector_prefix,
            candidate.quote.escape(&selector)
        ))
    }

    fn run_pass(&self, kind: CandidateKind, text: &str, outcome: &mut RewriteOutcome) -> String {
        let candidates = extract::extract(kind, text);
        debug!("{} {} candidate(s)", candidates.len(), kind);

        let mut rewritten = String::with_capacity(text.len());
        let mut cursor = 0;

        for candidate in candidates {
            debug!("{}: {} - {}", kind, candidate.binding, candidate.locator);

            let (classification, replacement) = match self.classifier.classify(&candidate, text) {
                Classification::Accept => match self.replacement(&candidate) {
                    Ok(replacement) => {
                        debug!("  '{}' converted to '{}'", candidate.locator, replacement);
                        (Classification::Accept, Some(replacement))
                    }
                    Err(e) => {
                        debug!("  unable to convert '{}': {}", candidate.locator, e);
                        (Classification::Skip(SkipReason::ConversionFailed), None)
                    }
                },
                skip => {
                    if let Classification::Skip(reason) = skip {
                        debug!("  {} skipped: {}", candidate.binding, reason);
                    }
                    (skip, None)
                }
            };

            if let (Some(replacement), Some(before)) = (
                replacement.as_deref(),
                text.get(cursor..candidate.locator_span.start),
            ) {
                rewritten.push_str(before);
                rewritten.push_str(replacement);
                cursor = candidate.locator_span.end;
            }

            outcome.record(Decision {
                kind,
                binding: candidate.binding,
                locator: candidate.locator,
                classification,
                replacement,
            });
        }

        rewritten.push_str(text.get(cursor..).unwrap_or_default());
        rewritten
    }
}
