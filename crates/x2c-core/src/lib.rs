//! Core domain models for xpath2css
//!
//! This crate contains:
//! - Candidate model (what the extractor finds)
//! - Classification decisions (what the classifier says about it)
//! - Per-file and per-run outcome counters

pub mod candidate;
pub mod decision;
pub mod outcome;

pub use candidate::{Candidate, CandidateKind, LOCATOR_MARKERS, QuoteStyle, starts_with_marker};
pub use decision::{Classification, Decision, SkipReason};
pub use outcome::{RewriteOutcome, RunSummary};
