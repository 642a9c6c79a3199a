//! Per-file and per-run counters
//!
//! Counters are plain values: the engine returns one `RewriteOutcome` per
//! file and the walker folds them into a `RunSummary`.

use serde::{Deserialize, Serialize};

use crate::decision::{Classification, Decision};

/// Result of rewriting one file's text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub new_text: String,
    pub attempted: usize,
    pub accepted: usize,
    pub skipped: usize,
    pub decisions: Vec<Decision>,
}

impl RewriteOutcome {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            new_text: text.into(),
            ..Default::default()
        }
    }

    /// Record a decision and bump the matching counters
    pub fn record(&mut self, decision: Decision) {
        self.attempted += 1;
        match decision.classification {
            Classification::Accept => self.accepted += 1,
            Classification::Skip(_) => self.skipped += 1,
        }
        self.decisions.push(decision);
    }

    /// Whether the rewrite produced text different from `original`
    pub fn changed(&self, original: &str) -> bool {
        self.new_text != original
    }
}

/// Aggregate counters for a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Loose count of quoted literals starting with a marker
    pub marker_count: usize,
    /// Files whose extension matched the target extension
    pub files_matched: usize,
    /// Files actually written back
    pub files_changed: usize,
    /// Literals rewritten to selectors
    pub replaced: usize,
    /// Literals left alone by the classifier or the converter
    pub skipped: usize,
}

impl RunSummary {
    /// Fold one file's outcome into the run totals
    pub fn absorb(&mut self, outcome: &RewriteOutcome, written: bool) {
        self.files_matched += 1;
        self.replaced += outcome.accepted;
        self.skipped += outcome.skipped;
        if written {
            self.files_changed += 1;
        }
    }
}
