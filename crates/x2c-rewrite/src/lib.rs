//! Conservative rewriting of xpath literals in source text
//!
//! Rewriting runs in three stages per candidate kind:
//! - extract: find quoted locator literals in call/assignment shapes
//! - classify: decide whether the literal is safe to touch
//! - substitute: splice the converted selector into its exact span

pub mod classify;
pub mod engine;
pub mod extract;

pub use classify::Classifier;
pub use engine::{RewriteEngine, RewriteOptions};
pub use extract::{count_markers, extract};
