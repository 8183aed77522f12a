//! Scoring modules for AI-authorship signals.
//!
//! Each module is a pure function of the shared [`AnalysisContext`] and
//! returns a [`ModuleResult`] bounded by its own ceiling. Weights are applied
//! later, during aggregation.
//!
//! [`AnalysisContext`]: crate::analysis::AnalysisContext

mod artifacts;
mod comments;
mod completeness;
mod debug;
mod entropy;
mod errors;
mod idioms;
mod naming;
mod runner;
mod spacing;
mod structure;
mod types;

pub(crate) use debug::DEBUG_PRINT;
pub use runner::Analyzer;
pub use types::{ModuleResult, ScoringModule};

use crate::score::AnalysisResult;

/// Score a snippet with the default module weights.
pub fn analyze(code: &str) -> AnalysisResult {
    Analyzer::default().analyze(code)
}
