//! Analyzer that runs every scoring module over a snippet.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::analysis::AnalysisContext;
use crate::score::{self, AnalysisResult, MIN_CODE_CHARS};

use super::{ModuleResult, ScoringModule};

/// Runs the fixed module registry and aggregates the results.
///
/// Stateless apart from its weights; one instance can be shared across
/// threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Analyzer {
    weights: BTreeMap<ScoringModule, f64>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self {
            weights: ScoringModule::ALL.iter().map(|m| (*m, m.weight())).collect(),
        }
    }
}

impl Analyzer {
    /// Create an analyzer with the default module weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the weight of individual modules.
    pub fn with_weights(mut self, overrides: &HashMap<ScoringModule, f64>) -> Self {
        for (module, weight) in overrides {
            self.weights.insert(*module, *weight);
        }
        self
    }

    /// Effective weight of a module.
    pub fn weight(&self, module: ScoringModule) -> f64 {
        self.weights
            .get(&module)
            .copied()
            .unwrap_or_else(|| module.weight())
    }

    /// Score a snippet. Never fails: short input yields the degenerate result.
    pub fn analyze(&self, code: &str) -> AnalysisResult {
        let chars = code.trim().chars().count();
        if chars < MIN_CODE_CHARS {
            debug!(chars, "input below minimum length");
            return AnalysisResult::insufficient();
        }

        let ctx = AnalysisContext::new(code);
        let breakdown: BTreeMap<ScoringModule, ModuleResult> = ScoringModule::ALL
            .iter()
            .map(|m| (*m, m.score(&ctx)))
            .collect();

        let likelihood = score::weighted_likelihood(&breakdown, |m| self.weight(m));
        let confidence = score::confidence_for(ctx.non_empty_lines.len());
        let reasons = score::collect_reasons(&breakdown);

        debug!(
            likelihood,
            confidence,
            language = %ctx.language,
            tokens = ctx.tokens.len(),
            "analysis complete"
        );

        AnalysisResult {
            likelihood,
            confidence,
            language: ctx.language,
            reasons,
            breakdown,
        }
    }
}
