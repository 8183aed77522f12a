//! Aggregation and classification for codesniff.
//!
//! Combines per-module results into a 0-100 AI likelihood, a size-based
//! confidence and a five-tier verdict.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::analysis::Language;
use crate::detect::{ModuleResult, ScoringModule};

/// Inputs whose trimmed length is below this are not analyzed.
pub const MIN_CODE_CHARS: usize = 30;

/// Reason attached to the degenerate result.
pub const INSUFFICIENT_CODE: &str = "Insufficient code";

/// Confidence bounds.
pub mod confidence {
    pub const BASE: f64 = 50.0;
    pub const PER_LINE: f64 = 0.5;
    pub const MAX: f64 = 95.0;
}

/// Verdict thresholds (inclusive lower bounds).
pub mod tiers {
    pub const VERY_HIGH_MIN: u32 = 80;
    pub const HIGH_MIN: u32 = 60;
    pub const MODERATE_MIN: u32 = 40;
    pub const LOW_MIN: u32 = 20;
}

/// The outcome of analyzing one snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// 0-100, higher = more likely AI-generated
    pub likelihood: u32,
    /// 50-95 for analyzed input, 0 for the degenerate result
    pub confidence: f64,
    pub language: Language,
    /// Deduplicated reasons; order carries no meaning
    pub reasons: Vec<String>,
    /// Per-module results, iterated in evaluation order
    pub breakdown: BTreeMap<ScoringModule, ModuleResult>,
}

impl AnalysisResult {
    /// Result for input too short to analyze.
    pub fn insufficient() -> Self {
        Self {
            likelihood: 0,
            confidence: 0.0,
            language: Language::Unknown,
            reasons: vec![INSUFFICIENT_CODE.to_string()],
            breakdown: BTreeMap::new(),
        }
    }

    /// Whether this is the short-input result (no modules ran).
    pub fn is_insufficient(&self) -> bool {
        self.breakdown.is_empty() && self.language == Language::Unknown
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_likelihood(self.likelihood)
    }
}

/// Five-tier classification of a likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    VeryHigh,
    High,
    Moderate,
    Low,
    Minimal,
}

impl Verdict {
    pub fn from_likelihood(likelihood: u32) -> Self {
        match likelihood {
            l if l >= tiers::VERY_HIGH_MIN => Verdict::VeryHigh,
            l if l >= tiers::HIGH_MIN => Verdict::High,
            l if l >= tiers::MODERATE_MIN => Verdict::Moderate,
            l if l >= tiers::LOW_MIN => Verdict::Low,
            _ => Verdict::Minimal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::VeryHigh => "Very High AI likelihood",
            Verdict::High => "High AI likelihood",
            Verdict::Moderate => "Moderate AI likelihood",
            Verdict::Low => "Low AI likelihood",
            Verdict::Minimal => "Minimal AI indicators",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Map a result to its verdict label.
pub fn classify(result: &AnalysisResult) -> &'static str {
    result.verdict().label()
}

/// Weighted mean of normalized module scores, scaled to 0-100.
pub fn weighted_likelihood<F>(breakdown: &BTreeMap<ScoringModule, ModuleResult>, weight: F) -> u32
where
    F: Fn(ScoringModule) -> f64,
{
    let mut weighted = 0.0;
    let mut total_weight = 0.0;

    for (module, result) in breakdown {
        let w = weight(*module);
        weighted += result.normalized() * w;
        total_weight += w;
    }

    if total_weight <= 0.0 {
        return 0;
    }

    let likelihood = (weighted / total_weight * 100.0).round();
    likelihood.clamp(0.0, 100.0) as u32
}

/// Saturating confidence from the number of non-empty lines.
pub fn confidence_for(non_empty_lines: usize) -> f64 {
    (confidence::BASE + non_empty_lines as f64 * confidence::PER_LINE).min(confidence::MAX)
}

/// Concatenate module reasons in evaluation order, dropping repeats.
pub fn collect_reasons(breakdown: &BTreeMap<ScoringModule, ModuleResult>) -> Vec<String> {
    let mut seen = HashSet::new();
    breakdown
        .values()
        .flat_map(|r| r.reasons.iter())
        .filter(|r| seen.insert(r.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_breakdown(scores: [u32; 10]) -> BTreeMap<ScoringModule, ModuleResult> {
        ScoringModule::ALL
            .iter()
            .zip(scores)
            .map(|(m, s)| {
                let mut r = ModuleResult::new(m.max_score());
                if s > 0 {
                    r.add(s, "reason");
                }
                (*m, r)
            })
            .collect()
    }

    #[test]
    fn test_verdict_boundaries() {
        assert_eq!(Verdict::from_likelihood(100).label(), "Very High AI likelihood");
        assert_eq!(Verdict::from_likelihood(80).label(), "Very High AI likelihood");
        assert_eq!(Verdict::from_likelihood(79).label(), "High AI likelihood");
        assert_eq!(Verdict::from_likelihood(60).label(), "High AI likelihood");
        assert_eq!(Verdict::from_likelihood(59).label(), "Moderate AI likelihood");
        assert_eq!(Verdict::from_likelihood(40).label(), "Moderate AI likelihood");
        assert_eq!(Verdict::from_likelihood(39).label(), "Low AI likelihood");
        assert_eq!(Verdict::from_likelihood(20).label(), "Low AI likelihood");
        assert_eq!(Verdict::from_likelihood(19).label(), "Minimal AI indicators");
        assert_eq!(Verdict::from_likelihood(0).label(), "Minimal AI indicators");
    }

    #[test]
    fn test_classify_uses_likelihood() {
        let mut result = AnalysisResult::insufficient();
        assert_eq!(classify(&result), "Minimal AI indicators");
        result.likelihood = 60;
        assert_eq!(classify(&result), "High AI likelihood");
    }

    #[test]
    fn test_weighted_likelihood_empty_and_zero() {
        assert_eq!(weighted_likelihood(&BTreeMap::new(), |m| m.weight()), 0);
        assert_eq!(weighted_likelihood(&full_breakdown([0; 10]), |m| m.weight()), 0);
    }

    #[test]
    fn test_weighted_likelihood_single_module() {
        // ai_artifacts at 18/18 with weight 1.5 over total weight 11.0 -> 13.6
        let mut scores = [0; 10];
        scores[5] = 18;
        let breakdown = full_breakdown(scores);
        assert_eq!(weighted_likelihood(&breakdown, |m| m.weight()), 14);
    }

    #[test]
    fn test_weighted_likelihood_all_at_ceiling() {
        let scores = [15, 12, 14, 12, 10, 18, 8, 10, 11, 10];
        let breakdown = full_breakdown(scores);
        assert_eq!(weighted_likelihood(&breakdown, |m| m.weight()), 100);
    }

    #[test]
    fn test_weighted_likelihood_custom_weights() {
        let mut scores = [0; 10];
        scores[0] = 15;
        let breakdown = full_breakdown(scores);
        let only_comments = |m: ScoringModule| {
            if m == ScoringModule::CommentStyle {
                1.0
            } else {
                0.0
            }
        };
        assert_eq!(weighted_likelihood(&breakdown, only_comments), 100);
    }

    #[test]
    fn test_confidence_saturates() {
        assert_eq!(confidence_for(0), 50.0);
        assert_eq!(confidence_for(10), 55.0);
        assert_eq!(confidence_for(90), 95.0);
        assert_eq!(confidence_for(1000), 95.0);
    }

    #[test]
    fn test_collect_reasons_dedups() {
        let mut breakdown = BTreeMap::new();
        let mut a = ModuleResult::new(10);
        a.add(4, "shared");
        let mut b = ModuleResult::new(10);
        b.add(4, "shared");
        b.add(4, "unique");
        breakdown.insert(ScoringModule::CommentStyle, a);
        breakdown.insert(ScoringModule::Naming, b);
        assert_eq!(collect_reasons(&breakdown), vec!["shared", "unique"]);
    }

    #[test]
    fn test_insufficient_shape() {
        let r = AnalysisResult::insufficient();
        assert_eq!(r.likelihood, 0);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(r.language, Language::Unknown);
        assert_eq!(r.reasons, vec![INSUFFICIENT_CODE]);
        assert!(r.breakdown.is_empty());
        assert!(r.is_insufficient());
    }
}
