//! Core types for scoring modules.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisContext;

use super::{artifacts, comments, completeness, debug, entropy, errors, idioms, naming, spacing, structure};

/// Outcome of one scoring module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleResult {
    /// Points achieved, never above `max_score`.
    pub score: u32,
    /// Ceiling for this module.
    pub max_score: u32,
    pub reasons: Vec<String>,
}

impl ModuleResult {
    /// An empty result for a module with the given ceiling.
    pub fn new(max_score: u32) -> Self {
        Self {
            score: 0,
            max_score,
            reasons: Vec::new(),
        }
    }

    /// Award points for a triggered heuristic.
    pub fn add(&mut self, points: u32, reason: &str) {
        debug_assert!(
            self.score + points <= self.max_score,
            "module exceeded its ceiling: {} + {} > {}",
            self.score,
            points,
            self.max_score
        );
        self.score = (self.score + points).min(self.max_score);
        self.reasons.push(reason.to_string());
    }

    /// Score normalized to `[0, 1]`.
    pub fn normalized(&self) -> f64 {
        if self.max_score == 0 {
            return 0.0;
        }
        self.score as f64 / self.max_score as f64
    }
}

/// The fixed set of scoring modules, declared in evaluation order.
///
/// `Ord` follows declaration order, so a `BTreeMap` keyed by module iterates
/// in the same order the modules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringModule {
    CommentStyle,
    Naming,
    Structure,
    Completeness,
    ErrorHandling,
    AiArtifacts,
    Entropy,
    Idioms,
    DebugAbsence,
    StatisticalSpacing,
}

impl ScoringModule {
    /// Every module, in evaluation order.
    pub const ALL: [ScoringModule; 10] = [
        ScoringModule::CommentStyle,
        ScoringModule::Naming,
        ScoringModule::Structure,
        ScoringModule::Completeness,
        ScoringModule::ErrorHandling,
        ScoringModule::AiArtifacts,
        ScoringModule::Entropy,
        ScoringModule::Idioms,
        ScoringModule::DebugAbsence,
        ScoringModule::StatisticalSpacing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringModule::CommentStyle => "comment_style",
            ScoringModule::Naming => "naming",
            ScoringModule::Structure => "structure",
            ScoringModule::Completeness => "completeness",
            ScoringModule::ErrorHandling => "error_handling",
            ScoringModule::AiArtifacts => "ai_artifacts",
            ScoringModule::Entropy => "entropy",
            ScoringModule::Idioms => "idioms",
            ScoringModule::DebugAbsence => "debug_absence",
            ScoringModule::StatisticalSpacing => "statistical_spacing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.as_str() == s)
    }

    /// Default aggregation weight.
    pub fn weight(&self) -> f64 {
        match self {
            ScoringModule::CommentStyle => 1.2,
            ScoringModule::Naming => 1.0,
            ScoringModule::Structure => 1.3,
            ScoringModule::Completeness => 1.1,
            ScoringModule::ErrorHandling => 0.9,
            ScoringModule::AiArtifacts => 1.5,
            ScoringModule::Entropy => 1.0,
            ScoringModule::Idioms => 0.8,
            ScoringModule::DebugAbsence => 1.2,
            ScoringModule::StatisticalSpacing => 1.0,
        }
    }

    /// Score ceiling.
    pub fn max_score(&self) -> u32 {
        match self {
            ScoringModule::CommentStyle => comments::MAX_SCORE,
            ScoringModule::Naming => naming::MAX_SCORE,
            ScoringModule::Structure => structure::MAX_SCORE,
            ScoringModule::Completeness => completeness::MAX_SCORE,
            ScoringModule::ErrorHandling => errors::MAX_SCORE,
            ScoringModule::AiArtifacts => artifacts::MAX_SCORE,
            ScoringModule::Entropy => entropy::MAX_SCORE,
            ScoringModule::Idioms => idioms::MAX_SCORE,
            ScoringModule::DebugAbsence => debug::MAX_SCORE,
            ScoringModule::StatisticalSpacing => spacing::MAX_SCORE,
        }
    }

    /// Run this module over a context.
    pub fn score(&self, ctx: &AnalysisContext<'_>) -> ModuleResult {
        match self {
            ScoringModule::CommentStyle => comments::analyze_comments(ctx),
            ScoringModule::Naming => naming::analyze_naming(ctx),
            ScoringModule::Structure => structure::analyze_structure(ctx),
            ScoringModule::Completeness => completeness::analyze_completeness(ctx),
            ScoringModule::ErrorHandling => errors::analyze_error_handling(ctx),
            ScoringModule::AiArtifacts => artifacts::detect_ai_artifacts(ctx),
            ScoringModule::Entropy => entropy::analyze_entropy(ctx),
            ScoringModule::Idioms => idioms::analyze_idioms(ctx),
            ScoringModule::DebugAbsence => debug::analyze_debug_absence(ctx),
            ScoringModule::StatisticalSpacing => spacing::analyze_statistical_spacing(ctx),
        }
    }
}

impl std::fmt::Display for ScoringModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ratio with a zero-denominator guard; `None` never passes a threshold.
pub(crate) fn ratio(part: usize, whole: usize) -> Option<f64> {
    if whole == 0 {
        None
    } else {
        Some(part as f64 / whole as f64)
    }
}
