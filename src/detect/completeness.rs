//! Completeness: exhaustive type and null checks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::AnalysisContext;

use super::types::ModuleResult;

pub const MAX_SCORE: u32 = 12;

const VALIDATION_POINTS: u32 = 6;
const MIN_CHECKS: usize = 3;

lazy_static! {
    static ref VALIDATION_CHECK: Regex = Regex::new(r"typeof|instanceof|===\s*null").unwrap();
}

pub fn analyze_completeness(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    if VALIDATION_CHECK.find_iter(ctx.text).count() >= MIN_CHECKS {
        result.add(VALIDATION_POINTS, "Excessive defensive validation");
    }

    result
}
