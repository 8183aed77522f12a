//! Debug absence: human code tends to carry leftover debug prints and
//! work markers; generated code rarely does.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::AnalysisContext;

use super::types::ModuleResult;

pub const MAX_SCORE: u32 = 11;

const CLEAN_POINTS: u32 = 8;

lazy_static! {
    static ref DEBUG_TRACE: Regex = Regex::new(r"console\.log|debugger|TODO|FIXME").unwrap();
    /// Debug-print call on its own, used by the rewriter to avoid stacking noise.
    pub(crate) static ref DEBUG_PRINT: Regex = Regex::new(r"console\.log").unwrap();
}

pub fn analyze_debug_absence(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    if !DEBUG_TRACE.is_match(ctx.text) {
        result.add(CLEAN_POINTS, "No debug artifacts");
    }

    result
}
