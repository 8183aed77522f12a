//! Error handling: stacked try blocks.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::AnalysisContext;

use super::types::ModuleResult;

pub const MAX_SCORE: u32 = 10;

const TRY_POINTS: u32 = 6;
const MIN_TRY_BLOCKS: usize = 2;

lazy_static! {
    static ref TRY_BLOCK: Regex = Regex::new(r"try\s*\{").unwrap();
}

pub fn analyze_error_handling(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    if TRY_BLOCK.find_iter(ctx.text).count() >= MIN_TRY_BLOCKS {
        result.add(TRY_POINTS, "Over-engineered error handling");
    }

    result
}
