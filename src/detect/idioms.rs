//! Idiom usage: textbook functional helpers.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::AnalysisContext;

use super::types::ModuleResult;

pub const MAX_SCORE: u32 = 10;

const IDIOM_POINTS: u32 = 6;

lazy_static! {
    static ref TEXTBOOK_IDIOM: Regex = Regex::new(r"\.map\(|\.filter\(|Promise\.all").unwrap();
}

pub fn analyze_idioms(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    if TEXTBOOK_IDIOM.is_match(ctx.text) {
        result.add(IDIOM_POINTS, "Textbook idiomatic usage");
    }

    result
}
