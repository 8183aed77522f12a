//! AI artifacts: leftover markdown and tutorial phrasing.
//!
//! Chat-generated code is often pasted with its surrounding answer intact:
//! code fences, `# Heading` lines and "Step 1" walkthroughs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::AnalysisContext;

use super::types::ModuleResult;

pub const MAX_SCORE: u32 = 18;

const MARKDOWN_POINTS: u32 = 10;
const TUTORIAL_POINTS: u32 = 6;

lazy_static! {
    /// A fence anywhere, or a heading-shaped line. Python `# comment` lines
    /// also match the heading shape.
    static ref MARKDOWN: Regex = Regex::new(r"(?m)```|^\s*#\s+").unwrap();
    static ref TUTORIAL: Regex = Regex::new(r"(?i)step\s+\d+|example:").unwrap();
}

pub fn detect_ai_artifacts(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    if MARKDOWN.is_match(ctx.text) {
        result.add(MARKDOWN_POINTS, "Markdown artifacts");
    }

    if TUTORIAL.is_match(ctx.text) {
        result.add(TUTORIAL_POINTS, "Tutorial-style phrasing");
    }

    result
}
