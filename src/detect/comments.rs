//! Comment style: explanatory, tutorial-voice comments and comment density.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::AnalysisContext;

use super::types::{ratio, ModuleResult};

pub const MAX_SCORE: u32 = 15;

const EXPLANATORY_POINTS: u32 = 10;
const DENSITY_POINTS: u32 = 5;
/// Share of comment lines that must read like an explanation.
const EXPLANATORY_RATIO: f64 = 0.4;
/// Comment lines per non-empty line.
const DENSITY_RATIO: f64 = 0.3;

lazy_static! {
    static ref EXPLANATORY_PHRASES: Vec<Regex> = vec![
        Regex::new(r"(?i)this function").unwrap(),
        Regex::new(r"(?i)returns the").unwrap(),
        Regex::new(r"(?i)responsible for").unwrap(),
        Regex::new(r"(?i)used to").unwrap(),
        Regex::new(r"(?i)handles the").unwrap(),
        Regex::new(r"(?i)here'?s how").unwrap(),
        Regex::new(r"(?i)for example").unwrap(),
    ];
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with("//") || line.starts_with('#')
}

pub fn analyze_comments(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    let comments: Vec<&str> = ctx
        .trimmed_lines
        .iter()
        .copied()
        .filter(|l| is_comment_line(l))
        .collect();

    let explanatory = comments
        .iter()
        .filter(|c| EXPLANATORY_PHRASES.iter().any(|p| p.is_match(c)))
        .count();

    if ratio(explanatory, comments.len()).is_some_and(|r| r > EXPLANATORY_RATIO) {
        result.add(EXPLANATORY_POINTS, "AI-style explanatory comments");
    }

    if ratio(comments.len(), ctx.non_empty_lines.len()).is_some_and(|r| r > DENSITY_RATIO) {
        result.add(DENSITY_POINTS, "High comment density");
    }

    result
}
