//! Structure: complete-solution shape and uniform function sizes.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{extract_function_bodies, AnalysisContext, Statistics};

use super::types::ModuleResult;

pub const MAX_SCORE: u32 = 14;

const SOLUTION_POINTS: u32 = 6;
const UNIFORM_POINTS: u32 = 4;
const MIN_FUNCTIONS: usize = 3;
/// Longer files read as real projects rather than one-shot answers.
const MAX_SOLUTION_LINES: usize = 150;
const MIN_BODIES: usize = 3;
const UNIFORM_CV: f64 = 0.25;

lazy_static! {
    static ref FUNCTION_KEYWORD: Regex = Regex::new(r"\bfunction\b|\bdef\b").unwrap();
}

pub fn analyze_structure(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    let functions = FUNCTION_KEYWORD.find_iter(ctx.text).count();
    if functions >= MIN_FUNCTIONS && ctx.non_empty_lines.len() < MAX_SOLUTION_LINES {
        result.add(SOLUTION_POINTS, "Prompt-like full solution structure");
    }

    let bodies = extract_function_bodies(ctx.text);
    if bodies.len() >= MIN_BODIES {
        let lengths: Vec<f64> = bodies
            .iter()
            .map(|b| b.split('\n').count() as f64)
            .collect();
        if Statistics::from_values(&lengths).cv < UNIFORM_CV {
            result.add(UNIFORM_POINTS, "Uniform function sizes");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_uniform_functions() {
        let code = "\
function a() {
  return 1;
}
function b() {
  return 2;
}
function c() {
  return 3;
}";
        let ctx = AnalysisContext::new(code);
        let result = analyze_structure(&ctx);
        assert_eq!(result.score, 10);
        assert_eq!(
            result.reasons,
            vec!["Prompt-like full solution structure", "Uniform function sizes"]
        );
    }

    #[test]
    fn test_python_bodies_close_after_one_line() {
        let code = "\
def a():
    return 1
def b():
    return 2
def c():
    x = 1
    y = 2
";
        let ctx = AnalysisContext::new(code);
        let result = analyze_structure(&ctx);
        // Python bodies close after one line, so every body has two lines.
        assert_eq!(result.score, 10);
    }

    #[test]
    fn test_varied_brace_bodies() {
        let code = "\
function a() {
}
function b() {
  x();
  y();
  z();
  w();
  v();
}
function c() {
  q();
}";
        let ctx = AnalysisContext::new(code);
        let result = analyze_structure(&ctx);
        assert_eq!(result.score, 6);
    }

    #[test]
    fn test_few_functions() {
        let ctx = AnalysisContext::new("function only() {\n  return 1;\n}");
        assert_eq!(analyze_structure(&ctx).score, 0);
    }
}
