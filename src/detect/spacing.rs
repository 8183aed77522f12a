//! Statistical spacing: consistently single-space-padded operators.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::AnalysisContext;

use super::types::ModuleResult;

pub const MAX_SCORE: u32 = 10;

const SPACING_POINTS: u32 = 4;
const MIN_SPACED_OPERATORS: usize = 10;

lazy_static! {
    static ref SPACED_OPERATOR: Regex = Regex::new(r"\s[=+\-*/<>!]=?\s").unwrap();
}

pub fn analyze_statistical_spacing(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    if SPACED_OPERATOR.find_iter(ctx.text).count() > MIN_SPACED_OPERATORS {
        result.add(SPACING_POINTS, "Perfect operator spacing");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_many_spaced_operators() {
        let code = "let a = 1;\n".repeat(11);
        let ctx = AnalysisContext::new(&code);
        let result = analyze_statistical_spacing(&ctx);
        assert_eq!(result.score, 4);
        assert_eq!(result.reasons, vec!["Perfect operator spacing"]);
    }

    #[test]
    fn test_exactly_ten_does_not_fire() {
        let code = "let a = 1;\n".repeat(10);
        let ctx = AnalysisContext::new(&code);
        assert_eq!(analyze_statistical_spacing(&ctx).score, 0);
    }

    #[test]
    fn test_tight_operators() {
        let code = "let a=1;\n".repeat(20);
        let ctx = AnalysisContext::new(&code);
        assert_eq!(analyze_statistical_spacing(&ctx).score, 0);
    }
}
