//! Entropy: low character-level variety over a long snippet.

use crate::analysis::{collapse_whitespace, shannon_entropy, AnalysisContext};

use super::types::ModuleResult;

pub const MAX_SCORE: u32 = 8;

const LOW_ENTROPY_POINTS: u32 = 6;
/// Bits per character.
const ENTROPY_CUTOFF: f64 = 4.1;
const MIN_CHARS: usize = 200;

pub fn analyze_entropy(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);

    let entropy = shannon_entropy(&collapse_whitespace(ctx.text));
    if entropy < ENTROPY_CUTOFF && ctx.char_len() > MIN_CHARS {
        result.add(LOW_ENTROPY_POINTS, "Low entropy pattern");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repetitive_long_text() {
        let code = "a = b;\n".repeat(40);
        let ctx = AnalysisContext::new(&code);
        let result = analyze_entropy(&ctx);
        assert_eq!(result.score, 6);
        assert_eq!(result.reasons, vec!["Low entropy pattern"]);
    }

    #[test]
    fn test_short_text_never_fires() {
        let ctx = AnalysisContext::new("a = b;\na = b;\na = b;\n");
        assert_eq!(analyze_entropy(&ctx).score, 0);
    }

    #[test]
    fn test_varied_text() {
        let code: String = (b'!'..=b'~').map(|b| b as char).collect::<String>().repeat(3);
        let ctx = AnalysisContext::new(&code);
        assert_eq!(analyze_entropy(&ctx).score, 0);
    }
}
