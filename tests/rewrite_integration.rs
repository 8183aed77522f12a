//! Integration tests for the rewrite engine.

use std::path::PathBuf;

use codesniff::rewrite::clamp_reported;
use codesniff::{analyze, rewrite, Analyzer, RewriteFallback, Rewriter};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(testdata_path().join(name)).expect("should read fixture")
}

fn assert_reduced(code: &str) {
    let result = rewrite(code);
    let (before, after) = (result.before.likelihood, result.after.likelihood);
    assert!(
        after < before || (before == 0 && after == 0),
        "no reduction for {:?}: {} -> {}",
        code,
        before,
        after
    );
}

#[test]
fn test_rewrite_always_reduces() {
    let inputs = [
        String::new(),
        "x".to_string(),
        "   \n  ".to_string(),
        fixture("ai_style.js"),
        fixture("human.js"),
        fixture("project/src/app.js"),
        fixture("project/src/util.py"),
        "let a = 1;\n".repeat(40),
        "try { a(); } catch (e) {}\n".repeat(20),
        "if (typeof x === 'string') { y(); }\n".repeat(5),
    ];

    for code in &inputs {
        assert_reduced(code);
    }
}

#[test]
fn test_rewrite_ai_fixture() {
    let code = fixture("ai_style.js");
    let result = rewrite(&code);

    assert_eq!(result.original, code);
    assert_eq!(result.before, analyze(&code));
    assert!(result.before.likelihood >= 60);
    assert!(result.after.likelihood < result.before.likelihood);
    assert_eq!(result.fallback, RewriteFallback::None);
    assert!(result.rewritten.starts_with("// quick debug check\n"));
}

#[test]
fn test_rewrite_zero_score_stays_zero() {
    let code = "console.log(x);\nconsole.log(y);\n";
    let result = rewrite(code);

    assert_eq!(result.before.likelihood, 0);
    assert_eq!(result.after.likelihood, 0);
    assert_eq!(result.fallback, RewriteFallback::Clamped);
    assert_eq!(result.reduction(), 0);
}

#[test]
fn test_clamp_overrides_only_likelihood() {
    // Debug prints defeat the first pass; the fences keep a small score.
    let code = "console.log(x);\n```\n```\nconsole.log(yy);\n";
    let result = rewrite(code);

    assert!(result.before.likelihood > 0);
    assert_eq!(result.fallback, RewriteFallback::Clamped);
    assert_eq!(
        result.after.likelihood,
        result.before.likelihood.saturating_sub(15)
    );

    let fresh = analyze(&result.rewritten);
    assert!(fresh.likelihood >= result.before.likelihood);
    assert_eq!(result.after.confidence, fresh.confidence);
    assert_eq!(result.after.language, fresh.language);
    assert_eq!(result.after.reasons, fresh.reasons);
    assert_eq!(result.after.breakdown, fresh.breakdown);
}

#[test]
fn test_clamp_reports_fifteen_below() {
    // The clamp step reports before - 15, floored at zero.
    assert_eq!(clamp_reported(85), 70);
    assert_eq!(clamp_reported(10), 0);
}

#[test]
fn test_rewriter_uses_configured_weights() {
    use std::collections::HashMap;
    use codesniff::ScoringModule;

    let mut weights = HashMap::new();
    weights.insert(ScoringModule::DebugAbsence, 5.0);
    let analyzer = Analyzer::new().with_weights(&weights);

    let code = fixture("ai_style.js");
    let result = Rewriter::new(analyzer.clone()).rewrite(&code);
    assert_eq!(result.before, analyzer.analyze(&code));
    assert!(result.after.likelihood < result.before.likelihood);
}
