//! Naming: overly descriptive and generic identifiers.

use std::collections::HashSet;

use crate::analysis::{is_naming_identifier, AnalysisContext};

use super::types::{ratio, ModuleResult};

pub const MAX_SCORE: u32 = 12;

const LONG_NAME_POINTS: u32 = 5;
const GENERIC_NAME_POINTS: u32 = 4;
const LONG_NAME_LEN: usize = 15;
const LONG_NAME_RATIO: f64 = 0.2;
const GENERIC_NAME_RATIO: f64 = 0.4;

const GENERIC_FRAGMENTS: &[&str] = &["data", "result", "value", "item", "count"];

/// Unique identifiers of three or more characters, in first-seen order.
fn unique_identifiers<'c>(ctx: &'c AnalysisContext<'_>) -> Vec<&'c str> {
    let mut seen = HashSet::new();
    ctx.tokens
        .iter()
        .map(String::as_str)
        .filter(|t| is_naming_identifier(t))
        .filter(|t| seen.insert(*t))
        .collect()
}

fn is_generic(name: &str) -> bool {
    let lower = name.to_lowercase();
    GENERIC_FRAGMENTS.iter().any(|g| lower.contains(g))
}

pub fn analyze_naming(ctx: &AnalysisContext<'_>) -> ModuleResult {
    let mut result = ModuleResult::new(MAX_SCORE);
    let unique = unique_identifiers(ctx);

    let long = unique.iter().filter(|n| n.len() >= LONG_NAME_LEN).count();
    if ratio(long, unique.len()).is_some_and(|r| r > LONG_NAME_RATIO) {
        result.add(LONG_NAME_POINTS, "Overly descriptive identifiers");
    }

    let generic = unique.iter().filter(|n| is_generic(n)).count();
    if ratio(generic, unique.len()).is_some_and(|r| r > GENERIC_NAME_RATIO) {
        result.add(GENERIC_NAME_POINTS, "Generic variable naming");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_and_generic_names() {
        let code = "let processedUserData = transformInputValue(rawResultItem);";
        let ctx = AnalysisContext::new(code);
        let result = analyze_naming(&ctx);
        // let, processedUserData, transformInputValue, rawResultItem
        assert_eq!(result.score, 9);
    }

    #[test]
    fn test_short_plain_names() {
        let code = "for (let i = 0; i < n; i++) { sum += arr[i]; }";
        let ctx = AnalysisContext::new(code);
        assert_eq!(analyze_naming(&ctx).score, 0);
    }

    #[test]
    fn test_no_identifiers() {
        let ctx = AnalysisContext::new("1 + 2 + 3 ; ( ) { }");
        let result = analyze_naming(&ctx);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_duplicates_counted_once() {
        let ctx = AnalysisContext::new("foo foo bar foo");
        assert_eq!(unique_identifiers(&ctx), vec!["foo", "bar"]);
    }
}
