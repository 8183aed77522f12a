//! Single-pass regex tokenizer.
//!
//! The grammar is intentionally shallow: string literals have no escape
//! handling and block comments do not nest. The scoring heuristics are tuned
//! against these boundaries, so they must not be "fixed" here.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Alternation order matters: the regex engine takes the leftmost-first
    /// branch, so identifiers win over numbers and literals over operators.
    static ref TOKEN_PATTERN: Regex = Regex::new(concat!(
        r"\b[a-zA-Z_][a-zA-Z0-9_]*\b",
        r"|[0-9]+\.?[0-9]*",
        r#"|"[^"]*""#,
        r"|'[^']*'",
        r"|`[^`]*`",
        r"|//.*",
        r"|/\*[\s\S]*?\*/",
        r"|[{}()\[\];,.<>=!+\-*/%&|^~?:@]",
    ))
    .unwrap();

    /// Identifier shape used by the naming heuristics (three characters or more).
    static ref NAMING_IDENTIFIER: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]{2,}$").unwrap();
}

/// Split source text into tokens. Characters that match no token class
/// (whitespace, `#`, `$`, non-ASCII punctuation) are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Whether a token looks like an identifier of at least three characters.
pub fn is_naming_identifier(token: &str) -> bool {
    NAMING_IDENTIFIER.is_match(token)
}
