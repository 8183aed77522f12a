//! Shared per-call analysis context.
//!
//! The context is built once per `analyze` call and handed read-only to every
//! scoring module, so derived views (line splits, tokens, language) are
//! computed exactly once.

use super::language::{detect_language, Language};
use super::tokens::tokenize;

/// Derived views over one source snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisContext<'a> {
    /// The raw input text.
    pub text: &'a str,
    /// Every line, split on `\n`.
    pub lines: Vec<&'a str>,
    /// Lines that are not blank after trimming.
    pub non_empty_lines: Vec<&'a str>,
    /// Every line, trimmed.
    pub trimmed_lines: Vec<&'a str>,
    pub tokens: Vec<String>,
    pub language: Language,
}

impl<'a> AnalysisContext<'a> {
    /// Build the context for a snippet. Deterministic: the same input always
    /// yields an identical context.
    pub fn new(text: &'a str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let non_empty_lines = lines
            .iter()
            .copied()
            .filter(|l| !l.trim().is_empty())
            .collect();
        let trimmed_lines = lines.iter().map(|l| l.trim()).collect();

        Self {
            text,
            lines,
            non_empty_lines,
            trimmed_lines,
            tokens: tokenize(text),
            language: detect_language(text),
        }
    }

    /// Number of characters in the raw text.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
