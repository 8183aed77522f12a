//! Signature-based source language detection.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Language tag attached to an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    Cpp,
    Java,
    /// No signature matched.
    Generic,
    /// Input was too short to analyze.
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Generic => "generic",
            Language::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

lazy_static! {
    /// Checked in order; the first signature that matches wins.
    static ref SIGNATURES: Vec<(Language, Regex)> = vec![
        (
            Language::Python,
            Regex::new(r"\bdef\b|\b__name__\b|import\s+\w+").unwrap(),
        ),
        (
            Language::JavaScript,
            Regex::new(r"\bconst\b|\blet\b|=>|\bfunction\b").unwrap(),
        ),
        (
            Language::Cpp,
            Regex::new(r"#include|std::|cout|cin").unwrap(),
        ),
        (
            Language::Java,
            Regex::new(r"\bpublic\s+class\b|System\.out").unwrap(),
        ),
    ];
}

/// Detect the language of a snippet, defaulting to [`Language::Generic`].
pub fn detect_language(text: &str) -> Language {
    SIGNATURES
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(lang, _)| *lang)
        .unwrap_or(Language::Generic)
}
