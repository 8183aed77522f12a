//! Statistical helpers shared by the scoring modules.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    /// Opens a function body. Substring match on purpose: the body-length
    /// heuristic was calibrated with it.
    static ref FUNCTION_HEADER: Regex = Regex::new(r"function|def").unwrap();
}

/// Summary statistics over a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Statistics {
    pub mean: f64,
    /// Population variance (divides by N).
    pub variance: f64,
    pub std_dev: f64,
    /// Coefficient of variation, 0 when the mean is 0.
    pub cv: f64,
}

impl Statistics {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        let cv = if mean == 0.0 { 0.0 } else { std_dev / mean };

        Self {
            mean,
            variance,
            std_dev,
            cv,
        }
    }
}

/// Shannon entropy in bits per character.
pub fn shannon_entropy(text: &str) -> f64 {
    let mut freq: HashMap<char, usize> = HashMap::new();
    let mut len = 0usize;
    for c in text.chars() {
        *freq.entry(c).or_insert(0) += 1;
        len += 1;
    }
    if len == 0 {
        return 0.0;
    }

    let len = len as f64;
    freq.values()
        .map(|&count| {
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Replace every run of whitespace with a single space.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").into_owned()
}

/// Extract brace-delimited (or header-plus-line) function bodies.
///
/// A header line opens a new buffer and discards any open one. The buffer
/// closes once brace depth is back to exactly zero after at least one brace
/// or one body line. Unbalanced bodies never close.
pub fn extract_function_bodies(text: &str) -> Vec<String> {
    let mut bodies = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    let mut depth: i64 = 0;
    let mut saw_brace = false;
    let mut open = false;

    for line in text.split('\n') {
        if FUNCTION_HEADER.is_match(line) {
            buf.clear();
            depth = 0;
            saw_brace = false;
            open = true;
        }
        if !open {
            continue;
        }

        buf.push(line);
        let opens = line.matches('{').count() as i64;
        let closes = line.matches('}').count() as i64;
        depth += opens - closes;
        saw_brace |= opens + closes > 0;

        if depth == 0 && (saw_brace || buf.len() > 1) {
            bodies.push(buf.join("\n"));
            buf.clear();
            open = false;
        }
    }

    bodies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_population_variance() {
        let stats = Statistics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stats.mean, 5.0);
        assert_eq!(stats.variance, 4.0);
        assert_eq!(stats.std_dev, 2.0);
        assert_eq!(stats.cv, 0.4);
    }

    #[test]
    fn test_statistics_empty_and_zero_mean() {
        assert_eq!(Statistics::from_values(&[]), Statistics::default());
        assert_eq!(Statistics::from_values(&[0.0, 0.0]).cv, 0.0);
    }

    #[test]
    fn test_entropy() {
        assert_eq!(shannon_entropy(""), 0.0);
        assert_eq!(shannon_entropy("aaaa"), 0.0);
        assert!((shannon_entropy("ab") - 1.0).abs() < 1e-12);
        assert!((shannon_entropy("abcd") - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  \n\t b\n"), "a b ");
    }

    #[test]
    fn test_extract_brace_bodies() {
        let code = "function a() {\n  x();\n  y();\n}\nfunction b() {\n  z();\n}";
        let bodies = extract_function_bodies(code);
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0].lines().count(), 4);
        assert_eq!(bodies[1].lines().count(), 3);
    }

    #[test]
    fn test_extract_python_bodies() {
        let code = "def a():\n    return 1\n\ndef b():\n    return 2";
        let bodies = extract_function_bodies(code);
        assert_eq!(bodies, vec!["def a():\n    return 1", "def b():\n    return 2"]);
    }

    #[test]
    fn test_extract_single_line_body() {
        let bodies = extract_function_bodies("function a() { return 1; }\nrest");
        assert_eq!(bodies, vec!["function a() { return 1; }"]);
    }

    #[test]
    fn test_unbalanced_body_never_closes() {
        let bodies = extract_function_bodies("function a() {\n  if (x) {\n  y();\n}");
        assert!(bodies.is_empty());
    }
}
