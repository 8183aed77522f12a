//! Text transforms that weaken AI-authorship signals.
//!
//! All transforms are plain pattern substitutions. They do not understand
//! syntax and make no promise that the result still compiles.

use lazy_static::lazy_static;
use regex::Regex;

use crate::detect::DEBUG_PRINT;

lazy_static! {
    static ref SPACED_OPERATOR: Regex = Regex::new(r"\s([=+\-*/<>!]=?)\s").unwrap();
    static ref TYPEOF_CHECK: Regex =
        Regex::new(r#"typeof\s+(\w+)\s*===?\s*['"]\w+['"]"#).unwrap();
    static ref SIMPLE_GUARD: Regex = Regex::new(r"if\s*\((\w+)\)").unwrap();
}

const NOISE_HEADER: &str = "// quick debug check\n// console.log(\"temp\");\n";

/// Prepend a commented-out debug print unless one is already present.
pub fn inject_human_noise(code: &str) -> String {
    if DEBUG_PRINT.is_match(code) {
        return code.to_string();
    }
    format!("{}{}", NOISE_HEADER, code)
}

/// Pad single-spaced operators with a second trailing space.
pub fn break_uniform_spacing(code: &str) -> String {
    SPACED_OPERATOR.replace_all(code, " ${1}  ").into_owned()
}

/// Replace `typeof x === "type"` checks with loose null checks.
pub fn weaken_validation(code: &str) -> String {
    TYPEOF_CHECK.replace_all(code, "${1} != null").into_owned()
}

/// Nest a redundant `!== undefined` guard inside single-identifier `if`s.
pub fn add_redundant_logic(code: &str) -> String {
    SIMPLE_GUARD
        .replace_all(code, "if (${1}) { if (${1} !== undefined)")
        .into_owned()
}

/// Wrap the text in a workaround comment, a TODO and a trailing debug print.
pub fn force_human_artifacts(code: &str) -> String {
    format!(
        "\n/* temporary workaround */\n// TODO: cleanup later\n\n{}\n\n// console.log(\"patched manually\");\n",
        code
    )
}

/// The first-pass chain, in the order it must run.
pub const FIRST_PASS: [fn(&str) -> String; 4] = [
    inject_human_noise,
    break_uniform_spacing,
    weaken_validation,
    add_redundant_logic,
];
