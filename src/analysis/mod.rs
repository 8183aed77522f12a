//! Text-level code analysis primitives.
//!
//! Everything here works on raw text. There is no parsing into a syntax
//! tree: tokens come from a single regex pass and structure is inferred from
//! lines and brace counts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌────────────────┐
//! │ Source text     │────▶│ Tokenizer +  │────▶│AnalysisContext │
//! └─────────────────┘     │ language sig │     │ (lines, tokens,│
//!                         └──────────────┘     │  language)     │
//!                                              └────────────────┘
//!                                                      │
//!                                                      ▼
//!                                              ┌────────────────┐
//!                                              │ Scoring modules│
//!                                              │ (detect)       │
//!                                              └────────────────┘
//! ```

mod context;
mod language;
mod stats;
mod tokens;

pub use context::AnalysisContext;
pub use language::{detect_language, Language};
pub use stats::{collapse_whitespace, extract_function_bodies, shannon_entropy, Statistics};
pub use tokens::{is_naming_identifier, tokenize};
