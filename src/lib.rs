//! codesniff - heuristic AI-generated code detection.
//!
//! codesniff scores a source snippet from 0 to 100 for how likely it is to
//! have come out of an AI code generator, and can rewrite a snippet so that
//! its reported score goes down. It is an explainable heuristic scorer, not a
//! trained classifier: every point of the score traces back to a named module
//! and a human-readable reason.
//!
//! # Architecture
//!
//! - `analysis`: tokenizer, language detection, statistics, shared context
//! - `detect`: the ten scoring modules and the `Analyzer` that runs them
//! - `score`: weighted aggregation, confidence and verdict labels
//! - `rewrite`: transform chain with a monotonic-reduction guarantee
//! - `config`: YAML configuration for the CLI
//! - `store`: JSON-file history and user records
//! - `report`: terminal, JSON and document output
//! - `cli`: command-line interface
//!
//! The core (`analysis`, `detect`, `score`, `rewrite`) performs no I/O and
//! holds no mutable global state.
//!
//! # Example
//!
//! ```
//! let result = codesniff::analyze("function add(a, b) {\n  return a + b;\n}\n");
//! assert!(result.likelihood <= 100);
//!
//! let rewritten = codesniff::rewrite("function add(a, b) {\n  return a + b;\n}\n");
//! assert!(
//!     rewritten.after.likelihood < rewritten.before.likelihood
//!         || rewritten.before.likelihood == 0
//! );
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod detect;
pub mod report;
pub mod rewrite;
pub mod score;
pub mod store;

pub use analysis::{AnalysisContext, Language};
pub use config::Config;
pub use detect::{analyze, Analyzer, ModuleResult, ScoringModule};
pub use rewrite::{rewrite, RewriteFallback, RewriteResult, Rewriter};
pub use score::{classify, AnalysisResult, Verdict};
pub use store::{HistoryEntry, Role, Store, UserRecord};
