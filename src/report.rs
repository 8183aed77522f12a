//! Output formatting for codesniff results.
//!
//! Supports three kinds of output:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - Documents: downloadable text, HTML and Word-compatible reports

use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;

use crate::detect::Analyzer;
use crate::rewrite::{RewriteFallback, RewriteResult};
use crate::score::AnalysisResult;
use crate::store::HistoryEntry;

const TOOL_NAME: &str = "codesniff";

/// One analyzed input.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    pub result: AnalysisResult,
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report for `analyze`.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
    pub passed: bool,
    pub files_scanned: usize,
    pub files: Vec<JsonAnalysis>,
}

/// JSON form of one analysis.
#[derive(Serialize, Deserialize)]
pub struct JsonAnalysis {
    pub path: String,
    pub likelihood: u32,
    pub confidence: f64,
    pub language: String,
    pub verdict: String,
    pub reasons: Vec<String>,
    pub breakdown: Vec<BreakdownEntry>,
}

/// Per-module breakdown entry.
#[derive(Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub module: String,
    pub score: u32,
    pub max_score: u32,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// JSON report for `rewrite`.
#[derive(Serialize, Deserialize)]
pub struct JsonRewriteReport {
    pub version: String,
    pub before: JsonAnalysis,
    pub after: JsonAnalysis,
    pub fallback: RewriteFallback,
    pub reduction: u32,
    pub rewritten: String,
}

/// Whether every report stays under the threshold.
pub fn passes(reports: &[FileReport], threshold: Option<u32>) -> bool {
    match threshold {
        Some(t) => reports.iter().all(|r| r.result.likelihood < t),
        None => true,
    }
}

/// Convert one analysis into its JSON form.
pub fn analysis_to_json(path: &str, result: &AnalysisResult, analyzer: &Analyzer) -> JsonAnalysis {
    let breakdown = result
        .breakdown
        .iter()
        .map(|(module, r)| BreakdownEntry {
            module: module.as_str().to_string(),
            score: r.score,
            max_score: r.max_score,
            weight: analyzer.weight(*module),
            reasons: r.reasons.clone(),
        })
        .collect();

    JsonAnalysis {
        path: path.to_string(),
        likelihood: result.likelihood,
        confidence: result.confidence,
        language: result.language.to_string(),
        verdict: result.verdict().label().to_string(),
        reasons: result.reasons.clone(),
        breakdown,
    }
}

/// Build the `analyze` JSON report.
pub fn build_json_report(
    reports: &[FileReport],
    threshold: Option<u32>,
    analyzer: &Analyzer,
) -> JsonReport {
    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        threshold,
        passed: passes(reports, threshold),
        files_scanned: reports.len(),
        files: reports
            .iter()
            .map(|r| analysis_to_json(&r.path, &r.result, analyzer))
            .collect(),
    }
}

/// Build the `rewrite` JSON report.
pub fn build_json_rewrite(path: &str, result: &RewriteResult, analyzer: &Analyzer) -> JsonRewriteReport {
    JsonRewriteReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        before: analysis_to_json(path, &result.before, analyzer),
        after: analysis_to_json(path, &result.after, analyzer),
        fallback: result.fallback,
        reduction: result.reduction(),
        rewritten: result.rewritten.clone(),
    }
}

/// Write `analyze` results in JSON format.
pub fn write_json(
    reports: &[FileReport],
    threshold: Option<u32>,
    analyzer: &Analyzer,
) -> anyhow::Result<()> {
    let report = build_json_report(reports, threshold, analyzer);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Write a rewrite result in JSON format.
pub fn write_json_rewrite(path: &str, result: &RewriteResult, analyzer: &Analyzer) -> anyhow::Result<()> {
    let report = build_json_rewrite(path, result, analyzer);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Write history records in JSON format.
pub fn write_json_history(entries: &[HistoryEntry]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(entries)?);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

fn write_header(label: &str, value: &str) {
    println!();
    print!("  ");
    print!("{}", TOOL_NAME.cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", format!("{:<10}", label).dimmed());
    println!("{}", value);
    println!();
}

/// Write `analyze` results in pretty format.
pub fn write_pretty(reports: &[FileReport], threshold: Option<u32>, analyzer: &Analyzer) {
    let scanned = if reports.len() == 1 {
        reports[0].path.clone()
    } else {
        format!("{} files", reports.len())
    };
    write_header("Scanning:", &scanned);

    for report in reports {
        write_analysis(&report.path, &report.result, analyzer);
        println!();
    }

    if let Some(t) = threshold {
        print!("  {}", format!("Threshold: {}", t).dimmed());
        print!("  ");
        if passes(reports, threshold) {
            print!("{}", "PASSED".green());
        } else {
            print!("{}", "FAILED".red());
        }
        println!();
        println!();
    }
}

fn write_analysis(path: &str, result: &AnalysisResult, analyzer: &Analyzer) {
    print!("  {}  ", path.blue());
    write_colored_likelihood(result.likelihood);
    print!("%  ");
    print!("{}", result.verdict().label().bold());
    println!(
        "  {}",
        format!(
            "(confidence {:.1}%, {})",
            result.confidence, result.language
        )
        .dimmed()
    );

    if !result.reasons.is_empty() {
        for reason in &result.reasons {
            println!("    {} {}", "•".dimmed(), reason);
        }
    }

    if !result.breakdown.is_empty() {
        println!();
        println!("    {}", "Breakdown:".bold());
        for (module, r) in &result.breakdown {
            let line = format!(
                "      {:<22} {:>2}/{:<2}  x{:.1}",
                module.as_str(),
                r.score,
                r.max_score,
                analyzer.weight(*module)
            );
            if r.score > 0 {
                println!("{}", line);
            } else {
                println!("{}", line.dimmed());
            }
        }
    }
}

fn write_colored_likelihood(l: u32) {
    match l {
        l if l < 20 => print!("{}", l.to_string().green().bold()),
        l if l < 40 => print!("{}", l.to_string().green()),
        l if l < 60 => print!("{}", l.to_string().yellow()),
        l if l < 80 => print!("{}", l.to_string().yellow().bold()),
        _ => print!("{}", l.to_string().red()),
    }
}

/// Write a rewrite result in pretty format.
pub fn write_pretty_rewrite(path: &str, result: &RewriteResult) {
    write_header("Rewriting:", path);

    print!("  {}", "Before: ".dimmed());
    write_colored_likelihood(result.before.likelihood);
    println!("%  {}", result.before.verdict().label());

    print!("  {}", "After:  ".dimmed());
    write_colored_likelihood(result.after.likelihood);
    println!("%  {}", result.after.verdict().label());

    match result.fallback {
        RewriteFallback::None => {}
        RewriteFallback::ForcedArtifacts => {
            println!("  {}", "(forced human artifacts were added)".dimmed())
        }
        RewriteFallback::Clamped => {
            println!("  {}", "(reported score clamped; text unchanged after forcing)".dimmed())
        }
    }
    println!();
}

/// Write history records in pretty format.
pub fn write_pretty_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("No uploads yet");
        return;
    }

    println!(
        "  {:<26} {:<24} {:<11} {:>6} {:>6}  {}",
        "Date".bold(),
        "Email".bold(),
        "Language".bold(),
        "Before".bold(),
        "After".bold(),
        "Status".bold()
    );
    for e in entries {
        let status = match risk_status(e.before) {
            "HIGH" => "HIGH".red(),
            "MEDIUM" => "MEDIUM".yellow(),
            s => s.green(),
        };
        println!(
            "  {:<26} {:<24} {:<11} {:>5}% {:>5}%  {}",
            e.date, e.email, e.language, e.before, e.after, status
        );
    }
}

/// Review status of a submission from its original likelihood.
pub fn risk_status(before: u32) -> &'static str {
    if before >= 70 {
        "HIGH"
    } else if before >= 40 {
        "MEDIUM"
    } else {
        "OK"
    }
}

// =============================================================================
// Document Export
// =============================================================================

/// Downloadable document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Txt,
    Html,
    /// HTML with a UTF-8 BOM, opened by word processors.
    Doc,
}

impl ExportKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Some(ExportKind::Txt),
            "html" | "htm" => Some(ExportKind::Html),
            "doc" => Some(ExportKind::Doc),
            _ => None,
        }
    }

    /// Infer the kind from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::parse)
    }
}

/// Plain-text report for a rewrite.
pub fn render_text_report(path: &str, result: &RewriteResult) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "AI Code Likelihood Report");
    let _ = writeln!(out, "Source: {}", path);
    let _ = writeln!(out);
    write_text_analysis(&mut out, "Before", &result.before);
    write_text_analysis(&mut out, "After", &result.after);
    let _ = writeln!(out, "Rewritten code:");
    let _ = writeln!(out, "{}", result.rewritten);
    out
}

fn write_text_analysis(out: &mut String, label: &str, result: &AnalysisResult) {
    let _ = writeln!(
        out,
        "{}: {}% ({}), confidence {:.1}%, language {}",
        label,
        result.likelihood,
        result.verdict().label(),
        result.confidence,
        result.language
    );
    for reason in &result.reasons {
        let _ = writeln!(out, "  - {}", reason);
    }
    for (module, r) in &result.breakdown {
        let _ = writeln!(out, "  {:<22} {}/{}", module.as_str(), r.score, r.max_score);
    }
    let _ = writeln!(out);
}

/// HTML report for a rewrite, wrapped in a standalone page.
pub fn render_html_report(path: &str, result: &RewriteResult) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<h1>AI Code Likelihood Report</h1>");
    let _ = writeln!(body, "<p>Source: {}</p>", escape_html(path));
    write_html_analysis(&mut body, "Before", &result.before);
    write_html_analysis(&mut body, "After", &result.after);
    let _ = writeln!(body, "<h2>Rewritten code</h2>");
    let _ = writeln!(body, "<pre>{}</pre>", escape_html(&result.rewritten));
    wrap_html("AI Code Likelihood Report", &body)
}

fn write_html_analysis(out: &mut String, label: &str, result: &AnalysisResult) {
    let _ = writeln!(
        out,
        "<h2>{}: {}% ({})</h2>",
        label,
        result.likelihood,
        escape_html(result.verdict().label())
    );
    let _ = writeln!(
        out,
        "<p>Confidence {:.1}%, language {}</p>",
        result.confidence, result.language
    );
    if !result.reasons.is_empty() {
        let _ = writeln!(out, "<ul>");
        for reason in &result.reasons {
            let _ = writeln!(out, "<li>{}</li>", escape_html(reason));
        }
        let _ = writeln!(out, "</ul>");
    }
    if !result.breakdown.is_empty() {
        let _ = writeln!(out, "<table>");
        let _ = writeln!(out, "<tr><th>Module</th><th>Score</th><th>Max</th></tr>");
        for (module, r) in &result.breakdown {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                module.as_str(),
                r.score,
                r.max_score
            );
        }
        let _ = writeln!(out, "</table>");
    }
}

fn wrap_html(title: &str, body: &str) -> String {
    format!(
        "<html>\n<head>\n<meta charset=\"UTF-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

/// Escape text for HTML element content and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a document of the given kind.
pub fn render_document(kind: ExportKind, path: &str, result: &RewriteResult) -> String {
    match kind {
        ExportKind::Txt => render_text_report(path, result),
        ExportKind::Html => render_html_report(path, result),
        ExportKind::Doc => format!("\u{feff}{}", render_html_report(path, result)),
    }
}

/// Write a report document to disk.
pub fn export_document(
    kind: ExportKind,
    source: &str,
    result: &RewriteResult,
    out: &Path,
) -> anyhow::Result<()> {
    let content = render_document(kind, source, result);
    std::fs::write(out, content)
        .map_err(|e| anyhow::anyhow!("writing report {}: {}", out.display(), e))
}
