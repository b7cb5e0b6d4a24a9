//! Shared output formatting for lint results.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use depcheck_core::{LintResult, ViolationDiagnostic};
use miette::GraphicalReportHandler;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is where violation paths are relative to; the pretty format reads
/// the offending files from there.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    let rendered = match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
        OutputFormat::Compact => render_compact(result),
        OutputFormat::Pretty => render_pretty(result, root, &GraphicalReportHandler::new())?,
    };
    println!("{rendered}");
    Ok(())
}

fn summary(result: &LintResult) -> String {
    if result.has_violations() {
        format!(
            "Found {} violation(s) in {} file(s)",
            result.violations.len(),
            result.files_checked
        )
    } else {
        format!("No violations in {} file(s)", result.files_checked)
    }
}

fn render_text(result: &LintResult) -> String {
    let mut out = String::new();
    for violation in &result.violations {
        out.push_str(&violation.format());
        out.push('\n');
    }

    let color = if result.has_violations() {
        "\x1b[31m"
    } else {
        "\x1b[32m"
    };
    let _ = write!(out, "{color}{}\x1b[0m", summary(result));
    out
}

fn render_compact(result: &LintResult) -> String {
    result
        .violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_pretty(
    result: &LintResult,
    root: &Path,
    handler: &GraphicalReportHandler,
) -> Result<String> {
    let mut out = String::new();
    for violation in &result.violations {
        let path = root.join(&violation.location.file);
        let diagnostic = match std::fs::read_to_string(&path) {
            Ok(source) => ViolationDiagnostic::new(violation, source),
            Err(e) => {
                tracing::warn!("Cannot read {} for snippet: {e}", path.display());
                let mut bare = violation.clone();
                bare.location = bare.location.with_span(0, 0);
                ViolationDiagnostic::new(&bare, String::new())
            }
        };
        handler.render_report(&mut out, &diagnostic)?;
        out.push('\n');
    }
    out.push_str(&summary(result));
    Ok(out)
}
