//! Check command implementation.

use anyhow::{Context, Result};
use depcheck_go::Analyzer;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Options of the check command.
pub struct CheckOptions {
    /// Output format.
    pub format: OutputFormat,
    /// Extra exclude globs from the command line.
    pub exclude: Vec<String>,
    /// Abort on files with syntax errors.
    pub fail_on_parse_error: bool,
}

/// Runs the check command.
pub fn run(path: &Path, options: &CheckOptions, source: &ConfigSource) -> Result<()> {
    let config = source.load()?;

    // The configured root is relative to the checked directory.
    let root = path.join(&config.analyzer.root);

    let analyzer = Analyzer::builder()
        .root(root)
        .config(config)
        .excludes(options.exclude.iter().cloned())
        .fail_on_parse_error(options.fail_on_parse_error)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules from {source}",
        analyzer.root().display(),
        analyzer.setting().len()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, options.format, analyzer.root())?;

    if result.has_violations() {
        std::process::exit(1);
    }

    Ok(())
}
