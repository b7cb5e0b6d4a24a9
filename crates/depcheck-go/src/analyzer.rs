//! Project analyzer: walks a Go tree and drives the core engine per file.

use std::path::{Component, Path, PathBuf};

use depcheck_core::{check_file, load_setting, Config, LintResult, Location, Setting, Violation};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::extractor::{ExtractError, LanguageExtractor};
use crate::golang::GoExtractor;
use crate::line_index::LineIndex;

const DEFAULT_EXCLUDE: &str = "**/vendor/**";

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error outside of reading a source file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A source file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Directory walking failed.
    #[error("walk error: {0}")]
    Walk(#[from] ignore::Error),

    /// A source file has syntax errors and `fail_on_parse_error` is set.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Parse error message.
        message: String,
    },

    /// Glob pattern error.
    #[error("Invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] depcheck_core::ConfigError),

    /// The extractor could not run.
    #[error("failed to analyze {path}: {source}")]
    Extract {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: ExtractError,
    },
}

/// Returns `file` relative to `root`, joined with `/` on every platform.
///
/// A file outside `root` keeps its own normal components.
#[must_use]
pub fn relative_path(root: &Path, file: &Path) -> String {
    let rel = file.strip_prefix(root).unwrap_or(file);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    root: Option<PathBuf>,
    setting: Option<Setting>,
    config: Option<Config>,
    exclude_patterns: Vec<String>,
    respect_gitignore: Option<bool>,
    fail_on_parse_error: bool,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the project root. Relative paths are computed from here.
    #[must_use]
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Uses an already compiled setting. Takes precedence over the config's rules.
    #[must_use]
    pub fn setting(mut self, setting: Setting) -> Self {
        self.setting = Some(setting);
        self
    }

    /// Sets the configuration (rules and analyzer options).
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds an exclude glob pattern over relative paths.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude_patterns.push(pattern.into());
        self
    }

    /// Adds multiple exclude glob patterns.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Sets whether `.gitignore` files are honored (default: from config, else true).
    #[must_use]
    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = Some(respect);
        self
    }

    /// Sets whether a file with syntax errors aborts the run (default: false).
    #[must_use]
    pub fn fail_on_parse_error(mut self, fail: bool) -> Self {
        self.fail_on_parse_error = fail;
        self
    }

    /// Builds the analyzer, compiling every rule pattern and exclude glob.
    ///
    /// # Errors
    ///
    /// Returns an error if a rule pattern or glob is invalid, or the
    /// current directory cannot be resolved. No file is read.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let root = self
            .root
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.root.clone()))
            .unwrap_or_else(|| PathBuf::from("."));

        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()?.join(&root)
        };

        let setting = match (self.setting, &self.config) {
            (Some(setting), _) => setting,
            (None, Some(config)) => load_setting(config.rules())?,
            (None, None) => Setting::default(),
        };

        // A config always carries its own exclude list, which may be empty.
        let mut exclude_patterns = self.exclude_patterns;
        match self.config {
            Some(ref config) => exclude_patterns.extend(config.analyzer.exclude.iter().cloned()),
            None if exclude_patterns.is_empty() => {
                exclude_patterns.push(DEFAULT_EXCLUDE.to_string());
            }
            None => {}
        }
        let excludes = ExcludeSet::new(&exclude_patterns)?;

        let respect_gitignore = self
            .respect_gitignore
            .or_else(|| self.config.as_ref().map(|c| c.analyzer.respect_gitignore))
            .unwrap_or(true);

        debug!(
            "Analyzer ready: {} rule(s), excludes {exclude_patterns:?}",
            setting.len()
        );

        Ok(Analyzer {
            root,
            setting,
            excludes,
            respect_gitignore,
            fail_on_parse_error: self.fail_on_parse_error,
            extractors: vec![Box::new(GoExtractor::new())],
        })
    }
}

/// Compiled exclude globs.
struct ExcludeSet {
    patterns: Vec<glob::Pattern>,
    /// Plain directory names taken from `**/name/**` patterns, matched at any depth.
    dirs: Vec<String>,
}

impl ExcludeSet {
    fn new(sources: &[String]) -> Result<Self, glob::PatternError> {
        let patterns = sources
            .iter()
            .map(|s| glob::Pattern::new(s))
            .collect::<Result<Vec<_>, _>>()?;
        let dirs = sources
            .iter()
            .filter_map(|s| s.strip_prefix("**/")?.strip_suffix("/**"))
            .filter(|s| !s.is_empty() && !s.contains(['*', '?', '[']))
            .map(str::to_owned)
            .collect();
        Ok(Self { patterns, dirs })
    }

    fn matches(&self, relative: &str) -> bool {
        if self.patterns.iter().any(|p| p.matches(relative)) {
            return true;
        }
        let padded = format!("/{relative}");
        self.dirs
            .iter()
            .any(|d| padded.contains(&format!("/{d}/")))
    }
}

/// Walks a project and reports import rule violations.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    root: PathBuf,
    setting: Setting,
    excludes: ExcludeSet,
    respect_gitignore: bool,
    fail_on_parse_error: bool,
    extractors: Vec<Box<dyn LanguageExtractor>>,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the root directory being analyzed.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the compiled rules.
    #[must_use]
    pub fn setting(&self) -> &Setting {
        &self.setting
    }

    /// Returns true if `relative` (a `/`-separated path) is excluded.
    #[must_use]
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.excludes.matches(relative)
    }

    /// Analyzes every source file under the root.
    ///
    /// # Errors
    ///
    /// Returns an error if walking or reading fails, or a file has syntax
    /// errors or is not UTF-8 while `fail_on_parse_error` is set. Otherwise
    /// non-UTF-8 files are skipped and not counted as checked.
    pub fn analyze(&self) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis at {}", self.root.display());

        let files = self.discover_files()?;
        info!("Found {} files to analyze", files.len());

        let mut result = LintResult::new();
        for (path, relative) in &files {
            let bytes = std::fs::read(path).map_err(|e| AnalyzerError::Read {
                path: path.clone(),
                source: e,
            })?;
            let source = match String::from_utf8(bytes) {
                Ok(source) => source,
                Err(e) if self.fail_on_parse_error => {
                    return Err(AnalyzerError::Parse {
                        path: PathBuf::from(relative),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Skipping {relative}: {e}");
                    continue;
                }
            };
            result.violations.extend(self.analyze_source(relative, &source)?);
            result.files_checked += 1;
        }

        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Runs extraction and rule checking on in-memory source text.
    ///
    /// `relative_path` is the `/`-separated path the rules are matched
    /// against. Files no extractor handles yield no violations.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction fails, or the source has syntax
    /// errors while `fail_on_parse_error` is set.
    pub fn analyze_source(
        &self,
        relative_path: &str,
        source: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let Some(extractor) = self.extractor_for(relative_path) else {
            debug!("No extractor for {relative_path}");
            return Ok(Vec::new());
        };

        debug!("Analyzing: {relative_path}");

        let analysis = extractor
            .analyze(source)
            .map_err(|e| AnalyzerError::Extract {
                path: PathBuf::from(relative_path),
                source: e,
            })?;

        debug!(
            "{relative_path}: package {}, {} import(s)",
            analysis.package.as_deref().unwrap_or("<none>"),
            analysis.imports.len()
        );

        if analysis.has_syntax_errors {
            if self.fail_on_parse_error {
                return Err(AnalyzerError::Parse {
                    path: PathBuf::from(relative_path),
                    message: "source contains syntax errors".to_string(),
                });
            }
            warn!("{relative_path} has syntax errors; checking the imports that parsed");
        }

        let diagnostics = check_file(&self.setting, relative_path, &analysis.imports);
        if diagnostics.is_empty() {
            return Ok(Vec::new());
        }

        let lines = LineIndex::new(source);
        Ok(diagnostics
            .iter()
            .map(|d| {
                let (line, column) = lines.position(d.span.start);
                let location = Location::new(PathBuf::from(relative_path), line, column)
                    .with_span(d.span.start, d.span.len());
                Violation::from_diagnostic(d, location)
            })
            .collect())
    }

    fn extractor_for(&self, relative_path: &str) -> Option<&dyn LanguageExtractor> {
        self.extractors
            .iter()
            .find(|e| {
                e.extensions()
                    .iter()
                    .any(|ext| relative_path.ends_with(ext))
            })
            .map(AsRef::as_ref)
    }

    /// Returns `(absolute, relative)` pairs of the files to analyze, sorted.
    fn discover_files(&self) -> Result<Vec<(PathBuf, String)>, AnalyzerError> {
        let mut builder = ignore::WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false);

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            let relative = relative_path(&self.root, path);
            if self.extractor_for(&relative).is_none() {
                continue;
            }
            if self.is_excluded(&relative) {
                debug!("Excluding: {relative}");
                continue;
            }

            files.push((path.to_path_buf(), relative));
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }
}
