//! Compiled regular-expression patterns.

use regex::Regex;
use std::fmt;

/// A compiled regular expression used to match file paths or import paths.
///
/// Matching is unanchored: a pattern matches when the expression is found
/// anywhere in the candidate. Use `^` / `$` to anchor explicitly.
#[derive(Debug, Clone)]
pub struct Pattern {
    compiled: Regex,
}

impl Pattern {
    /// Compiles a pattern from regular-expression source.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] if `source` is not a valid regular expression.
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        let compiled = Regex::new(source).map_err(|cause| PatternError {
            pattern: source.to_string(),
            cause,
        })?;
        Ok(Self { compiled })
    }

    /// Returns true if the expression matches anywhere in `candidate`.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        self.compiled.is_match(candidate)
    }

    /// Returns the source text this pattern was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.compiled.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern that failed to compile.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid regular expression `{pattern}`: {cause}")]
pub struct PatternError {
    /// The rejected source text.
    pub pattern: String,
    /// Why the regex engine rejected it.
    #[source]
    pub cause: regex::Error,
}
