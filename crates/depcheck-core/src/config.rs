//! Configuration types for depcheck.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pattern::PatternError;

/// Top-level configuration, usually read from `depcheck.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// The `[[allow]]` and `[[deny]]` rule lists.
    #[serde(flatten)]
    pub rules: RulesConfig,
}

impl Config {
    /// Creates a new default configuration (no rules).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Returns the rule definitions.
    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Project root; relative file paths are computed from here.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns (over relative paths) to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec!["**/vendor/**".to_string()]
}

fn default_true() -> bool {
    true
}

/// The two ordered rule lists, as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Allow rules, in declaration order.
    #[serde(default)]
    pub allow: Vec<RuleConfig>,

    /// Deny rules, in declaration order.
    #[serde(default)]
    pub deny: Vec<RuleConfig>,
}

impl RulesConfig {
    /// Returns true if neither list has any rule.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }
}

/// One rule entry: `{ from, to, message }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Regular expression over the file path relative to the project root.
    pub from: String,
    /// Regular expression over the import path.
    pub to: String,
    /// Message reported on violation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleConfig {
    /// Creates a rule entry.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            message: None,
        }
    }

    /// Sets the violation message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A from/to pattern is not a valid regular expression.
    #[error("{context}: {source}")]
    InvalidPattern {
        /// Which field held the pattern (e.g. `deny[2].to`).
        context: String,
        /// The compilation failure.
        source: PatternError,
    },
}
