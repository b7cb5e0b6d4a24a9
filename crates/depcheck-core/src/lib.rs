//! # depcheck-core
//!
//! Rule engine for import dependency checking.
//!
//! A project declares which imports each file may (allow) or may not (deny)
//! use. Both sides of a rule are regular expressions: the from-pattern over
//! the file's path relative to the project root, the to-pattern over the
//! import path. This crate provides:
//!
//! - [`Pattern`] and [`Rule`] for compiled allow/deny rules
//! - [`Setting`] and [`load_setting`] to compile a whole configuration up front
//! - [`RuleIndex`] for per-file rule selection
//! - [`check_file`] and [`evaluate`] to turn imports into [`Diagnostic`]s
//! - [`Config`] for the `depcheck.toml` format, and report types
//!   ([`Violation`], [`LintResult`]) shared by hosts
//!
//! The engine never touches the filesystem and never parses source code;
//! hosts hand it a relative path and a list of unquoted imports.
//!
//! ## Example
//!
//! ```
//! use depcheck_core::{check_file, load_setting, Config, Import, Span};
//!
//! let config = Config::parse(r#"
//! [[deny]]
//! from = ".*"
//! to = "legacy/.*"
//! "#)?;
//! let setting = load_setting(config.rules())?;
//!
//! let imports = [Import::new("app/legacy/util", Span::new(20, 37))];
//! let diagnostics = check_file(&setting, "cmd/main.go", &imports);
//! assert_eq!(diagnostics[0].message, "import app/legacy/util is not allowed");
//! # Ok::<(), depcheck_core::ConfigError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod checker;
mod config;
mod index;
mod pattern;
mod rule;
mod setting;
mod types;

pub use checker::{check_file, evaluate};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig, RulesConfig};
pub use index::{select, ApplicableRules, RuleIndex};
pub use pattern::{Pattern, PatternError};
pub use rule::{Rule, RuleKind};
pub use setting::{load_setting, Setting};
pub use types::{
    Diagnostic, Import, LintResult, Location, Span, Violation, ViolationDiagnostic,
};
