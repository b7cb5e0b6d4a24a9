//! # depcheck-go
//!
//! Go host for the depcheck rule engine.
//!
//! This crate turns a Go source tree into input for `depcheck-core`:
//!
//! - [`LanguageExtractor`] trait for pluggable language support
//! - [`GoExtractor`] for tree-sitter based package/import extraction
//! - [`LineIndex`] for mapping byte offsets to line and column
//! - [`Analyzer`] for walking a project, applying excludes and
//!   `.gitignore`, and collecting [`depcheck_core::Violation`]s

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod analyzer;
pub mod extractor;
pub mod golang;
pub mod line_index;

pub use analyzer::{relative_path, Analyzer, AnalyzerBuilder, AnalyzerError};
pub use extractor::{ExtractError, FileAnalysis, LanguageExtractor};
pub use golang::GoExtractor;
pub use line_index::LineIndex;
