//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for adding new languages.
//! Implement it to teach depcheck how to pull import statements out of
//! source text in that language.

use depcheck_core::Import;

/// Result of analyzing a single source file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Package name, if declared.
    pub package: Option<String>,
    /// All import statements, in source order, with unquoted paths.
    pub imports: Vec<Import>,
    /// Whether the parser had to recover from syntax errors.
    pub has_syntax_errors: bool,
}

/// Errors raised while extracting imports.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {source}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Underlying tree-sitter error.
        source: tree_sitter::LanguageError,
    },

    /// The parser gave up without producing a tree.
    #[error("{language} parser produced no syntax tree")]
    NoTree {
        /// Language identifier.
        language: &'static str,
    },
}

/// Trait for language-specific import extraction.
///
/// The extractor receives raw source text and returns a [`FileAnalysis`]
/// whose imports are ready to be handed to the rule engine.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"go"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".go"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extracts the package and imports from source code.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError`] if the parser cannot be set up or run.
    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError>;
}
