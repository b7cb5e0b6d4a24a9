//! Go language extractor using Tree-sitter.

use depcheck_core::{Import, Span};
use tree_sitter::{Language, Node, Parser};

use crate::extractor::{ExtractError, FileAnalysis, LanguageExtractor};

/// Extracts the package clause and import specs from Go source.
pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    /// Creates a new Go extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    /// Strips the quotes of an interpreted (`"..."`) or raw (`` `...` ``) literal.
    fn unquote(literal: &str) -> &str {
        for quote in ['"', '`'] {
            if let Some(inner) = literal
                .strip_prefix(quote)
                .and_then(|s| s.strip_suffix(quote))
            {
                return inner;
            }
        }
        literal
    }

    fn extract_package(node: &Node<'_>, src: &[u8]) -> Option<String> {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "package_identifier")
            .map(|c| Self::text(&c, src).to_owned());
        name
    }

    fn extract_import_spec(node: &Node<'_>, src: &[u8]) -> Option<Import> {
        let path = node.child_by_field_name("path")?;
        let literal = Self::text(&path, src);
        Some(Import::new(
            Self::unquote(literal),
            Span::new(node.start_byte(), node.end_byte()),
        ))
    }

    /// Collects every `import_spec` under an `import_declaration`, grouped or not.
    fn extract_imports(node: &Node<'_>, src: &[u8], out: &mut Vec<Import>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "import_spec" => {
                    if let Some(imp) = Self::extract_import_spec(&child, src) {
                        out.push(imp);
                    }
                }
                "import_spec_list" => Self::extract_imports(&child, src, out),
                _ => {}
            }
        }
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for GoExtractor {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".go"]
    }

    fn analyze(&self, source: &str) -> Result<FileAnalysis, ExtractError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ExtractError::Language {
                language: self.language_id(),
                source: e,
            })?;

        let src = source.as_bytes();
        let tree = parser.parse(src, None).ok_or(ExtractError::NoTree {
            language: self.language_id(),
        })?;
        let root = tree.root_node();

        let mut result = FileAnalysis {
            has_syntax_errors: root.has_error(),
            ..FileAnalysis::default()
        };

        let mut cursor = root.walk();
        for node in root.children(&mut cursor) {
            match node.kind() {
                "package_clause" => {
                    result.package = Self::extract_package(&node, src);
                }
                "import_declaration" => {
                    Self::extract_imports(&node, src, &mut result.imports);
                }
                _ => {}
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(src: &str) -> FileAnalysis {
        GoExtractor::new().analyze(src).unwrap()
    }

    fn paths(a: &FileAnalysis) -> Vec<&str> {
        a.imports.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn extracts_package() {
        let a = analyze("package pkg1\n");
        assert_eq!(a.package.as_deref(), Some("pkg1"));
    }

    #[test]
    fn extracts_single_import() {
        let a = analyze("package main\n\nimport \"fmt\"\n");
        assert_eq!(paths(&a), vec!["fmt"]);
    }

    #[test]
    fn extracts_grouped_imports_in_order() {
        let a = analyze(
            "package pkg1\n\nimport (\n\t\"fmt\"\n\n\t\"example.com/app/domain/pkg2\"\n\tusecasepkg1 \"example.com/app/usecase/pkg1\"\n)\n",
        );
        assert_eq!(
            paths(&a),
            vec![
                "fmt",
                "example.com/app/domain/pkg2",
                "example.com/app/usecase/pkg1"
            ]
        );
    }

    #[test]
    fn extracts_dot_blank_and_raw_imports() {
        let a = analyze(
            "package main\n\nimport (\n\t. \"math\"\n\t_ \"embed\"\n\t`net/http`\n)\n",
        );
        assert_eq!(paths(&a), vec!["math", "embed", "net/http"]);
    }

    #[test]
    fn multiple_import_declarations() {
        let a = analyze("package main\n\nimport \"fmt\"\nimport \"os\"\n");
        assert_eq!(paths(&a), vec!["fmt", "os"]);
    }

    #[test]
    fn span_covers_the_whole_spec_including_alias() {
        let src = "package main\n\nimport alias \"example.com/x\"\n";
        let a = analyze(src);
        let span = a.imports[0].span;
        assert_eq!(&src[span.start..span.end], "alias \"example.com/x\"");
    }

    #[test]
    fn imports_after_declarations_are_ignored() {
        let a = analyze("package main\n\nfunc main() {}\n");
        assert!(a.imports.is_empty());
    }

    #[test]
    fn empty_source() {
        let a = analyze("");
        assert!(a.package.is_none());
        assert!(a.imports.is_empty());
    }

    #[test]
    fn syntax_errors_are_flagged_but_imports_survive() {
        let a = analyze("package main\n\nimport \"fmt\"\n\nfunc main( {\n");
        assert!(a.has_syntax_errors);
        assert_eq!(paths(&a), vec!["fmt"]);
    }

    #[test]
    fn unquote_handles_both_literal_kinds() {
        assert_eq!(GoExtractor::unquote("\"fmt\""), "fmt");
        assert_eq!(GoExtractor::unquote("`fmt`"), "fmt");
        assert_eq!(GoExtractor::unquote("fmt"), "fmt");
    }
}
