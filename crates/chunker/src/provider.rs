use crate::error::{ChunkerError, Result};
use crate::syntax::SyntaxTree;
use tree_sitter::Parser;

/// Source of concrete syntax trees for a grammar identifier
pub trait ParserProvider: Send + Sync {
    /// Parse `source` with the named grammar
    fn parse(&self, grammar: &str, source: &str) -> Result<SyntaxTree>;
}

impl<P: ParserProvider + ?Sized> ParserProvider for &P {
    fn parse(&self, grammar: &str, source: &str) -> Result<SyntaxTree> {
        (**self).parse(grammar, source)
    }
}

/// Parser provider backed by the tree-sitter grammars compiled into the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterProvider;

impl TreeSitterProvider {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Grammar identifiers with a compiled-in parser
    #[must_use]
    pub const fn supported_grammars() -> &'static [&'static str] {
        &["rust", "python", "javascript", "typescript", "tsx", "go"]
    }

    /// Get Tree-sitter language instance
    pub fn language(grammar: &str) -> Result<tree_sitter::Language> {
        match grammar {
            "rust" => Ok(tree_sitter_rust::LANGUAGE.into()),
            "python" => Ok(tree_sitter_python::LANGUAGE.into()),
            "javascript" => Ok(tree_sitter_javascript::LANGUAGE.into()),
            "typescript" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
            "tsx" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
            "go" => Ok(tree_sitter_go::LANGUAGE.into()),
            other => Err(ChunkerError::grammar_unavailable(other)),
        }
    }
}

impl ParserProvider for TreeSitterProvider {
    fn parse(&self, grammar: &str, source: &str) -> Result<SyntaxTree> {
        let language = Self::language(grammar)?;
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ChunkerError::tree_sitter(format!("Failed to set language: {e}")))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ChunkerError::parse("Failed to parse source code"))?;

        Ok(SyntaxTree::from_tree_sitter(&tree))
    }
}
