use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::grammar::{extension_of, GrammarTable};
use crate::lines::LineMapper;
use crate::naive::NaiveChunker;
use crate::pipeline::chunk_tree;
use crate::provider::{ParserProvider, TreeSitterProvider};
use crate::types::Snippet;

/// Why the structural path was not used for a file
#[derive(Debug)]
pub enum FallbackReason {
    /// No grammar is mapped for the file's extension; the parser was never
    /// consulted
    NoGrammar { extension: String },

    /// A grammar was mapped but parsing or tree processing failed
    Failed(ChunkerError),
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoGrammar { extension } => write!(f, "no grammar for extension '{extension}'"),
            Self::Failed(err) => write!(f, "{err}"),
        }
    }
}

/// Result of chunking one file: either the structural snippets or the naive
/// windows that replaced them wholesale.
#[derive(Debug)]
pub enum ChunkOutcome {
    Chunked(Vec<Snippet>),
    Fallback {
        reason: FallbackReason,
        snippets: Vec<Snippet>,
    },
}

impl ChunkOutcome {
    #[must_use]
    pub fn snippets(&self) -> &[Snippet] {
        match self {
            Self::Chunked(snippets) | Self::Fallback { snippets, .. } => snippets,
        }
    }

    #[must_use]
    pub fn into_snippets(self) -> Vec<Snippet> {
        match self {
            Self::Chunked(snippets) | Self::Fallback { snippets, .. } => snippets,
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    #[must_use]
    pub const fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Chunked(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }
}

/// Main chunker interface: routes a file to structural or naive chunking
pub struct Chunker<P = TreeSitterProvider> {
    config: ChunkerConfig,
    grammars: GrammarTable,
    provider: P,
    naive: NaiveChunker,
}

impl Chunker<TreeSitterProvider> {
    /// Default configuration, bundled grammar table and tree-sitter parsers
    pub fn with_defaults() -> Result<Self> {
        Self::new(
            ChunkerConfig::default(),
            GrammarTable::builtin()?,
            TreeSitterProvider::new(),
        )
    }
}

impl<P: ParserProvider> Chunker<P> {
    /// Create a new chunker; the configuration is validated up front so that
    /// chunking itself never fails.
    pub fn new(config: ChunkerConfig, grammars: GrammarTable, provider: P) -> Result<Self> {
        config.validate()?;
        let naive = NaiveChunker::new(config.fallback)?;
        Ok(Self {
            config,
            grammars,
            provider,
            naive,
        })
    }

    /// Chunk `source` into ordered snippets labeled with `file_path`.
    ///
    /// Never fails: unmapped extensions and any failure on the structural
    /// path yield the naive line windows instead.
    #[must_use]
    pub fn chunk(&self, source: &str, file_path: &str) -> Vec<Snippet> {
        self.chunk_with_outcome(source, file_path).into_snippets()
    }

    /// Like [`Chunker::chunk`], but reports whether and why the fallback was
    /// used.
    #[must_use]
    pub fn chunk_with_outcome(&self, source: &str, file_path: &str) -> ChunkOutcome {
        let Some(grammar) = self.grammar_for(file_path) else {
            let extension = extension_of(file_path).to_string();
            log::debug!("{file_path}: no grammar for '{extension}', using line windows");
            return ChunkOutcome::Fallback {
                reason: FallbackReason::NoGrammar { extension },
                snippets: self.naive.chunk(source, file_path),
            };
        };

        match self.chunk_structural(source, file_path, grammar) {
            Ok(snippets) => ChunkOutcome::Chunked(snippets),
            Err(e) => {
                log::warn!("{file_path}: structural chunking failed, falling back to line windows: {e}");
                ChunkOutcome::Fallback {
                    reason: FallbackReason::Failed(e),
                    snippets: self.naive.chunk(source, file_path),
                }
            }
        }
    }

    /// Structural path only; errors are returned instead of absorbed.
    pub fn chunk_structural(
        &self,
        source: &str,
        file_path: &str,
        grammar: &str,
    ) -> Result<Vec<Snippet>> {
        let tree = self.provider.parse(grammar, source)?;
        let spans = chunk_tree(&tree, source, &self.config)?;
        log::debug!("{file_path}: {} chunks with grammar '{grammar}'", spans.len());

        let lines = LineMapper::new(source);
        spans
            .into_iter()
            .map(|span| Snippet::from_line_span(span, source, &lines, file_path))
            .collect()
    }

    /// Grammar the file would be parsed with, usable as a language tag
    #[must_use]
    pub fn grammar_for(&self, file_path: &str) -> Option<&str> {
        self.grammars.resolve(file_path)
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Get grammar table
    #[must_use]
    pub const fn grammars(&self) -> &GrammarTable {
        &self.grammars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NaiveConfig;
    use crate::syntax::{SyntaxTree, TreeBuilder};
    use crate::types::ChunkingStats;
    use pretty_assertions::assert_eq;

    /// Provider returning a fixed tree regardless of input
    struct FixedTree(SyntaxTree);

    impl ParserProvider for FixedTree {
        fn parse(&self, _grammar: &str, _source: &str) -> Result<SyntaxTree> {
            Ok(self.0.clone())
        }
    }

    fn rust_only() -> GrammarTable {
        [("rs", "rust")].into_iter().collect()
    }

    #[test]
    fn rejects_invalid_fallback_windows() {
        let config = ChunkerConfig {
            fallback: NaiveConfig {
                window: 5,
                overlap: 10,
            },
            ..ChunkerConfig::default()
        };
        let result = Chunker::new(config, rust_only(), TreeSitterProvider::new());
        assert!(matches!(result, Err(ChunkerError::InvalidOverlap { .. })));
    }

    #[test]
    fn tree_with_bad_offsets_falls_back() {
        let mut builder = TreeBuilder::new(0, 5000);
        let root = builder.root();
        builder.push(root, 0, 2000);
        builder.push(root, 2000, 5000);
        let provider = FixedTree(builder.build());
        let chunker = Chunker::new(ChunkerConfig::default(), rust_only(), provider).unwrap();

        let source = "fn main() {}\n";
        let outcome = chunker.chunk_with_outcome(source, "main.rs");
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::Failed(ChunkerError::InvalidBoundaries { .. }))
        ));
        assert_eq!(
            outcome.snippets(),
            chunker.naive.chunk(source, "main.rs").as_slice()
        );
    }

    #[test]
    fn unavailable_grammar_falls_back() {
        let grammars: GrammarTable = [("cob", "cobol")].into_iter().collect();
        let chunker =
            Chunker::new(ChunkerConfig::default(), grammars, TreeSitterProvider::new()).unwrap();

        let outcome = chunker.chunk_with_outcome("DISPLAY 'HI'.\n", "hello.cob");
        assert!(matches!(
            outcome.fallback_reason(),
            Some(FallbackReason::Failed(ChunkerError::GrammarUnavailable(_)))
        ));
        assert_eq!(outcome.snippets().len(), 1);
    }

    #[test]
    fn reports_missing_grammar() {
        let chunker = Chunker::with_defaults().unwrap();
        let outcome = chunker.chunk_with_outcome("plain text\n", "README.unknownext");
        match outcome.fallback_reason() {
            Some(FallbackReason::NoGrammar { extension }) => assert_eq!(extension, "unknownext"),
            other => panic!("expected NoGrammar, got {other:?}"),
        }
    }

    #[test]
    fn test_grammar_for() {
        let chunker = Chunker::with_defaults().unwrap();
        assert_eq!(chunker.grammar_for("src/lib.rs"), Some("rust"));
        assert_eq!(chunker.grammar_for("app.jsx"), Some("tsx"));
        assert_eq!(chunker.grammar_for("data.bin"), None);
    }

    #[test]
    fn test_chunking_stats() {
        let source = "fn a() {}\n\nfn b() {}\n";
        let mut builder = TreeBuilder::new(0, source.len());
        let root = builder.root();
        builder.push(root, 0, 9);
        builder.push(root, 11, 20);
        let chunker =
            Chunker::new(ChunkerConfig::default(), rust_only(), FixedTree(builder.build())).unwrap();

        let snippets = chunker.chunk(source, "lib.rs");
        let stats = ChunkingStats::from_snippets(&snippets);

        assert_eq!(stats.total_chunks, snippets.len());
        assert_eq!(stats.total_lines, 3);
    }
}
