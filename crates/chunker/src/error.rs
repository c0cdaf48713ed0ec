use thiserror::Error;

/// Result type for chunker operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors that can occur during code chunking
#[derive(Error, Debug)]
pub enum ChunkerError {
    /// The parser could not produce a tree for the source
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Grammar is mapped but has no parser available at runtime
    #[error("Grammar unavailable: {0}")]
    GrammarUnavailable(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sliding window overlap does not leave a positive step
    #[error("Overlap ({overlap}) must be smaller than the window ({window})")]
    InvalidOverlap { window: usize, overlap: usize },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML resource could not be decoded
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Span does not address a valid region of the source
    #[error("Invalid chunk boundaries: start={start}, end={end}")]
    InvalidBoundaries { start: usize, end: usize },

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),
}

impl ChunkerError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a grammar unavailable error
    pub fn grammar_unavailable(grammar: impl Into<String>) -> Self {
        Self::GrammarUnavailable(grammar.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }
}
