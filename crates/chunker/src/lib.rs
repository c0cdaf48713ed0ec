//! # Context Chunker
//!
//! Structure-aware chunking of source files into size-bounded, contiguous
//! snippets for semantic indexing.
//!
//! ## Architecture
//!
//! ```text
//! (source, file path)
//!     │
//!     ├──> Grammar lookup (extension → grammar id)
//!     │      └─> no grammar: naive line windows
//!     │
//!     ├──> Parser provider → concrete syntax tree
//!     │
//!     ├──> Tree walk: spans of at most `max_chars`, split at child boundaries
//!     ├──> Gap filling: spans tile the whole file
//!     ├──> Coalescing: merge undersized spans (size + newline + minimum)
//!     ├──> Byte offsets → line numbers, drop empty spans
//!     └──> Micro-merges: fold very short line spans into their neighbours
//!
//! Any failure after the lookup swaps the result for the naive windows.
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_chunker::Chunker;
//!
//! let chunker = Chunker::with_defaults().unwrap();
//!
//! let code = r#"
//! fn process_data(input: &str) -> String {
//!     input.trim().to_uppercase()
//! }
//! "#;
//!
//! for snippet in chunker.chunk(code, "example.rs") {
//!     println!("lines {}..{}:\n{}", snippet.start_line, snippet.end_line, snippet.content);
//! }
//! ```

mod chunker;
mod coalesce;
mod config;
mod error;
mod gaps;
mod grammar;
mod lines;
mod naive;
mod pipeline;
mod provider;
mod span;
mod syntax;
mod tree_chunker;
mod types;

pub use chunker::{ChunkOutcome, Chunker, FallbackReason};
pub use coalesce::{non_whitespace_len, Coalescer};
pub use config::{ChunkerConfig, CoalescePolicy, NaiveConfig};
pub use error::{ChunkerError, Result};
pub use gaps::fill_gaps;
pub use grammar::{extension_of, GrammarTable};
pub use lines::{line_of, LineMapper};
pub use naive::{naive_chunk, NaiveChunker};
pub use pipeline::chunk_tree;
pub use provider::{ParserProvider, TreeSitterProvider};
pub use span::Span;
pub use syntax::{NodeId, SyntaxTree, TreeBuilder};
pub use tree_chunker::chunk_tree_spans;
pub use types::{ChunkingStats, Snippet};
