use crate::coalesce::Coalescer;
use crate::config::ChunkerConfig;
use crate::error::Result;
use crate::gaps::fill_gaps;
use crate::lines::LineMapper;
use crate::span::Span;
use crate::syntax::SyntaxTree;
use crate::tree_chunker::chunk_tree_spans;

/// Run the structural pipeline over a parsed tree and return final line spans.
///
/// Tree walk, gap filling, coalescing, byte-to-line mapping, then the two
/// micro-merge passes. On success the spans cover `[0, line_count)` of
/// `source` contiguously, in order.
pub fn chunk_tree(tree: &SyntaxTree, source: &str, config: &ChunkerConfig) -> Result<Vec<Span>> {
    let spans = chunk_tree_spans(tree, config.max_chars);
    log::debug!("tree walk produced {} spans", spans.len());

    // Trailing trivia may sit outside the root node; it still belongs to the
    // last chunk.
    let tree_end = tree.span(tree.root()).end.max(source.len());
    let spans = fill_gaps(spans, tree_end);

    let coalescer = Coalescer::from_config(config);
    let merged = coalescer.coalesce(&spans, source)?;
    log::debug!("coalesced {} spans into {}", spans.len(), merged.len());

    let lines = LineMapper::new(source).map_spans(&merged);
    let lines = coalescer.merge_short_spans(lines);
    Ok(coalescer.merge_short_tail(lines))
}
