use crate::span::Span;
use crate::syntax::{NodeId, SyntaxTree};

/// One pending node of the descent: which child comes next and the span
/// accumulated from the children already visited.
struct Frame {
    node: NodeId,
    next_child: usize,
    current: Span,
}

impl Frame {
    fn new(tree: &SyntaxTree, node: NodeId) -> Self {
        Self {
            node,
            next_child: 0,
            current: Span::empty_at(tree.span(node).start),
        }
    }
}

/// Reduce `tree` to ordered byte spans of at most `max_chars` bytes each.
///
/// Children are packed greedily left to right. A child larger than the limit
/// is split by descending into it; an oversized node without children cannot
/// be split and is emitted alone. Spans do not cover the gaps between sibling
/// nodes yet, see [`crate::fill_gaps`].
#[must_use]
pub fn chunk_tree_spans(tree: &SyntaxTree, max_chars: usize) -> Vec<Span> {
    let mut chunks = Vec::new();

    let root = tree.root();
    if tree.children(root).is_empty() {
        let span = tree.span(root);
        if span.len() > max_chars {
            chunks.push(span);
        }
        return chunks;
    }

    let mut stack = vec![Frame::new(tree, root)];
    while let Some(frame) = stack.last_mut() {
        let children = tree.children(frame.node);
        let Some(&child) = children.get(frame.next_child) else {
            if !frame.current.is_empty() {
                chunks.push(frame.current);
            }
            stack.pop();
            continue;
        };
        frame.next_child += 1;

        let child_span = tree.span(child);
        if child_span.len() > max_chars {
            if !frame.current.is_empty() {
                chunks.push(frame.current);
            }
            frame.current = Span::empty_at(child_span.end);

            if tree.children(child).is_empty() {
                chunks.push(child_span);
            } else {
                stack.push(Frame::new(tree, child));
            }
        } else if child_span.len() + frame.current.len() > max_chars {
            if !frame.current.is_empty() {
                chunks.push(frame.current);
            }
            frame.current = child_span;
        } else {
            frame.current = frame.current + child_span;
        }
    }

    chunks
}
