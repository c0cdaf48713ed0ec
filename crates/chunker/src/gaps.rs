use crate::span::Span;

/// Stretch tree-walk spans so together they cover `[0, tree_end)` with no
/// gaps.
///
/// Each span is extended to where the next one starts, which hands the
/// whitespace, punctuation and comments between nodes to the preceding
/// chunk; the last span runs to `tree_end`. A lone span is widened to the
/// whole tree.
#[must_use]
pub fn fill_gaps(mut spans: Vec<Span>, tree_end: usize) -> Vec<Span> {
    match spans.len() {
        0 => spans,
        1 => vec![Span::new(0, tree_end)],
        len => {
            for i in 0..len - 1 {
                spans[i].end = spans[i + 1].start;
            }
            spans[len - 1].end = tree_end;
            spans
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_input_stays_empty() {
        assert!(fill_gaps(Vec::new(), 100).is_empty());
    }

    #[test]
    fn single_span_covers_whole_tree() {
        assert_eq!(fill_gaps(vec![Span::new(4, 10)], 25), vec![Span::new(0, 25)]);
    }

    #[test]
    fn closes_gaps_between_spans() {
        let spans = vec![Span::new(2, 5), Span::new(7, 12), Span::new(15, 20)];
        assert_eq!(
            fill_gaps(spans, 24),
            vec![Span::new(2, 7), Span::new(7, 15), Span::new(15, 24)]
        );
    }
}
