use crate::config::{ChunkerConfig, CoalescePolicy};
use crate::error::Result;
use crate::span::Span;

/// Characters that are not whitespace
#[must_use]
pub fn non_whitespace_len(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Greedy merger of adjacent undersized spans
#[derive(Debug, Clone, Copy)]
pub struct Coalescer {
    coalesce: usize,
    min_chars: usize,
    policy: CoalescePolicy,
}

impl Coalescer {
    #[must_use]
    pub const fn new(coalesce: usize, min_chars: usize, policy: CoalescePolicy) -> Self {
        Self {
            coalesce,
            min_chars,
            policy,
        }
    }

    #[must_use]
    pub const fn from_config(config: &ChunkerConfig) -> Self {
        Self::new(config.coalesce, config.min_chars, config.coalesce_policy)
    }

    /// Merge gap-free byte spans of `source` into larger chunks.
    ///
    /// Spans are accumulated in order and the accumulated chunk is flushed
    /// once it holds more than `coalesce` non-whitespace characters and at
    /// least one line break, so chunks never end mid-line. Under
    /// [`CoalescePolicy::MinimumSize`] it must additionally reach `min_chars`
    /// unless it already contains the final span.
    pub fn coalesce(&self, spans: &[Span], source: &str) -> Result<Vec<Span>> {
        let mut merged = Vec::new();
        let mut current = Span::empty_at(0);
        let mut solid = 0;
        let mut has_newline = false;

        for (i, &span) in spans.iter().enumerate() {
            let next = current + span;
            if next.end >= current.end {
                let added = Span::new(current.end, next.end).extract(source)?;
                solid += non_whitespace_len(added);
                has_newline |= added.contains('\n');
            } else {
                let text = next.extract(source)?;
                solid = non_whitespace_len(text);
                has_newline = text.contains('\n');
            }
            current = next;

            let is_last = i + 1 == spans.len();
            if self.should_flush(solid, has_newline, is_last) {
                merged.push(current);
                current = Span::empty_at(span.end);
                solid = 0;
                has_newline = false;
            }
        }

        if !current.is_empty() {
            merged.push(current);
        }

        Ok(merged)
    }

    fn should_flush(&self, solid: usize, has_newline: bool, is_last: bool) -> bool {
        if solid <= self.coalesce || !has_newline {
            return false;
        }
        match self.policy {
            CoalescePolicy::SizeAndNewline => true,
            CoalescePolicy::MinimumSize => solid >= self.min_chars || is_last,
        }
    }

    /// Fold line spans shorter than `min(coalesce / 10, 15)` lines into their
    /// predecessor. The first span is never folded.
    #[must_use]
    pub fn merge_short_spans(&self, spans: Vec<Span>) -> Vec<Span> {
        let threshold = (self.coalesce / 10).min(15);
        let mut merged: Vec<Span> = Vec::with_capacity(spans.len());

        for span in spans {
            match merged.last_mut() {
                Some(prev) if span.len() < threshold => *prev = *prev + span,
                _ => merged.push(span),
            }
        }

        merged
    }

    /// Fold a final line span shorter than `min(coalesce / 5, 30)` lines into
    /// the one before it.
    #[must_use]
    pub fn merge_short_tail(&self, mut spans: Vec<Span>) -> Vec<Span> {
        let threshold = (self.coalesce / 5).min(30);
        if spans.len() > 1 && spans.last().is_some_and(|tail| tail.len() < threshold) {
            if let Some(tail) = spans.pop() {
                if let Some(prev) = spans.last_mut() {
                    *prev = *prev + tail;
                }
            }
        }
        spans
    }
}
