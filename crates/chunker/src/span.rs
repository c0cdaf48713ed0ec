use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Half-open interval `[start, end)` over byte offsets or line indices.
///
/// Spans are combined in discovery order, and `+` is deliberately loose:
/// `Span(a, b) + Span(c, d)` is always `Span(a, d)`. No adjacency (`b == c`)
/// or ordering (`a <= d`) check is made, so call sites are responsible for
/// only concatenating spans that follow each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-length span positioned at `offset`
    #[must_use]
    pub const fn empty_at(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// `end - start`, saturating at zero for inverted spans
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Substring of `source` addressed by this span as byte offsets.
    pub fn extract<'a>(&self, source: &'a str) -> Result<&'a str> {
        source
            .get(self.start..self.end)
            .ok_or(ChunkerError::InvalidBoundaries {
                start: self.start,
                end: self.end,
            })
    }
}

/// Concatenation: keeps the left start and the right end.
impl Add for Span {
    type Output = Span;

    fn add(self, other: Span) -> Span {
        Span::new(self.start, other.end)
    }
}

/// Shift both ends by a fixed offset, saturating at `usize::MAX`.
impl Add<usize> for Span {
    type Output = Span;

    fn add(self, offset: usize) -> Span {
        Span::new(
            self.start.saturating_add(offset),
            self.end.saturating_add(offset),
        )
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation_keeps_outer_bounds() {
        assert_eq!(Span::new(1, 2) + Span::new(2, 4), Span::new(1, 4));
    }

    #[test]
    fn concatenation_does_not_check_adjacency() {
        // Non-adjacent spans still concatenate; the gap is swallowed.
        assert_eq!(Span::new(1, 2) + Span::new(10, 20), Span::new(1, 20));
        // Out of order input yields an inverted span rather than an error.
        let inverted = Span::new(10, 20) + Span::new(1, 2);
        assert_eq!(inverted, Span::new(10, 2));
        assert_eq!(inverted.len(), 0);
    }

    #[test]
    fn integer_addition_shifts() {
        assert_eq!(Span::new(3, 7) + 10, Span::new(13, 17));
    }

    #[test]
    fn integer_addition_saturates() {
        let shifted = Span::new(5, usize::MAX - 1) + 10;
        assert_eq!(shifted, Span::new(15, usize::MAX));
    }

    #[test]
    fn test_len_and_empty() {
        assert_eq!(Span::new(4, 9).len(), 5);
        assert!(Span::empty_at(4).is_empty());
        assert!(!Span::new(4, 5).is_empty());
    }

    #[test]
    fn test_extract() {
        let source = "fn main() {}\n";
        assert_eq!(Span::new(3, 7).extract(source).unwrap(), "main");
        assert!(Span::new(3, 100).extract(source).is_err());
    }

    #[test]
    fn extract_rejects_split_code_points() {
        let source = "é";
        assert!(Span::new(0, 1).extract(source).is_err());
        assert_eq!(Span::new(0, 2).extract(source).unwrap(), "é");
    }
}
