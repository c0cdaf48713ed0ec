use crate::error::Result;
use crate::lines::LineMapper;
use crate::span::Span;
use serde::{Deserialize, Serialize};

/// A contiguous, labeled piece of a source file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snippet {
    /// The covered lines, joined with `\n`
    pub content: String,

    /// First covered line (0-indexed, inclusive)
    pub start_line: usize,

    /// Line after the last covered one (exclusive)
    pub end_line: usize,

    /// Source file path, echoed from the caller
    pub file_path: String,
}

impl Snippet {
    /// Create a new snippet
    #[must_use]
    pub const fn new(content: String, start_line: usize, end_line: usize, file_path: String) -> Self {
        Self {
            content,
            start_line,
            end_line,
            file_path,
        }
    }

    /// Snippet for the lines of `source` covered by a line span; `lines`
    /// must be the mapper built over the same `source`
    pub fn from_line_span(
        span: Span,
        source: &str,
        lines: &LineMapper,
        file_path: &str,
    ) -> Result<Self> {
        Ok(Self::new(
            lines.line_text(span, source)?,
            span.start,
            span.end,
            file_path.to_string(),
        ))
    }

    /// Covered lines as a span
    #[must_use]
    pub const fn line_span(&self) -> Span {
        Span::new(self.start_line, self.end_line)
    }

    /// Get the number of lines in this snippet
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }

    /// Check if snippet contains a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line < self.end_line
    }
}

/// Summary of a snippet sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_lines: usize,
    pub total_chars: usize,
    pub avg_chars_per_chunk: f64,
    pub avg_lines_per_chunk: f64,
    pub min_lines: usize,
    pub max_lines: usize,
}

impl ChunkingStats {
    #[must_use]
    pub fn from_snippets(snippets: &[Snippet]) -> Self {
        if snippets.is_empty() {
            return Self::default();
        }

        let count = snippets.len();
        let total_lines = snippets.iter().map(Snippet::line_count).sum();
        let total_chars = snippets.iter().map(|s| s.content.chars().count()).sum();

        Self {
            total_chunks: count,
            total_lines,
            total_chars,
            avg_chars_per_chunk: total_chars as f64 / count as f64,
            avg_lines_per_chunk: total_lines as f64 / count as f64,
            min_lines: snippets.iter().map(Snippet::line_count).min().unwrap_or(0),
            max_lines: snippets.iter().map(Snippet::line_count).max().unwrap_or(0),
        }
    }
}

impl std::fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunks: {} | Lines: {} | Chars: {} | Avg: {:.1} chars, {:.1} lines | Range: {}-{} lines",
            self.total_chunks,
            self.total_lines,
            self.total_chars,
            self.avg_chars_per_chunk,
            self.avg_lines_per_chunk,
            self.min_lines,
            self.max_lines
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(start: usize, end: usize, content: &str) -> Snippet {
        Snippet::new(content.to_string(), start, end, "test.rs".to_string())
    }

    #[test]
    fn test_snippet_line_count() {
        assert_eq!(snippet(10, 15, "code").line_count(), 5);
        assert_eq!(snippet(3, 3, "").line_count(), 0);
    }

    #[test]
    fn test_snippet_contains_line() {
        let s = snippet(10, 15, "code");
        assert!(s.contains_line(10));
        assert!(s.contains_line(14));
        assert!(!s.contains_line(15));
        assert!(!s.contains_line(9));
    }

    #[test]
    fn test_from_line_span() {
        let source = "a\nb\nc\n";
        let lines = LineMapper::new(source);
        let s = Snippet::from_line_span(Span::new(1, 3), source, &lines, "x.py").unwrap();
        assert_eq!(s, Snippet::new("b\nc".to_string(), 1, 3, "x.py".to_string()));
        assert_eq!(s.line_span(), Span::new(1, 3));
    }

    #[test]
    fn test_snippet_serializes() {
        let json = serde_json::to_value(snippet(0, 2, "a\nb")).unwrap();
        assert_eq!(json["start_line"], 0);
        assert_eq!(json["end_line"], 2);
        assert_eq!(json["file_path"], "test.rs");
    }

    #[test]
    fn test_chunking_stats() {
        let snippets = vec![snippet(0, 4, "abcd"), snippet(4, 6, "ef")];
        let stats = ChunkingStats::from_snippets(&snippets);

        assert_eq!(stats.total_chunks, 2);
        assert_eq!(stats.total_lines, 6);
        assert_eq!(stats.total_chars, 6);
        assert!((stats.avg_chars_per_chunk - 3.0).abs() < f64::EPSILON);
        assert!((stats.avg_lines_per_chunk - 3.0).abs() < f64::EPSILON);
        assert_eq!((stats.min_lines, stats.max_lines), (2, 4));
        assert!(stats.to_string().starts_with("Chunks: 2"));

        assert_eq!(ChunkingStats::from_snippets(&[]), ChunkingStats::default());
    }
}
