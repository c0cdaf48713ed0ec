use crate::error::Result;
use crate::span::Span;

/// Maps byte offsets of one source text onto 0-indexed line numbers.
///
/// A line is a run of bytes up to and including its `\n` terminator (so
/// `\r\n` endings stay attached to their line). The final line may lack a
/// terminator.
#[derive(Debug, Clone)]
pub struct LineMapper {
    /// Cumulative byte length after each line.
    line_ends: Vec<usize>,
}

impl LineMapper {
    #[must_use]
    pub fn new(source: &str) -> Self {
        let mut total = 0;
        let line_ends = source
            .split_inclusive('\n')
            .map(|line| {
                total += line.len();
                total
            })
            .collect();
        Self { line_ends }
    }

    /// Number of lines in the source
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_ends.len()
    }

    /// Line containing byte `offset`: the first line whose cumulative length
    /// exceeds the offset. Offsets at or past the end of the source map to
    /// the line count.
    #[must_use]
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_ends.partition_point(|&end| end <= offset)
    }

    /// Convert a byte span into a line span, mapping each endpoint on its own.
    #[must_use]
    pub fn to_lines(&self, span: Span) -> Span {
        Span::new(self.line_of(span.start), self.line_of(span.end))
    }

    /// Byte range of the lines in a line span, terminators included. Line
    /// indices past the end are clamped to the line count.
    #[must_use]
    pub fn line_range(&self, span: Span) -> Span {
        let end = span.end.min(self.line_count());
        let start = span.start.min(end);
        Span::new(self.line_start(start), self.line_start(end))
    }

    /// Text of the lines in a line span joined with `\n`, as `str::lines`
    /// would yield them: the final terminator is dropped and `\r\n` becomes
    /// `\n`.
    pub fn line_text(&self, span: Span, source: &str) -> Result<String> {
        let text = self.line_range(span).extract(source)?;
        let text = match text.strip_suffix('\n') {
            Some(body) => body.strip_suffix('\r').unwrap_or(body),
            None => text,
        };
        Ok(text.replace("\r\n", "\n"))
    }

    fn line_start(&self, line: usize) -> usize {
        match line {
            0 => 0,
            n => self.line_ends[n - 1],
        }
    }

    /// Convert byte spans to line spans, dropping those that cover no line.
    #[must_use]
    pub fn map_spans(&self, spans: &[Span]) -> Vec<Span> {
        spans
            .iter()
            .map(|span| self.to_lines(*span))
            .filter(|span| !span.is_empty())
            .collect()
    }
}

/// Line of byte `offset` in `source`.
#[must_use]
pub fn line_of(offset: usize, source: &str) -> usize {
    LineMapper::new(source).line_of(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_of() {
        let source = "ab\ncd\n\nef";
        assert_eq!(line_of(0, source), 0);
        assert_eq!(line_of(2, source), 0); // the newline itself
        assert_eq!(line_of(3, source), 1);
        assert_eq!(line_of(6, source), 2);
        assert_eq!(line_of(7, source), 3);
        assert_eq!(line_of(8, source), 3);
    }

    #[test]
    fn offsets_past_the_end_map_to_line_count() {
        let mapper = LineMapper::new("a\nb\n");
        assert_eq!(mapper.line_count(), 2);
        assert_eq!(mapper.line_of(4), 2);
        assert_eq!(mapper.line_of(400), 2);

        let unterminated = LineMapper::new("a\nb");
        assert_eq!(unterminated.line_of(3), 2);
    }

    #[test]
    fn empty_source_has_no_lines() {
        let mapper = LineMapper::new("");
        assert_eq!(mapper.line_count(), 0);
        assert_eq!(mapper.line_of(0), 0);
    }

    #[test]
    fn crlf_terminators_belong_to_their_line() {
        let mapper = LineMapper::new("a\r\nb\r\n");
        assert_eq!(mapper.line_of(1), 0);
        assert_eq!(mapper.line_of(2), 0);
        assert_eq!(mapper.line_of(3), 1);
    }

    #[test]
    fn map_spans_drops_zero_line_spans() {
        let source = "one\ntwo\nthree\n";
        let mapper = LineMapper::new(source);
        let spans = [Span::new(0, 1), Span::new(1, 8), Span::new(8, 14)];
        assert_eq!(
            mapper.map_spans(&spans),
            vec![Span::new(0, 2), Span::new(2, 3)]
        );
    }

    #[test]
    fn line_range_covers_whole_lines() {
        let mapper = LineMapper::new("ab\ncd\n\nef");
        assert_eq!(mapper.line_range(Span::new(0, 1)), Span::new(0, 3));
        assert_eq!(mapper.line_range(Span::new(1, 3)), Span::new(3, 7));
        assert_eq!(mapper.line_range(Span::new(3, 10)), Span::new(7, 9));
        assert_eq!(mapper.line_range(Span::new(2, 2)), Span::new(6, 6));
    }

    #[test]
    fn line_text_joins_lines() {
        let source = "a\nb\nc\nd\n";
        let mapper = LineMapper::new(source);
        assert_eq!(mapper.line_text(Span::new(1, 3), source).unwrap(), "b\nc");
        assert_eq!(mapper.line_text(Span::new(3, 10), source).unwrap(), "d");
        assert_eq!(mapper.line_text(Span::new(2, 2), source).unwrap(), "");
    }

    #[test]
    fn line_text_matches_str_lines_on_crlf() {
        let source = "fn a() {\r\n    1\r\n}\r\n\r\nfn b() {}\r\nlast";
        let mapper = LineMapper::new(source);
        let lines: Vec<&str> = source.lines().collect();

        for start in 0..=lines.len() {
            for end in start..=lines.len() {
                let expected = lines[start..end].join("\n");
                let text = mapper.line_text(Span::new(start, end), source).unwrap();
                assert_eq!(text, expected, "lines [{start}, {end})");
            }
        }
    }

    #[test]
    fn line_text_rejects_foreign_source() {
        let mapper = LineMapper::new("long line here\n");
        assert!(mapper.line_text(Span::new(0, 1), "short").is_err());
    }
}
