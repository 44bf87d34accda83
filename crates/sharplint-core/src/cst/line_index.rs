//! Line index for mapping byte offsets to source lines
//!
//! Positional queries ("which line does this argument start on") drive the
//! argument-list editor's single-line vs. multi-line case analysis. Lines
//! are 0-based here; the diagnostics layer converts to 1-based for display.

use rowan::{TextRange, TextSize};

/// Sorted start offsets of every line in a source text
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(TextSize::from(i as u32 + 1));
            }
        }
        Self { line_starts }
    }

    /// 0-based line containing `offset`
    pub fn line_of(&self, offset: TextSize) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line as u32,
            Err(next) => next as u32 - 1,
        }
    }

    /// 0-based column of `offset` within its line
    pub fn col_of(&self, offset: TextSize) -> u32 {
        let line = self.line_of(offset);
        u32::from(offset) - u32::from(self.line_starts[line as usize])
    }

    /// (start line, end line) span of a range, both 0-based
    pub fn line_span(&self, range: TextRange) -> (u32, u32) {
        (self.line_of(range.start()), self.line_of(range.end()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_to_lines() {
        let index = LineIndex::new("ab\ncd\n\nef");
        assert_eq!(index.line_of(TextSize::from(0)), 0);
        assert_eq!(index.line_of(TextSize::from(2)), 0);
        assert_eq!(index.line_of(TextSize::from(3)), 1);
        assert_eq!(index.line_of(TextSize::from(6)), 2);
        assert_eq!(index.line_of(TextSize::from(7)), 3);
    }

    #[test]
    fn columns_reset_per_line() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.col_of(TextSize::from(1)), 1);
        assert_eq!(index.col_of(TextSize::from(3)), 0);
        assert_eq!(index.col_of(TextSize::from(4)), 1);
    }

    #[test]
    fn range_spans_lines() {
        let index = LineIndex::new("f(\n    a,\n    b)");
        let (start, end) = index.line_span(TextRange::new(0.into(), 16.into()));
        assert_eq!((start, end), (0, 2));
    }
}
