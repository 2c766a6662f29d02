//! Source location tracking.

use std::fmt;

/// A region of source text, identified by where it starts.
///
/// Lines and columns are 1-indexed; columns count bytes, so a tab
/// advances the column by one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed).
    pub line: u32,
    /// Column number (1-indexed, byte-based).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    /// Create a span from a line, column, and byte length.
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// Create a zero-length span at a position.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    /// Whether this span covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The length of this span in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Extend this span to also cover `other`.
    ///
    /// Spans on different lines are approximated: the result keeps the
    /// first span's position with the combined length.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        if self.line == other.line {
            let start_col = self.col.min(other.col);
            let end_col = (other.col + other.len).max(self.col + self.len);
            Span {
                line: self.line,
                col: start_col,
                len: end_col - start_col,
            }
        } else {
            Span {
                line: self.line,
                col: self.col,
                len: self.len + other.len,
            }
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(2, 7, 4);
        assert_eq!(span.len(), 4);
        assert!(!span.is_empty());

        let point = Span::point(2, 7);
        assert!(point.is_empty());
    }

    #[test]
    fn span_display() {
        assert_eq!(format!("{}", Span::new(12, 3, 1)), "12:3");
    }

    #[test]
    fn merge_same_line() {
        let a = Span::new(1, 5, 3);
        let b = Span::new(1, 10, 3);
        let merged = a.merge(b);

        assert_eq!(merged.line, 1);
        assert_eq!(merged.col, 5);
        assert_eq!(merged.len, 8);
    }

    #[test]
    fn merge_out_of_order() {
        let a = Span::new(1, 10, 2);
        let b = Span::new(1, 4, 2);
        let merged = a.merge(b);

        assert_eq!(merged.col, 4);
        assert_eq!(merged.len, 8);
    }

    #[test]
    fn merge_different_lines_approximates() {
        let a = Span::new(1, 5, 6);
        let b = Span::new(3, 1, 4);
        let merged = a.merge(b);

        assert_eq!(merged.line, 1);
        assert_eq!(merged.col, 5);
        assert_eq!(merged.len, 10);
    }
}
