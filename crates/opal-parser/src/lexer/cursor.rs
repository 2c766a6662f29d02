/// A cursor over source text.
///
/// Provides peek/advance character access and tracks byte offset, line,
/// and column as it moves. The literal scanner uses [`Cursor::checkpoint`]
/// and [`Cursor::rewind`] to back out of a failed scan without leaving the
/// cursor partially advanced.
pub struct Cursor<'src> {
    /// The full source text.
    source: &'src str,
    /// Remaining source text (slice starting at the current position).
    rest: &'src str,
    /// Current byte offset from the start of the source.
    offset: u32,
    /// Current line number (1-indexed).
    line: u32,
    /// Current column number (1-indexed, byte-based).
    column: u32,
}

/// A saved cursor position.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    offset: u32,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Create a cursor at the start of the source.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Current byte offset from the start of the source.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Current line number (1-indexed).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current column number (1-indexed, byte-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Whether the cursor has consumed all input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Save the current position.
    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Move back to a previously saved position.
    #[inline]
    pub fn rewind(&mut self, cp: Checkpoint) {
        self.offset = cp.offset;
        self.line = cp.line;
        self.column = cp.column;
        self.rest = &self.source[cp.offset as usize..];
    }

    /// Peek at the current character without consuming it.
    ///
    /// ASCII fast path avoids building a char iterator for the common case.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        let bytes = self.rest.as_bytes();
        let first = *bytes.first()?;
        if first < 128 {
            Some(first as char)
        } else {
            self.rest.chars().next()
        }
    }

    /// Peek at the nth character ahead (0 = current).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Whether the current character satisfies a predicate.
    #[inline]
    pub fn check(&self, f: impl Fn(char) -> bool) -> bool {
        self.peek().is_some_and(f)
    }

    /// Whether the upcoming bytes match the given string.
    #[inline]
    pub fn check_str(&self, s: &str) -> bool {
        self.rest.starts_with(s)
    }

    /// Consume the current character and advance.
    ///
    /// Returns the consumed character, or `None` at EOF. Newlines reset the
    /// column and bump the line.
    #[inline(always)]
    pub fn advance(&mut self) -> Option<char> {
        let bytes = self.rest.as_bytes();
        if bytes.is_empty() {
            return None;
        }

        let first_byte = bytes[0];

        if first_byte < 128 {
            let ch = first_byte as char;
            self.rest = unsafe {
                // SAFETY: first_byte < 128, so skipping one byte stays on a
                // UTF-8 boundary
                std::str::from_utf8_unchecked(&bytes[1..])
            };
            self.offset += 1;

            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }

            Some(ch)
        } else {
            let ch = self.rest.chars().next()?;
            let len = ch.len_utf8() as u32;

            self.rest = &self.rest[len as usize..];
            self.offset += len;
            self.column += len;

            Some(ch)
        }
    }

    /// Advance by n bytes.
    ///
    /// `n` must land on a UTF-8 boundary.
    pub fn advance_bytes(&mut self, n: usize) {
        debug_assert!(self.rest.is_char_boundary(n));

        for ch in self.rest[..n].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += ch.len_utf8() as u32;
            }
        }

        self.rest = &self.rest[n..];
        self.offset += n as u32;
    }

    /// Consume the current character if it matches.
    #[inline]
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate matches.
    ///
    /// Returns the consumed slice.
    pub fn eat_while(&mut self, f: impl Fn(char) -> bool) -> &'src str {
        let start = self.offset as usize;
        while self.check(&f) {
            self.advance();
        }
        &self.source[start..self.offset as usize]
    }

    /// Get a slice of source from a starting offset to the current position.
    #[inline]
    pub fn slice_from(&self, start: u32) -> &'src str {
        &self.source[start as usize..self.offset as usize]
    }
}

/// Whether a character can start an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Whether a character can continue an identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cursor = Cursor::new("push");
        assert_eq!(cursor.peek(), Some('p'));
        assert_eq!(cursor.offset(), 0);

        assert_eq!(cursor.advance(), Some('p'));
        assert_eq!(cursor.peek(), Some('u'));
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn cursor_eat() {
        let mut cursor = Cursor::new("jump");

        assert!(cursor.eat('j'));
        assert!(!cursor.eat('j'));
        assert!(cursor.eat('u'));
    }

    #[test]
    fn cursor_eat_while() {
        let mut cursor = Cursor::new("aaabbb");

        assert_eq!(cursor.eat_while(|c| c == 'a'), "aaa");
        assert_eq!(cursor.eat_while(|c| c == 'b'), "bbb");
        assert!(cursor.is_eof());
    }

    #[test]
    fn cursor_peek_nth() {
        let cursor = Cursor::new("nop");
        assert_eq!(cursor.peek_nth(0), Some('n'));
        assert_eq!(cursor.peek_nth(2), Some('p'));
        assert_eq!(cursor.peek_nth(3), None);
    }

    #[test]
    fn cursor_line_and_column() {
        let mut cursor = Cursor::new("ab\ncd");

        cursor.advance();
        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (1, 3));

        cursor.advance(); // newline
        assert_eq!((cursor.line(), cursor.column()), (2, 1));

        cursor.advance();
        assert_eq!((cursor.line(), cursor.column()), (2, 2));
    }

    #[test]
    fn cursor_tab_counts_one_column() {
        let mut cursor = Cursor::new("\tx");
        cursor.advance();
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn cursor_checkpoint_rewind() {
        let mut cursor = Cursor::new("12.x\nrest");
        let cp = cursor.checkpoint();

        cursor.advance();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.offset(), 3);

        cursor.rewind(cp);
        assert_eq!(cursor.offset(), 0);
        assert_eq!((cursor.line(), cursor.column()), (1, 1));
        assert_eq!(cursor.peek(), Some('1'));
    }

    #[test]
    fn cursor_rewind_restores_line() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        let cp = cursor.checkpoint();
        cursor.advance(); // newline
        cursor.advance();
        assert_eq!(cursor.line(), 2);

        cursor.rewind(cp);
        assert_eq!(cursor.line(), 1);
        assert_eq!(cursor.peek(), Some('\n'));
    }

    #[test]
    fn cursor_utf8() {
        let mut cursor = Cursor::new("héllo");

        cursor.advance(); // h
        assert_eq!(cursor.offset(), 1);

        cursor.advance(); // é, two bytes
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.column(), 4); // columns count bytes
    }

    #[test]
    fn cursor_slice_from() {
        let mut cursor = Cursor::new("halt now");
        let start = cursor.offset();

        cursor.eat_while(is_ident_continue);
        assert_eq!(cursor.slice_from(start), "halt");
    }

    #[test]
    fn cursor_check_str() {
        let cursor = Cursor::new("<<<<=");
        assert!(cursor.check_str("<<<<"));
        assert!(cursor.check_str("<<<<="));
        assert!(!cursor.check_str("<<<<=="));
    }

    #[test]
    fn ident_predicates() {
        assert!(is_ident_start('_'));
        assert!(!is_ident_start('3'));
        assert!(is_ident_continue('3'));
        assert!(!is_ident_continue('$'));
    }
}
