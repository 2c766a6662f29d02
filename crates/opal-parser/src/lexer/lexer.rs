//! Main lexer implementation for Opal.
//!
//! The [`Lexer`] converts one preprocessed source buffer into tokens. It
//! dispatches on the first character of each token: quoted literals first,
//! then numeric starts, then identifiers and keywords, and finally a greedy
//! longest-match probe of the operator table.
//!
//! All token text is copied into the arena, so the source buffer can be
//! freed once lexing completes.

use bumpalo::Bump;

use opal_core::{LexError, Span};

use super::cursor::{Cursor, is_ident_continue, is_ident_start};
use super::literal::{self, ScannedNumber, ScannedQuote};
use super::symbols::{MAX_SYMBOL_LEN, lookup_symbol};
use super::token::{Token, TokenKind};

/// Ceiling on the number of tokens a single buffer may produce.
///
/// Token positions are carried as 16-bit indices downstream, so the
/// sequence is cut off here with a fatal diagnostic rather than silently
/// truncating indices.
pub const MAX_TOKENS: usize = u16::MAX as usize;

/// Starting capacity of the token buffer; it doubles as it grows.
const INITIAL_TOKEN_CAPACITY: usize = 64;

/// Lexer for Opal source code.
///
/// The `'src` lifetime is the source text being scanned (temporary).
/// The `'ast` lifetime is the arena where token text lives (persists).
pub struct Lexer<'src, 'ast> {
    /// Low-level character cursor.
    cursor: Cursor<'src>,
    /// Arena for token text.
    arena: &'ast Bump,
    /// Accumulated errors.
    errors: Vec<LexError>,
}

impl<'src, 'ast> Lexer<'src, 'ast> {
    /// Create a new lexer over the given source text.
    pub fn new(source: &'src str, arena: &'ast Bump) -> Self {
        Self {
            cursor: Cursor::new(source),
            arena,
            errors: Vec::new(),
        }
    }

    /// Tokenize an entire buffer.
    ///
    /// Always terminates and always ends the sequence with an `Eof` token,
    /// even when the token ceiling cuts scanning short. Errors come back
    /// alongside the tokens; malformed input is represented in-stream by
    /// `Error` tokens.
    pub fn tokenize(source: &'src str, arena: &'ast Bump) -> (Vec<Token<'ast>>, Vec<LexError>) {
        let mut lexer = Self::new(source, arena);
        let mut tokens: Vec<Token<'ast>> = Vec::with_capacity(INITIAL_TOKEN_CAPACITY);

        loop {
            let token = lexer.scan_token();
            if token.kind == TokenKind::Eof {
                tokens.push(token);
                break;
            }
            if tokens.len() == MAX_TOKENS {
                lexer.errors.push(LexError::TooManyTokens {
                    limit: MAX_TOKENS,
                    span: token.span,
                });
                tokens.push(lexer.make_eof());
                break;
            }
            if tokens.try_reserve(1).is_err() {
                lexer.errors.push(LexError::OutOfMemory { span: token.span });
                // The buffer cannot grow, so the newest slot becomes the
                // terminator instead.
                match tokens.last_mut() {
                    Some(last) => *last = lexer.make_eof(),
                    None => tokens.push(lexer.make_eof()),
                }
                break;
            }
            tokens.push(token);
        }

        (tokens, lexer.take_errors())
    }

    /// Take accumulated errors, leaving an empty vec.
    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    /// Check if any errors occurred.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self) -> Token<'ast> {
        self.scan_token()
    }

    // =========================================
    // Internal: token scanning
    // =========================================

    fn scan_token(&mut self) -> Token<'ast> {
        self.skip_trivia();

        if self.cursor.is_eof() {
            return self.make_eof();
        }

        let start_line = self.cursor.line();
        let start_col = self.cursor.column();
        let start_offset = self.cursor.offset();

        match self.cursor.peek().unwrap() {
            '"' | '\'' => self.scan_quoted_run(start_line, start_col, start_offset),

            _ if literal::at_number_start(&self.cursor) => {
                self.scan_number(start_line, start_col, start_offset)
            }

            c if is_ident_start(c) => self.scan_identifier(start_line, start_col, start_offset),

            _ => self.scan_operator(start_line, start_col, start_offset),
        }
    }

    /// Skip whitespace, the BOM, and comments.
    fn skip_trivia(&mut self) {
        if self.cursor.check_str("\u{FEFF}") {
            self.cursor.advance_bytes(3);
        }

        loop {
            while self.cursor.check(|c| c.is_ascii_whitespace()) {
                self.cursor.advance();
            }

            if self.cursor.check_str("//") {
                while let Some(c) = self.cursor.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.cursor.advance();
                }
            } else if self.cursor.check_str("/*") {
                let line = self.cursor.line();
                let col = self.cursor.column();
                let start = self.cursor.offset();
                self.cursor.advance_bytes(2);

                let mut closed = false;
                while let Some(c) = self.cursor.peek() {
                    if c == '*' && self.cursor.check_str("*/") {
                        self.cursor.advance_bytes(2);
                        closed = true;
                        break;
                    }
                    self.cursor.advance();
                }
                if !closed {
                    self.errors.push(LexError::UnterminatedComment {
                        span: Span::new(line, col, self.cursor.offset() - start),
                    });
                }
            } else {
                break;
            }
        }
    }

    /// Create an EOF token at the current position.
    fn make_eof(&self) -> Token<'ast> {
        let line = self.cursor.line();
        let col = self.cursor.column();
        Token::new(TokenKind::Eof, "", Span::point(line, col))
    }

    /// Create a token spanning from the start position to here,
    /// copying its text into the arena.
    fn make_token(
        &self,
        kind: TokenKind,
        text: &str,
        start_line: u32,
        start_col: u32,
        start_offset: u32,
    ) -> Token<'ast> {
        let len = self.cursor.offset() - start_offset;
        let span = Span::new(start_line, start_col, len);
        Token::new(kind, self.arena.alloc_str(text), span)
    }

    /// Record an error and produce an `Error` token for it.
    fn make_error(&mut self, error: LexError) -> Token<'ast> {
        let span = error.span();
        self.errors.push(error);
        Token::new(TokenKind::Error, "", span)
    }

    // =========================================
    // Scanning: quoted literals
    // =========================================

    /// Scan a quoted literal plus any adjacent literals concatenated onto it.
    ///
    /// `"He" 'l' "lo"` collapses into a single string token holding `Hello`.
    /// A lone character literal stays a character token. Only whitespace may
    /// separate the pieces; a comment ends the run.
    fn scan_quoted_run(
        &mut self,
        start_line: u32,
        start_col: u32,
        start_offset: u32,
    ) -> Token<'ast> {
        let mut soft = Vec::new();
        let first = literal::scan_quoted(&mut self.cursor, &mut soft);
        self.errors.append(&mut soft);

        let (mut value, mut is_string) = match first {
            Ok(ScannedQuote::Str(s)) => (s, true),
            Ok(ScannedQuote::Char(c)) => (c.to_string(), false),
            Err(error) => return self.make_error(error),
        };

        loop {
            let cp = self.cursor.checkpoint();
            while self.cursor.check(|c| c.is_ascii_whitespace()) {
                self.cursor.advance();
            }
            if !matches!(self.cursor.peek(), Some('"' | '\'')) {
                self.cursor.rewind(cp);
                break;
            }

            let mut soft = Vec::new();
            let next = literal::scan_quoted(&mut self.cursor, &mut soft);
            self.errors.append(&mut soft);
            match next {
                Ok(ScannedQuote::Str(s)) => value.push_str(&s),
                Ok(ScannedQuote::Char(c)) => value.push(c),
                Err(error) => {
                    // The bad literal is consumed and reported; the run up
                    // to it is still a valid token.
                    self.errors.push(error);
                    break;
                }
            }
            is_string = true;
        }

        let kind = if is_string {
            TokenKind::StringLiteral
        } else {
            TokenKind::CharLiteral
        };
        self.make_token(kind, &value, start_line, start_col, start_offset)
    }

    // =========================================
    // Scanning: numbers
    // =========================================

    /// Scan a numeric literal.
    ///
    /// On failure the cursor is rewound to the literal's start so nothing is
    /// partially consumed, one diagnostic is recorded, and a single
    /// character is skipped to keep the scan moving.
    fn scan_number(&mut self, start_line: u32, start_col: u32, start_offset: u32) -> Token<'ast> {
        let cp = self.cursor.checkpoint();
        match literal::scan_number(&mut self.cursor) {
            Ok(ScannedNumber::Int(text)) => {
                self.make_token(TokenKind::IntLiteral, &text, start_line, start_col, start_offset)
            }
            Ok(ScannedNumber::Float(text)) => {
                self.make_token(TokenKind::FloatLiteral, &text, start_line, start_col, start_offset)
            }
            Err(error) => {
                self.errors.push(error);
                self.cursor.rewind(cp);
                let token = Token::new(TokenKind::Error, "", Span::new(start_line, start_col, 1));
                self.cursor.advance();
                token
            }
        }
    }

    // =========================================
    // Scanning: identifiers and keywords
    // =========================================

    fn scan_identifier(&mut self, start_line: u32, start_col: u32, start_offset: u32) -> Token<'ast> {
        self.cursor.eat_while(is_ident_continue);

        let lexeme = self.cursor.slice_from(start_offset);
        let kind = lookup_symbol(lexeme).unwrap_or(TokenKind::Identifier);

        self.make_token(kind, lexeme, start_line, start_col, start_offset)
    }

    // =========================================
    // Scanning: operators
    // =========================================

    /// Greedy longest-match against the operator table.
    ///
    /// Probes source slices of length 5 down to 1, so `<<<<=` beats `<<<<`
    /// beats `<<<` and so on.
    fn scan_operator(&mut self, start_line: u32, start_col: u32, start_offset: u32) -> Token<'ast> {
        let src = self.cursor.source();
        let start = start_offset as usize;
        let max = MAX_SYMBOL_LEN.min(src.len() - start);

        for len in (1..=max).rev() {
            if !src.is_char_boundary(start + len) {
                continue;
            }
            if let Some(kind) = lookup_symbol(&src[start..start + len]) {
                self.cursor.advance_bytes(len);
                let lexeme = self.cursor.slice_from(start_offset);
                return self.make_token(kind, lexeme, start_line, start_col, start_offset);
            }
        }

        // Nothing matched: report the character and skip it.
        let ch = self.cursor.advance().unwrap();
        self.make_error(LexError::UnexpectedChar {
            ch,
            span: Span::new(start_line, start_col, ch.len_utf8() as u32),
        })
    }
}

impl<'src, 'ast> Iterator for Lexer<'src, 'ast> {
    type Item = Token<'ast>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
