//! Core parser state and entry points.
//!
//! The parser pulls tokens on demand from an immutable token slice,
//! allocates every AST node in the arena, and accumulates diagnostics in
//! a [`Diagnostics`] sink. The cursor only moves forward; the one
//! exception is the explicit checkpoint/rollback primitive behind
//! [`Parser::speculate`], used where a prefix is ambiguous.

use bumpalo::Bump;
use bumpalo::collections::Vec as BVec;

use opal_core::{Diagnostic, Diagnostics, Span};

use crate::ast::expr::Expr;
use crate::ast::stmt::Stmt;
use crate::ast::types::TypeExpr;
use crate::ast::Program;
use crate::lexer::{Lexer, Token, TokenKind};

/// A saved cursor position for speculative parsing.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParseCheckpoint {
    position: usize,
}

/// Recursive-descent parser for Opal.
pub struct Parser<'ast> {
    /// The token sequence, terminated by `Eof`.
    tokens: &'ast [Token<'ast>],
    /// Read cursor into `tokens`.
    position: usize,
    /// Arena for AST nodes.
    pub(crate) arena: &'ast Bump,
    /// Accumulated diagnostics.
    pub(crate) diagnostics: Diagnostics,
}

impl<'ast> Parser<'ast> {
    /// Lex a source buffer and set up a parser over its tokens.
    fn new(source: &str, arena: &'ast Bump) -> Self {
        let (tokens, lex_errors) = Lexer::tokenize(source, arena);
        let mut diagnostics = Diagnostics::new();
        for error in lex_errors {
            diagnostics.push(error.into());
        }
        Self {
            tokens: arena.alloc_slice_copy(&tokens),
            position: 0,
            arena,
            diagnostics,
        }
    }

    /// Parse a complete program.
    ///
    /// Returns the program only if no diagnostics were produced;
    /// otherwise all accumulated diagnostics come back as the error.
    pub fn parse(source: &str, arena: &'ast Bump) -> Result<Program<'ast>, Diagnostics> {
        let mut parser = Self::new(source, arena);
        let program = parser.parse_program();
        if parser.diagnostics.is_empty() {
            Ok(program)
        } else {
            Err(parser.diagnostics)
        }
    }

    /// Parse a complete program, keeping whatever parsed even when
    /// diagnostics were produced.
    pub fn parse_lenient(source: &str, arena: &'ast Bump) -> (Program<'ast>, Diagnostics) {
        let mut parser = Self::new(source, arena);
        let program = parser.parse_program();
        (program, parser.diagnostics)
    }

    /// Parse a single expression. The whole buffer must be consumed.
    pub fn expression(source: &str, arena: &'ast Bump) -> Result<&'ast Expr<'ast>, Diagnostics> {
        let mut parser = Self::new(source, arena);
        match parser.parse_expr() {
            Ok(expr) => {
                parser.require_eof();
                parser.finish(expr)
            }
            Err(diag) => {
                parser.diagnostics.push(diag);
                Err(parser.diagnostics)
            }
        }
    }

    /// Parse a single statement. The whole buffer must be consumed.
    pub fn statement(source: &str, arena: &'ast Bump) -> Result<Stmt<'ast>, Diagnostics> {
        let mut parser = Self::new(source, arena);
        match parser.parse_statement() {
            Ok(stmt) => {
                parser.require_eof();
                parser.finish(stmt)
            }
            Err(diag) => {
                parser.diagnostics.push(diag);
                Err(parser.diagnostics)
            }
        }
    }

    /// Parse a single type specifier. The whole buffer must be consumed.
    pub fn type_expr(source: &str, arena: &'ast Bump) -> Result<TypeExpr<'ast>, Diagnostics> {
        let mut parser = Self::new(source, arena);
        match parser.parse_type() {
            Ok(ty) => {
                parser.require_eof();
                parser.finish(ty)
            }
            Err(diag) => {
                parser.diagnostics.push(diag);
                Err(parser.diagnostics)
            }
        }
    }

    /// Top-level driver with panic-mode recovery.
    ///
    /// On a failed statement, one diagnostic is recorded and the cursor
    /// advances exactly one token before retrying, so error cascades are
    /// bounded and independent errors all surface in one pass.
    fn parse_program(&mut self) -> Program<'ast> {
        let start = self.peek().span;
        let mut stmts = BVec::new_in(self.arena);

        while !self.is_eof() {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(diag) => {
                    self.diagnostics.push(diag);
                    self.advance();
                }
            }
        }

        let span = stmts
            .last()
            .map(|s: &Stmt<'ast>| start.merge(s.span()))
            .unwrap_or(start);
        Program::new(self.arena.alloc_slice_copy(&stmts), span)
    }

    fn finish<T>(self, value: T) -> Result<T, Diagnostics> {
        if self.diagnostics.is_empty() {
            Ok(value)
        } else {
            Err(self.diagnostics)
        }
    }

    fn require_eof(&mut self) {
        if !self.is_eof() {
            let token = self.peek();
            self.diagnostics
                .push(Diagnostic::unexpected_token(token.span, token.kind.description()));
        }
    }

    // =========================================
    // Token access
    // =========================================

    /// Look at the current token without consuming it.
    pub(crate) fn peek(&self) -> Token<'ast> {
        self.tokens[self.position]
    }

    /// Look ahead `n` tokens. Saturates at the trailing `Eof`.
    pub(crate) fn peek_nth(&self, n: usize) -> Token<'ast> {
        let idx = (self.position + n).min(self.tokens.len() - 1);
        self.tokens[idx]
    }

    /// Consume and return the current token. Never moves past `Eof`.
    pub(crate) fn advance(&mut self) -> Token<'ast> {
        let token = self.tokens[self.position];
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    /// Whether the cursor is at the end of input.
    pub(crate) fn is_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Whether the current token has the given kind.
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Whether the current token is one of the given kinds.
    pub(crate) fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.peek().kind)
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token<'ast>> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of the given kind or fail with one diagnostic.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token<'ast>, Diagnostic> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let token = self.peek();
        if token.kind == TokenKind::Eof {
            Err(Diagnostic::unexpected_eof(token.span))
        } else {
            Err(Diagnostic::expected_token(
                token.span,
                kind.description(),
                token.kind.description(),
            ))
        }
    }

    /// Span of the most recently consumed token, or of the current token
    /// when nothing has been consumed yet.
    pub(crate) fn previous_span(&self) -> Span {
        if self.position == 0 {
            self.peek().span
        } else {
            self.tokens[self.position - 1].span
        }
    }

    // =========================================
    // Speculation
    // =========================================

    /// Attempt a parse; on failure, restore the cursor and return `None`.
    ///
    /// The attempt's diagnostic is dropped, so alternatives tried through
    /// here never double-report. Arena allocations made by a failed
    /// attempt are simply abandoned to the arena.
    pub(crate) fn speculate<T>(
        &mut self,
        attempt: impl FnOnce(&mut Self) -> Result<T, Diagnostic>,
    ) -> Option<T> {
        let cp = self.checkpoint();
        match attempt(self) {
            Ok(value) => Some(value),
            Err(_) => {
                self.rollback(cp);
                None
            }
        }
    }

    pub(crate) fn checkpoint(&self) -> ParseCheckpoint {
        ParseCheckpoint {
            position: self.position,
        }
    }

    pub(crate) fn rollback(&mut self, cp: ParseCheckpoint) {
        self.position = cp.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser<'a>(source: &str, arena: &'a Bump) -> Parser<'a> {
        Parser::new(source, arena)
    }

    #[test]
    fn advance_stops_at_eof() {
        let arena = Bump::new();
        let mut p = parser("nop", &arena);
        assert_eq!(p.advance().kind, TokenKind::Nop);
        assert_eq!(p.advance().kind, TokenKind::Eof);
        assert_eq!(p.advance().kind, TokenKind::Eof);
        assert!(p.is_eof());
    }

    #[test]
    fn peek_nth_saturates() {
        let arena = Bump::new();
        let p = parser("a b", &arena);
        assert_eq!(p.peek_nth(0).kind, TokenKind::Identifier);
        assert_eq!(p.peek_nth(1).kind, TokenKind::Identifier);
        assert_eq!(p.peek_nth(2).kind, TokenKind::Eof);
        assert_eq!(p.peek_nth(50).kind, TokenKind::Eof);
    }

    #[test]
    fn expect_reports_expected_and_found() {
        let arena = Bump::new();
        let mut p = parser("halt", &arena);
        let err = p.expect(TokenKind::Semicolon).unwrap_err();
        assert!(err.message.contains("';'"));
        assert!(err.message.contains("'halt'"));
        // The failed expect consumed nothing.
        assert_eq!(p.peek().kind, TokenKind::Halt);
    }

    #[test]
    fn expect_at_eof_reports_eof() {
        let arena = Bump::new();
        let mut p = parser("", &arena);
        let err = p.expect(TokenKind::Semicolon).unwrap_err();
        assert_eq!(err.code, opal_core::DiagCode::UnexpectedEof);
    }

    #[test]
    fn speculate_restores_position_on_failure() {
        let arena = Bump::new();
        let mut p = parser("a b c", &arena);
        p.advance();

        let result: Option<()> = p.speculate(|p| {
            p.advance();
            p.advance();
            Err(Diagnostic::unexpected_eof(Span::point(1, 1)))
        });

        assert!(result.is_none());
        assert_eq!(p.position, 1);
    }

    #[test]
    fn speculate_keeps_position_on_success() {
        let arena = Bump::new();
        let mut p = parser("a b c", &arena);

        let result = p.speculate(|p| Ok(p.advance().kind));
        assert_eq!(result, Some(TokenKind::Identifier));
        assert_eq!(p.position, 1);
    }

    #[test]
    fn lexer_errors_become_diagnostics() {
        let arena = Bump::new();
        let p = parser("var x = `;", &arena);
        assert!(!p.diagnostics.is_empty());
    }
}
