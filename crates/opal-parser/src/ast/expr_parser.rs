//! Expression parsing for Opal.
//!
//! Every binary precedence level goes through one reusable
//! left-associative combinator, [`Parser::parse_binary_level`],
//! parameterized by the accepted operator set and the operand parser.
//! Ternary is right-associative; casts are disambiguated from
//! parenthesized expressions by speculation.

use super::parser::Parser;
use crate::ast::expr::*;
use crate::ast::{AssignOp, BinaryOp, Ident, Indirection, PostfixOp, UnaryOp};
use crate::lexer::TokenKind;
use bumpalo::collections::Vec as BVec;
use opal_core::{DiagCode, Diagnostic};

const LOGICAL_OPS: &[TokenKind] = &[TokenKind::AmpAmp, TokenKind::PipePipe];
const BIT_OR_OPS: &[TokenKind] = &[TokenKind::Pipe];
const BIT_XOR_OPS: &[TokenKind] = &[TokenKind::Caret];
const BIT_AND_OPS: &[TokenKind] = &[TokenKind::Amp];
const EQUALITY_OPS: &[TokenKind] = &[TokenKind::EqualEqual, TokenKind::BangEqual];
const RELATIONAL_OPS: &[TokenKind] = &[
    TokenKind::Less,
    TokenKind::LessEqual,
    TokenKind::Greater,
    TokenKind::GreaterEqual,
];
const SHIFT_OPS: &[TokenKind] = &[
    TokenKind::LessLess,
    TokenKind::GreaterGreater,
    TokenKind::LessLessLess,
    TokenKind::GreaterGreaterGreater,
    TokenKind::LessLessLessLess,
    TokenKind::GreaterGreaterGreaterGreater,
];
const ADDITIVE_OPS: &[TokenKind] = &[TokenKind::Plus, TokenKind::Minus];
const MULTIPLICATIVE_OPS: &[TokenKind] = &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent];

impl<'ast> Parser<'ast> {
    /// Parse an expression at the lowest precedence level.
    pub(crate) fn parse_expr(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_assignment()
    }

    /// Assignment, simple or compound. A brace-list target followed by a
    /// plain `=` is the multi-assignment form; compound operators reject
    /// a list target.
    fn parse_assignment(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        let mut lhs = self.parse_ternary()?;

        while let Some(op) = AssignOp::from_token(self.peek().kind) {
            if matches!(lhs, Expr::InitList(_)) && !op.is_simple() {
                return Err(Diagnostic::new(
                    DiagCode::InvalidExpression,
                    self.peek().span,
                    "a multi-value list can only be assigned with plain '='",
                ));
            }
            self.advance();
            let value = self.parse_ternary()?;
            let span = lhs.span().merge(value.span());
            lhs = self.arena.alloc(Expr::Assign(self.arena.alloc(AssignExpr {
                target: lhs,
                op,
                value,
                span,
            })));
        }

        Ok(lhs)
    }

    /// Parse one generic argument expression. Arguments stop above the
    /// relational level so a bare `>` always closes the angle suffix;
    /// lower-precedence arguments need parentheses.
    pub(crate) fn parse_angle_arg(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_shift()
    }

    /// Ternary conditional, right-associative.
    fn parse_ternary(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        let condition = self.parse_logical()?;
        if self.eat(TokenKind::Question).is_none() {
            return Ok(condition);
        }

        let then_expr = self.parse_ternary()?;
        self.expect(TokenKind::Colon)?;
        let else_expr = self.parse_ternary()?;

        let span = condition.span().merge(else_expr.span());
        Ok(self.arena.alloc(Expr::Ternary(self.arena.alloc(TernaryExpr {
            condition,
            then_expr,
            else_expr,
            span,
        }))))
    }

    fn parse_logical(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(LOGICAL_OPS, Self::parse_bit_or)
    }

    fn parse_bit_or(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(BIT_OR_OPS, Self::parse_bit_xor)
    }

    fn parse_bit_xor(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(BIT_XOR_OPS, Self::parse_bit_and)
    }

    fn parse_bit_and(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(BIT_AND_OPS, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(EQUALITY_OPS, Self::parse_relational)
    }

    fn parse_relational(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(RELATIONAL_OPS, Self::parse_shift)
    }

    fn parse_shift(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(SHIFT_OPS, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(ADDITIVE_OPS, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.parse_binary_level(MULTIPLICATIVE_OPS, Self::parse_cast)
    }

    /// One left-associative binary level. All levels share this
    /// algorithm and differ only in their operator set and operand
    /// callback.
    fn parse_binary_level(
        &mut self,
        ops: &[TokenKind],
        operand: fn(&mut Self) -> Result<&'ast Expr<'ast>, Diagnostic>,
    ) -> Result<&'ast Expr<'ast>, Diagnostic> {
        let mut lhs = operand(self)?;

        while self.check_any(ops) {
            let token = self.advance();
            let Some(op) = BinaryOp::from_token(token.kind) else {
                break;
            };
            let rhs = operand(self)?;
            let span = lhs.span().merge(rhs.span());
            lhs = self.arena.alloc(Expr::Binary(self.arena.alloc(BinaryExpr {
                left: lhs,
                op,
                right: rhs,
                span,
            })));
        }

        Ok(lhs)
    }

    /// Cast `(type) expr`, disambiguated from a parenthesized expression
    /// by speculation: the cast reading is accepted only when a type
    /// specifier parses and is immediately followed by `)` and an
    /// operand.
    fn parse_cast(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        if self.check(TokenKind::LeftParen) {
            if let Some(expr) = self.speculate(|p| {
                let start = p.expect(TokenKind::LeftParen)?.span;
                let ty = p.parse_type()?;
                p.expect(TokenKind::RightParen)?;
                let operand = p.parse_cast()?;
                let span = start.merge(operand.span());
                Ok(&*p.arena.alloc(Expr::Cast(p.arena.alloc(CastExpr {
                    ty,
                    expr: operand,
                    span,
                }))))
            }) {
                return Ok(expr);
            }
        }
        self.parse_unary()
    }

    /// Unary prefix operators and the `@`/`&`/`$` identifier prefix
    /// annotations.
    fn parse_unary(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        let token = self.peek();

        if let Some(op) = UnaryOp::from_token(token.kind) {
            self.advance();
            let operand = self.parse_unary()?;
            let span = token.span.merge(operand.span());
            return Ok(self.arena.alloc(Expr::Unary(self.arena.alloc(UnaryExpr {
                op,
                operand,
                span,
            }))));
        }

        if let Some(indirection) = Indirection::from_token(token.kind) {
            if self.peek_nth(1).kind == TokenKind::Identifier {
                self.advance();
                let name = self.advance();
                let span = token.span.merge(name.span);
                let lhs = self.arena.alloc(Expr::Ident(IdentExpr {
                    ident: Ident::new(name.text, name.span),
                    indirection,
                    span,
                }));
                return self.parse_postfix_ops(lhs);
            }
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        let lhs = self.parse_primary()?;
        self.parse_postfix_ops(lhs)
    }

    /// Postfix operator loop: calls, indexing, member access, postfix
    /// cast `expr.(Type)`, and `++`/`--`.
    fn parse_postfix_ops(
        &mut self,
        mut lhs: &'ast Expr<'ast>,
    ) -> Result<&'ast Expr<'ast>, Diagnostic> {
        loop {
            match self.peek().kind {
                TokenKind::LeftParen => {
                    lhs = self.parse_call(lhs)?;
                }
                TokenKind::LeftBracket => {
                    lhs = self.parse_index(lhs)?;
                }
                TokenKind::Dot => {
                    if self.peek_nth(1).kind == TokenKind::LeftParen {
                        lhs = self.parse_post_cast(lhs)?;
                    } else {
                        lhs = self.parse_member(lhs)?;
                    }
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus => {
                    let token = self.advance();
                    let Some(op) = PostfixOp::from_token(token.kind) else {
                        break;
                    };
                    let span = lhs.span().merge(token.span);
                    lhs = self.arena.alloc(Expr::Postfix(self.arena.alloc(PostfixExpr {
                        operand: lhs,
                        op,
                        span,
                    })));
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn parse_call(&mut self, callee: &'ast Expr<'ast>) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.expect(TokenKind::LeftParen)?;

        let mut args = BVec::new_in(self.arena);
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(*self.parse_expr()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        let end = self.expect(TokenKind::RightParen)?.span;

        let span = callee.span().merge(end);
        Ok(self.arena.alloc(Expr::Call(self.arena.alloc(CallExpr {
            callee,
            args: self.arena.alloc_slice_copy(&args),
            span,
        }))))
    }

    fn parse_index(&mut self, object: &'ast Expr<'ast>) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.expect(TokenKind::LeftBracket)?;

        let mut indices = BVec::new_in(self.arena);
        loop {
            indices.push(*self.parse_expr()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let end = self.expect(TokenKind::RightBracket)?.span;

        let span = object.span().merge(end);
        Ok(self.arena.alloc(Expr::Index(self.arena.alloc(IndexExpr {
            object,
            indices: self.arena.alloc_slice_copy(&indices),
            span,
        }))))
    }

    fn parse_member(&mut self, object: &'ast Expr<'ast>) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.expect(TokenKind::Dot)?;
        let name = self.expect(TokenKind::Identifier)?;

        let span = object.span().merge(name.span);
        Ok(self.arena.alloc(Expr::Member(self.arena.alloc(MemberExpr {
            object,
            field: Ident::new(name.text, name.span),
            span,
        }))))
    }

    fn parse_post_cast(&mut self, expr: &'ast Expr<'ast>) -> Result<&'ast Expr<'ast>, Diagnostic> {
        self.expect(TokenKind::Dot)?;
        self.expect(TokenKind::LeftParen)?;
        let ty = self.parse_type()?;
        let end = self.expect(TokenKind::RightParen)?.span;

        let span = expr.span().merge(end);
        Ok(self
            .arena
            .alloc(Expr::PostCast(self.arena.alloc(PostCastExpr { expr, ty, span }))))
    }

    fn parse_primary(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        let token = self.peek();

        match token.kind {
            TokenKind::IntLiteral => {
                self.advance();
                Ok(self.arena.alloc(Expr::Literal(LiteralExpr {
                    kind: LiteralKind::Int(parse_int(token.text)),
                    span: token.span,
                })))
            }

            TokenKind::FloatLiteral => {
                self.advance();
                let value = token.text.parse::<f64>().unwrap_or(0.0);
                Ok(self.arena.alloc(Expr::Literal(LiteralExpr {
                    kind: LiteralKind::Float(value),
                    span: token.span,
                })))
            }

            TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(self.arena.alloc(Expr::Literal(LiteralExpr {
                    kind: LiteralKind::Bool(token.kind == TokenKind::True),
                    span: token.span,
                })))
            }

            TokenKind::StringLiteral => {
                self.advance();
                Ok(self.arena.alloc(Expr::Literal(LiteralExpr {
                    kind: LiteralKind::Str(token.text),
                    span: token.span,
                })))
            }

            TokenKind::CharLiteral => {
                self.advance();
                let value = token.text.chars().next().unwrap_or('\0');
                Ok(self.arena.alloc(Expr::Literal(LiteralExpr {
                    kind: LiteralKind::Char(value),
                    span: token.span,
                })))
            }

            TokenKind::Identifier => {
                self.advance();
                Ok(self.arena.alloc(Expr::Ident(IdentExpr {
                    ident: Ident::new(token.text, token.span),
                    indirection: Indirection::None,
                    span: token.span,
                })))
            }

            TokenKind::LeftParen => {
                let start = self.advance().span;
                let expr = self.parse_expr()?;
                let end = self.expect(TokenKind::RightParen)?.span;
                Ok(self.arena.alloc(Expr::Paren(self.arena.alloc(ParenExpr {
                    expr,
                    span: start.merge(end),
                }))))
            }

            TokenKind::LeftBrace => self.parse_init_list(),

            TokenKind::Eof => Err(Diagnostic::unexpected_eof(token.span)),

            _ => Err(Diagnostic::expected_expression(
                token.span,
                token.kind.description(),
            )),
        }
    }

    fn parse_init_list(&mut self) -> Result<&'ast Expr<'ast>, Diagnostic> {
        let start = self.expect(TokenKind::LeftBrace)?.span;

        let mut elements = BVec::new_in(self.arena);
        if !self.check(TokenKind::RightBrace) {
            loop {
                elements.push(*self.parse_expr()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        let end = self.expect(TokenKind::RightBrace)?.span;

        Ok(self.arena.alloc(Expr::InitList(InitListExpr {
            elements: self.arena.alloc_slice_copy(&elements),
            span: start.merge(end),
        })))
    }
}

/// Decode the lexer's normalized integer text (optional `-` sign,
/// lowercase base prefix, separators already stripped).
pub(crate) fn parse_int(text: &str) -> i64 {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let value = if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
    } else if let Some(bin) = digits.strip_prefix("0b") {
        i64::from_str_radix(bin, 2)
    } else if let Some(oct) = digits.strip_prefix("0o") {
        i64::from_str_radix(oct, 8)
    } else {
        digits.parse()
    }
    .unwrap_or(0);

    if negative { -value } else { value }
}
