//! Statement and declaration parsing for Opal.
//!
//! Statements dispatch on their leading token. Declarations share one
//! unified shape for variables, functions, objects, structs and
//! classes; a parameter list is what makes a declaration a function.

use super::parser::Parser;
use crate::ast::Ident;
use crate::ast::decl::{Decl, DeclBody, DeclKeyword, Param};
use crate::ast::expr::Expr;
use crate::ast::stmt::*;
use crate::ast::types::Modifiers;
use crate::lexer::TokenKind;
use bumpalo::collections::Vec as BVec;
use opal_core::{DiagCode, Diagnostic, Span};

impl<'ast> Parser<'ast> {
    /// Parse one statement, dispatching on the leading token.
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        match self.peek().kind {
            TokenKind::If => self.parse_if(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Free => self.parse_free(),
            TokenKind::Dot => self.parse_label(),
            TokenKind::Jump => self.parse_jump(),
            TokenKind::Signal => self.parse_signal(),
            TokenKind::Push => self.parse_push(),
            TokenKind::Pop => self.parse_pop(),
            TokenKind::Nop => {
                let kw = self.advance();
                let end = self.expect_semicolon();
                Ok(Stmt::Nop(kw.span.merge(end)))
            }
            TokenKind::Halt => {
                let kw = self.advance();
                let end = self.expect_semicolon();
                Ok(Stmt::Halt(kw.span.merge(end)))
            }
            TokenKind::LeftBrace => self.parse_block_or_multi_assign(),
            kind if kind.starts_declaration() => self.parse_decl(),
            _ => self.parse_expr_stmt(),
        }
    }

    /// Consume the terminating `;`. When it is missing, report one
    /// diagnostic and scan forward to the next `;` or block end so the
    /// already-built statement survives.
    fn expect_semicolon(&mut self) -> Span {
        if let Some(token) = self.eat(TokenKind::Semicolon) {
            return token.span;
        }

        let token = self.peek();
        self.diagnostics.push(Diagnostic::new(
            DiagCode::MissingSemicolon,
            token.span,
            format!("expected ';' but found {}", token.kind.description()),
        ));

        while !self.is_eof()
            && !self.check(TokenKind::Semicolon)
            && !self.check(TokenKind::RightBrace)
        {
            self.advance();
        }
        if let Some(token) = self.eat(TokenKind::Semicolon) {
            return token.span;
        }
        self.previous_span()
    }

    /// A leading `{` opens either a block or the target list of a
    /// multi-assignment (`{a, b} = pair();`). Try the assignment reading
    /// first. A value list that never meets an `=` is reported as a
    /// discarded expression, not re-read as a block; anything else is a
    /// block.
    fn parse_block_or_multi_assign(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let leading = self.speculate(|p| {
            let expr = p.parse_expr()?;
            match expr {
                Expr::Assign(_) | Expr::InitList(_) => Ok(expr),
                _ => Err(Diagnostic::new(
                    DiagCode::InvalidStatement,
                    expr.span(),
                    "not a multi-assignment",
                )),
            }
        });
        if let Some(expr) = leading {
            if !expr.has_effect() {
                return Err(no_effect_diagnostic(expr));
            }
            let end = self.expect_semicolon();
            return Ok(Stmt::Expr(ExprStmt {
                expr,
                span: expr.span().merge(end),
            }));
        }
        Ok(Stmt::Block(self.parse_block()?))
    }

    /// Parse a braced block, recovering inside it so one bad statement
    /// does not abandon the rest of the block.
    pub(crate) fn parse_block(&mut self) -> Result<Block<'ast>, Diagnostic> {
        let start = self.expect(TokenKind::LeftBrace)?.span;

        let mut stmts = BVec::new_in(self.arena);
        while !self.check(TokenKind::RightBrace) && !self.is_eof() {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(diag) => {
                    self.diagnostics.push(diag);
                    self.advance();
                }
            }
        }
        let end = self.expect(TokenKind::RightBrace)?.span;

        Ok(Block {
            stmts: self.arena.alloc_slice_copy(&stmts),
            span: start.merge(end),
        })
    }

    fn parse_if(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.advance().span;
        self.expect(TokenKind::LeftParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RightParen)?;

        let then_stmt = self.parse_statement()?;
        let then_branch = &*self.arena.alloc(then_stmt);

        let (else_branch, end) = if self.eat(TokenKind::Else).is_some() {
            let else_stmt = self.parse_statement()?;
            let else_branch = &*self.arena.alloc(else_stmt);
            (Some(else_branch), else_branch.span())
        } else {
            (None, then_branch.span())
        };

        Ok(Stmt::If(self.arena.alloc(IfStmt {
            condition,
            then_branch,
            else_branch,
            span: start.merge(end),
        })))
    }

    /// `return;`, `return expr;`, or `return a, b, c;`.
    fn parse_return(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.advance().span;

        let mut values = BVec::new_in(self.arena);
        if !self.check(TokenKind::Semicolon) && !self.is_eof() {
            loop {
                values.push(*self.parse_expr()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        let end = self.expect_semicolon();

        Ok(Stmt::Return(ReturnStmt {
            values: self.arena.alloc_slice_copy(&values),
            span: start.merge(end),
        }))
    }

    fn parse_free(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.advance().span;
        let target = self.parse_expr()?;
        let end = self.expect_semicolon();
        Ok(Stmt::Free(FreeStmt {
            target,
            span: start.merge(end),
        }))
    }

    /// `.name:` marks a jump target. No terminating semicolon.
    fn parse_label(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.expect(TokenKind::Dot)?.span;
        let name = self.expect(TokenKind::Identifier)?;
        let end = self.expect(TokenKind::Colon)?.span;
        Ok(Stmt::Label(LabelStmt {
            name: Ident::new(name.text, name.span),
            span: start.merge(end),
        }))
    }

    /// `jump name;` or `jump .name;`. The leading dot is optional and
    /// names the same label either way.
    fn parse_jump(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.advance().span;
        self.eat(TokenKind::Dot);
        let name = self.expect(TokenKind::Identifier)?;
        let end = self.expect_semicolon();
        Ok(Stmt::Jump(JumpStmt {
            label: Ident::new(name.text, name.span),
            span: start.merge(end),
        }))
    }

    fn parse_signal(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.advance().span;

        if self.check(TokenKind::Semicolon) || self.is_eof() {
            return Err(Diagnostic::new(
                DiagCode::InvalidStatement,
                self.peek().span,
                "'signal' requires at least one argument",
            ));
        }

        let mut args = BVec::new_in(self.arena);
        loop {
            args.push(*self.parse_expr()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        let end = self.expect_semicolon();

        Ok(Stmt::Signal(SignalStmt {
            args: self.arena.alloc_slice_copy(&args),
            span: start.merge(end),
        }))
    }

    fn parse_push(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.advance().span;
        let value = self.parse_expr()?;
        let end = self.expect_semicolon();
        Ok(Stmt::Push(PushStmt {
            value,
            span: start.merge(end),
        }))
    }

    /// `pop;` discards the top of the stack, `pop target;` stores it.
    fn parse_pop(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.advance().span;
        let target = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let end = self.expect_semicolon();
        Ok(Stmt::Pop(PopStmt {
            target,
            span: start.merge(end),
        }))
    }

    fn parse_expr_stmt(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let expr = self.parse_expr()?;

        if !expr.has_effect() {
            return Err(no_effect_diagnostic(expr));
        }

        let end = self.expect_semicolon();
        Ok(Stmt::Expr(ExprStmt {
            expr,
            span: expr.span().merge(end),
        }))
    }

    /// Parse a declaration. The introducer keyword defaults to `var`
    /// when only bare modifiers are present (`const x: int = 1;`).
    fn parse_decl(&mut self) -> Result<Stmt<'ast>, Diagnostic> {
        let start = self.peek().span;
        let modifiers = self.parse_decl_modifiers();

        let keyword = match DeclKeyword::from_token(self.peek().kind) {
            Some(keyword) => {
                self.advance();
                keyword
            }
            None => DeclKeyword::Var,
        };

        let name_token = self.expect(TokenKind::Identifier)?;
        let name = Ident::new(name_token.text, name_token.span);

        let dims = self.parse_dims()?;

        let params = if self.check(TokenKind::LeftParen) {
            Some(self.parse_params()?)
        } else {
            None
        };

        let ty = if self.eat(TokenKind::Colon).is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };

        let init = if self.eat(TokenKind::Equal).is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };

        let (body, end) = if self.eat(TokenKind::Arrow).is_some() {
            let stmt = self.parse_statement()?;
            let stmt = &*self.arena.alloc(stmt);
            (Some(DeclBody::Arrow(stmt)), stmt.span())
        } else if self.check(TokenKind::LeftBrace) {
            let block = self.parse_block()?;
            let span = block.span;
            (Some(DeclBody::Block(block)), span)
        } else {
            (None, self.expect_semicolon())
        };

        // A function may omit its return type only when every parameter
        // carries a default value, or the declaration itself does.
        if let Some(params) = params
            && ty.is_none()
            && init.is_none()
            && !params.iter().all(|p| p.default.is_some())
        {
            self.diagnostics.push(Diagnostic::new(
                DiagCode::InvalidDeclaration,
                name.span,
                format!(
                    "function '{}' needs a return type unless every parameter has a default",
                    name.name
                ),
            ));
        }

        Ok(Stmt::Decl(self.arena.alloc(Decl {
            keyword,
            modifiers,
            name,
            dims,
            params,
            ty,
            init,
            body,
            span: start.merge(end),
        })))
    }

    fn parse_param(&mut self) -> Result<Param<'ast>, Diagnostic> {
        let start = self.peek().span;
        let modifiers = self.parse_decl_modifiers();

        let name_token = self.expect(TokenKind::Identifier)?;
        let name = Ident::new(name_token.text, name_token.span);

        let dims = self.parse_dims()?;

        let ty = if self.eat(TokenKind::Colon).is_some() {
            Some(self.parse_type()?)
        } else {
            None
        };

        let default = if self.eat(TokenKind::Equal).is_some() {
            Some(self.parse_expr()?)
        } else {
            None
        };

        Ok(Param {
            modifiers,
            name,
            dims,
            ty,
            default,
            span: start.merge(self.previous_span()),
        })
    }

    fn parse_params(&mut self) -> Result<&'ast [Param<'ast>], Diagnostic> {
        self.expect(TokenKind::LeftParen)?;

        let mut params = BVec::new_in(self.arena);
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.parse_param()?);
                if self.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen)?;

        Ok(self.arena.alloc_slice_copy(&params))
    }

    fn parse_dims(&mut self) -> Result<&'ast [Expr<'ast>], Diagnostic> {
        let mut dims = BVec::new_in(self.arena);
        while self.eat(TokenKind::LeftBracket).is_some() {
            dims.push(*self.parse_expr()?);
            self.expect(TokenKind::RightBracket)?;
        }
        Ok(self.arena.alloc_slice_copy(&dims))
    }

    fn parse_decl_modifiers(&mut self) -> Modifiers {
        let mut modifiers = Modifiers::empty();
        while let Some(m) = Modifiers::from_token(self.peek().kind) {
            self.advance();
            modifiers |= m;
        }
        modifiers
    }
}

/// Diagnostic for an expression statement whose result is discarded.
fn no_effect_diagnostic(expr: &Expr<'_>) -> Diagnostic {
    let message = match expr {
        Expr::Literal(_) => "a literal has no effect as a statement",
        Expr::InitList(_) => "a value list has no effect as a statement",
        Expr::Binary(_) => "the result of this operation is discarded",
        _ => "this expression has no effect",
    };
    Diagnostic::new(DiagCode::InvalidStatement, expr.span(), message)
}
