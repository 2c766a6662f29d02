//! Statement AST nodes for Opal.
//!
//! Opal's statement set is machine-flavored: besides blocks, `if`, and
//! declarations it carries labels, `jump`, `signal`, `push`/`pop`,
//! `free`, `nop`, and `halt`.

use crate::ast::decl::Decl;
use crate::ast::expr::Expr;
use crate::ast::Ident;
use opal_core::Span;

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// Expression statement
    Expr(ExprStmt<'ast>),
    /// Declaration (variable, function, object, struct, class)
    Decl(&'ast Decl<'ast>),
    /// Brace-delimited block
    Block(Block<'ast>),
    /// `if` with optional `else`
    If(&'ast IfStmt<'ast>),
    /// `return` with zero, one, or several values
    Return(ReturnStmt<'ast>),
    /// `free expr;`
    Free(FreeStmt<'ast>),
    /// Label declaration: `.name:`
    Label(LabelStmt<'ast>),
    /// `jump label;`
    Jump(JumpStmt<'ast>),
    /// `signal arg, ...;` (at least one argument)
    Signal(SignalStmt<'ast>),
    /// `push expr;`
    Push(PushStmt<'ast>),
    /// `pop;` or `pop target;`
    Pop(PopStmt<'ast>),
    /// `nop;`
    Nop(Span),
    /// `halt;`
    Halt(Span),
}

impl<'ast> Stmt<'ast> {
    /// Get the span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(s) => s.span,
            Self::Decl(d) => d.span,
            Self::Block(b) => b.span,
            Self::If(s) => s.span,
            Self::Return(s) => s.span,
            Self::Free(s) => s.span,
            Self::Label(s) => s.span,
            Self::Jump(s) => s.span,
            Self::Signal(s) => s.span,
            Self::Push(s) => s.span,
            Self::Pop(s) => s.span,
            Self::Nop(span) | Self::Halt(span) => *span,
        }
    }
}

/// An expression statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    /// The expression
    pub expr: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A brace-delimited statement block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    /// The statements
    pub stmts: &'ast [Stmt<'ast>],
    /// Source location
    pub span: Span,
}

/// An `if` statement. Each arm independently chooses single-statement or
/// block form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    /// Parenthesized condition
    pub condition: &'ast Expr<'ast>,
    /// The then arm
    pub then_branch: &'ast Stmt<'ast>,
    /// The optional else arm
    pub else_branch: Option<&'ast Stmt<'ast>>,
    /// Source location
    pub span: Span,
}

/// A `return` statement.
///
/// `values` is empty for a bare `return;`, and a comma-separated list
/// otherwise. A list of exactly one value is a plain single-value return.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    /// Returned values
    pub values: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}

/// A `free` statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeStmt<'ast> {
    /// The value being released
    pub target: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A label declaration: `.name:`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStmt<'ast> {
    /// Label name
    pub name: Ident<'ast>,
    /// Source location
    pub span: Span,
}

/// A `jump` statement. The target may be written with or without the
/// label dot: `jump top;` and `jump .top;` are equivalent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpStmt<'ast> {
    /// Target label name
    pub label: Ident<'ast>,
    /// Source location
    pub span: Span,
}

/// A `signal` statement. The grammar requires at least one argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalStmt<'ast> {
    /// Signal arguments, never empty
    pub args: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}

/// A `push` statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PushStmt<'ast> {
    /// The pushed value
    pub value: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A `pop` statement with an optional target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopStmt<'ast> {
    /// Where the popped value lands, if anywhere
    pub target: Option<&'ast Expr<'ast>>,
    /// Source location
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expr::{LiteralExpr, LiteralKind};

    #[test]
    fn stmt_span_variants() {
        let span = Span::new(2, 3, 4);
        assert_eq!(Stmt::Nop(span).span(), span);
        assert_eq!(Stmt::Halt(span).span(), span);

        let label = Stmt::Label(LabelStmt {
            name: Ident::new("top", Span::new(2, 4, 3)),
            span,
        });
        assert_eq!(label.span(), span);
    }

    #[test]
    fn return_value_arities() {
        let bare = ReturnStmt {
            values: &[],
            span: Span::new(1, 1, 7),
        };
        assert!(bare.values.is_empty());

        let one = [Expr::Literal(LiteralExpr {
            kind: LiteralKind::Int(1),
            span: Span::new(1, 8, 1),
        })];
        let single = ReturnStmt {
            values: &one,
            span: Span::new(1, 1, 9),
        };
        assert_eq!(single.values.len(), 1);
    }

    #[test]
    fn pop_target_optional() {
        let bare = PopStmt {
            target: None,
            span: Span::new(1, 1, 4),
        };
        assert!(bare.target.is_none());
    }
}
