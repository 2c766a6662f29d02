//! Expression AST nodes for Opal.
//!
//! Provides nodes for all expression types including:
//! - Literals (numbers, strings, booleans, characters)
//! - Binary, unary, and postfix operations
//! - Assignments, including the brace-list multi-assignment form
//! - Casts, both prefix `(Type) x` and postfix `x.(Type)`
//!
//! Nodes are linked by arena references and form a strict tree: no
//! sharing, no cycles, each non-root node has exactly one owner.

use crate::ast::types::TypeExpr;
use crate::ast::{AssignOp, BinaryOp, Ident, Indirection, PostfixOp, UnaryOp};
use opal_core::Span;

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Literal value
    Literal(LiteralExpr<'ast>),
    /// Identifier reference, possibly with an indirection prefix
    Ident(IdentExpr<'ast>),
    /// Binary operation
    Binary(&'ast BinaryExpr<'ast>),
    /// Unary prefix operation
    Unary(&'ast UnaryExpr<'ast>),
    /// Assignment (simple, compound, or brace-list multi-assignment)
    Assign(&'ast AssignExpr<'ast>),
    /// Ternary conditional (? :)
    Ternary(&'ast TernaryExpr<'ast>),
    /// Function call
    Call(&'ast CallExpr<'ast>),
    /// Indexing
    Index(&'ast IndexExpr<'ast>),
    /// Field access (.)
    Member(&'ast MemberExpr<'ast>),
    /// Postfix operation (++ or --)
    Postfix(&'ast PostfixExpr<'ast>),
    /// Prefix cast `(Type) expr`
    Cast(&'ast CastExpr<'ast>),
    /// Postfix cast `expr.(Type)`
    PostCast(&'ast PostCastExpr<'ast>),
    /// Brace-delimited multi-value list
    InitList(InitListExpr<'ast>),
    /// Parenthesized expression
    Paren(&'ast ParenExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Ident(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Unary(e) => e.span,
            Self::Assign(e) => e.span,
            Self::Ternary(e) => e.span,
            Self::Call(e) => e.span,
            Self::Index(e) => e.span,
            Self::Member(e) => e.span,
            Self::Postfix(e) => e.span,
            Self::Cast(e) => e.span,
            Self::PostCast(e) => e.span,
            Self::InitList(e) => e.span,
            Self::Paren(e) => e.span,
        }
    }

    /// Whether this expression is acceptable as a bare statement.
    ///
    /// Identifiers, register references, and calls always qualify (an
    /// expression statement is the only call syntax the language has).
    /// Pure literals, pure arithmetic/bitwise operations, and a bare
    /// multi-value list do not.
    pub fn has_effect(&self) -> bool {
        match self {
            Self::Literal(_) | Self::InitList(_) => false,
            Self::Binary(_) => false,
            Self::Unary(e) => e.op.is_mutating(),
            Self::Paren(e) => e.expr.has_effect(),
            Self::Ternary(e) => e.then_expr.has_effect() || e.else_expr.has_effect(),
            Self::Ident(_)
            | Self::Assign(_)
            | Self::Call(_)
            | Self::Index(_)
            | Self::Member(_)
            | Self::Postfix(_)
            | Self::Cast(_)
            | Self::PostCast(_) => true,
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr<'ast> {
    /// The literal kind
    pub kind: LiteralKind<'ast>,
    /// Source location
    pub span: Span,
}

/// The kind of literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralKind<'ast> {
    /// Integer literal (any base, sign folded in by the lexer)
    Int(i64),
    /// Float literal
    Float(f64),
    /// Boolean literal
    Bool(bool),
    /// String literal, decoded (arena-owned)
    Str(&'ast str),
    /// Character literal, decoded
    Char(char),
}

/// An identifier expression.
///
/// The indirection prefix records `@x`, `@@x`, `&x`, `&&x`, `$x`, `$$x`
/// annotations; register references are identifiers with a register
/// prefix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentExpr<'ast> {
    /// The identifier
    pub ident: Ident<'ast>,
    /// Indirection prefix, `Indirection::None` for a plain identifier
    pub indirection: Indirection,
    /// Source location (covers the prefix)
    pub span: Span,
}

/// A binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    /// Left operand
    pub left: &'ast Expr<'ast>,
    /// Operator
    pub op: BinaryOp,
    /// Right operand
    pub right: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A unary prefix operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    /// Operator
    pub op: UnaryOp,
    /// Operand
    pub operand: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// An assignment expression.
///
/// A brace-list target with the simple `=` form is the multi-assignment
/// `{a, b} = f()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignExpr<'ast> {
    /// Left-hand side (target)
    pub target: &'ast Expr<'ast>,
    /// Assignment operator
    pub op: AssignOp,
    /// Right-hand side (value)
    pub value: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A ternary conditional expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TernaryExpr<'ast> {
    /// Condition
    pub condition: &'ast Expr<'ast>,
    /// Value if the condition is true
    pub then_expr: &'ast Expr<'ast>,
    /// Value if the condition is false
    pub else_expr: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A function call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    /// The callee (any postfix expression)
    pub callee: &'ast Expr<'ast>,
    /// Arguments
    pub args: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}

/// An indexing expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexExpr<'ast> {
    /// The object being indexed
    pub object: &'ast Expr<'ast>,
    /// Index expressions (one per bracket group element)
    pub indices: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}

/// Field access via the dot operator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberExpr<'ast> {
    /// The object
    pub object: &'ast Expr<'ast>,
    /// The field being accessed
    pub field: Ident<'ast>,
    /// Source location
    pub span: Span,
}

/// A postfix increment or decrement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostfixExpr<'ast> {
    /// The operand
    pub operand: &'ast Expr<'ast>,
    /// The operator
    pub op: PostfixOp,
    /// Source location
    pub span: Span,
}

/// A prefix cast `(Type) expr`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastExpr<'ast> {
    /// The target type
    pub ty: TypeExpr<'ast>,
    /// The expression being cast
    pub expr: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

/// A postfix cast `expr.(Type)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostCastExpr<'ast> {
    /// The expression being cast
    pub expr: &'ast Expr<'ast>,
    /// The target type
    pub ty: TypeExpr<'ast>,
    /// Source location
    pub span: Span,
}

/// A brace-delimited multi-value list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitListExpr<'ast> {
    /// Elements
    pub elements: &'ast [Expr<'ast>],
    /// Source location
    pub span: Span,
}

/// A parenthesized expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParenExpr<'ast> {
    /// The inner expression
    pub expr: &'ast Expr<'ast>,
    /// Source location
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;

    fn int(arena: &Bump, value: i64) -> &Expr<'_> {
        arena.alloc(Expr::Literal(LiteralExpr {
            kind: LiteralKind::Int(value),
            span: Span::new(1, 1, 1),
        }))
    }

    fn ident<'a>(arena: &'a Bump, name: &'a str) -> &'a Expr<'a> {
        arena.alloc(Expr::Ident(IdentExpr {
            ident: Ident::new(name, Span::new(1, 1, name.len() as u32)),
            indirection: Indirection::None,
            span: Span::new(1, 1, name.len() as u32),
        }))
    }

    #[test]
    fn expr_span() {
        let lit = Expr::Literal(LiteralExpr {
            kind: LiteralKind::Int(42),
            span: Span::new(3, 5, 2),
        });
        assert_eq!(lit.span(), Span::new(3, 5, 2));
    }

    #[test]
    fn pure_shapes_have_no_effect() {
        let arena = Bump::new();

        assert!(!int(&arena, 1).has_effect());

        let sum = Expr::Binary(arena.alloc(BinaryExpr {
            left: int(&arena, 1),
            op: BinaryOp::Add,
            right: int(&arena, 2),
            span: Span::new(1, 1, 5),
        }));
        assert!(!sum.has_effect());

        let not = Expr::Unary(arena.alloc(UnaryExpr {
            op: UnaryOp::Not,
            operand: ident(&arena, "x"),
            span: Span::new(1, 1, 2),
        }));
        assert!(!not.has_effect());

        let list = Expr::InitList(InitListExpr {
            elements: &[],
            span: Span::new(1, 1, 2),
        });
        assert!(!list.has_effect());
    }

    #[test]
    fn effectful_shapes_are_accepted() {
        let arena = Bump::new();

        assert!(ident(&arena, "x").has_effect());

        let call = Expr::Call(arena.alloc(CallExpr {
            callee: ident(&arena, "step"),
            args: &[],
            span: Span::new(1, 1, 6),
        }));
        assert!(call.has_effect());

        let inc = Expr::Unary(arena.alloc(UnaryExpr {
            op: UnaryOp::PreInc,
            operand: ident(&arena, "i"),
            span: Span::new(1, 1, 3),
        }));
        assert!(inc.has_effect());

        let assign = Expr::Assign(arena.alloc(AssignExpr {
            target: ident(&arena, "x"),
            op: AssignOp::AddAssign,
            value: int(&arena, 1),
            span: Span::new(1, 1, 6),
        }));
        assert!(assign.has_effect());
    }

    #[test]
    fn paren_effect_follows_inner() {
        let arena = Bump::new();

        let pure = Expr::Paren(arena.alloc(ParenExpr {
            expr: int(&arena, 1),
            span: Span::new(1, 1, 3),
        }));
        assert!(!pure.has_effect());

        let effectful = Expr::Paren(arena.alloc(ParenExpr {
            expr: ident(&arena, "x"),
            span: Span::new(1, 1, 3),
        }));
        assert!(effectful.has_effect());
    }

    #[test]
    fn register_reference_is_an_ident_with_prefix() {
        let reg = Expr::Ident(IdentExpr {
            ident: Ident::new("acc", Span::new(1, 2, 3)),
            indirection: Indirection::Register(1),
            span: Span::new(1, 1, 4),
        });
        assert!(reg.has_effect());
        if let Expr::Ident(e) = reg {
            assert!(e.indirection.is_register());
        }
    }
}
