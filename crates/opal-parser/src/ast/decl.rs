//! Declaration AST nodes for Opal.
//!
//! All declaration forms share one syntactic shape: modifier run, an
//! introducer keyword, a name, optional bracket dimensions, an optional
//! parameter list (whose presence makes the declaration a function),
//! optional `: type`, optional `= default`, and an optional body.

use crate::ast::expr::Expr;
use crate::ast::stmt::{Block, Stmt};
use crate::ast::types::{Modifiers, TypeExpr};
use crate::ast::Ident;
use crate::lexer::TokenKind;
use opal_core::Span;
use std::fmt;

/// The keyword that introduced a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKeyword {
    /// `var`
    Var,
    /// `func`
    Func,
    /// `object`
    Object,
    /// `struct`
    Struct,
    /// `class`
    Class,
}

impl DeclKeyword {
    /// Try to convert a token kind to a declaration introducer.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        Some(match token {
            TokenKind::Var => DeclKeyword::Var,
            TokenKind::Func => DeclKeyword::Func,
            TokenKind::Object => DeclKeyword::Object,
            TokenKind::Struct => DeclKeyword::Struct,
            TokenKind::Class => DeclKeyword::Class,
            _ => return None,
        })
    }
}

impl fmt::Display for DeclKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeclKeyword::Var => "var",
            DeclKeyword::Func => "func",
            DeclKeyword::Object => "object",
            DeclKeyword::Struct => "struct",
            DeclKeyword::Class => "class",
        };
        write!(f, "{}", s)
    }
}

/// The body of a declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeclBody<'ast> {
    /// `=> stmt`
    Arrow(&'ast Stmt<'ast>),
    /// `{ stmts }`
    Block(Block<'ast>),
}

/// A declaration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decl<'ast> {
    /// The introducer keyword
    pub keyword: DeclKeyword,
    /// Modifier run preceding the introducer
    pub modifiers: Modifiers,
    /// Declared name
    pub name: Ident<'ast>,
    /// Bracket dimension expressions, empty if none
    pub dims: &'ast [Expr<'ast>],
    /// Parameter list; presence makes this a function
    pub params: Option<&'ast [Param<'ast>]>,
    /// `: type` annotation
    pub ty: Option<TypeExpr<'ast>>,
    /// `= default` expression
    pub init: Option<&'ast Expr<'ast>>,
    /// Body, if any
    pub body: Option<DeclBody<'ast>>,
    /// Source location
    pub span: Span,
}

impl<'ast> Decl<'ast> {
    /// Whether this declaration is a function (it carried a parameter
    /// list, even an empty one).
    pub fn is_function(&self) -> bool {
        self.params.is_some()
    }
}

/// A declaration parameter. Same grammar as a declaration minus the
/// introducer and body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Param<'ast> {
    /// Modifier run
    pub modifiers: Modifiers,
    /// Parameter name
    pub name: Ident<'ast>,
    /// Bracket dimension expressions, empty if none
    pub dims: &'ast [Expr<'ast>],
    /// `: type` annotation
    pub ty: Option<TypeExpr<'ast>>,
    /// `= default` expression
    pub default: Option<&'ast Expr<'ast>>,
    /// Source location
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decl_keyword_from_token() {
        assert_eq!(DeclKeyword::from_token(TokenKind::Var), Some(DeclKeyword::Var));
        assert_eq!(DeclKeyword::from_token(TokenKind::Func), Some(DeclKeyword::Func));
        assert_eq!(DeclKeyword::from_token(TokenKind::Class), Some(DeclKeyword::Class));
        // Modifiers are not introducers.
        assert_eq!(DeclKeyword::from_token(TokenKind::Const), None);
    }

    #[test]
    fn params_presence_makes_a_function() {
        let var = Decl {
            keyword: DeclKeyword::Var,
            modifiers: Modifiers::empty(),
            name: Ident::new("x", Span::new(1, 5, 1)),
            dims: &[],
            params: None,
            ty: None,
            init: None,
            body: None,
            span: Span::new(1, 1, 6),
        };
        assert!(!var.is_function());

        let func = Decl {
            params: Some(&[]),
            ..var
        };
        assert!(func.is_function());
    }
}
