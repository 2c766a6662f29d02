//! Type expression AST nodes for Opal.
//!
//! A type specifier is a modifier run, an optional indirection prefix, a
//! base (primitive, named, or parenthesized compound), and an optional
//! angle-bracket suffix carrying either a fixed byte size or generic
//! argument expressions.

use crate::ast::expr::Expr;
use crate::ast::Ident;
use crate::lexer::TokenKind;
use bitflags::bitflags;
use opal_core::Span;
use std::fmt;

bitflags! {
    /// Type and declaration modifier keywords.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// `const`
        const CONST = 1 << 0;
        /// `static`
        const STATIC = 1 << 1;
    }
}

impl Modifiers {
    /// Try to convert a token kind to a modifier flag.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        match token {
            TokenKind::Const => Some(Modifiers::CONST),
            TokenKind::Static => Some(Modifiers::STATIC),
            _ => None,
        }
    }
}

/// Indirection prefix on a type or identifier.
///
/// Pointer (`@`/`@@`), reference (`&`/`&&`), and register (`$`/`$$`)
/// prefixes are mutually exclusive; when several appear the last one
/// parsed wins. Depth is 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Indirection {
    /// No indirection
    #[default]
    None,
    /// Pointer, depth 1 or 2
    Pointer(u8),
    /// Reference, depth 1 or 2
    Reference(u8),
    /// Register storage, depth 1 or 2
    Register(u8),
}

impl Indirection {
    /// Try to convert a prefix token to an indirection.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        Some(match token {
            TokenKind::At => Indirection::Pointer(1),
            TokenKind::AtAt => Indirection::Pointer(2),
            TokenKind::Amp => Indirection::Reference(1),
            TokenKind::AmpAmp => Indirection::Reference(2),
            TokenKind::Dollar => Indirection::Register(1),
            TokenKind::DollarDollar => Indirection::Register(2),
            _ => return None,
        })
    }

    /// Pointer depth, 0 if not a pointer.
    pub fn pointer_depth(self) -> u8 {
        match self {
            Indirection::Pointer(d) => d,
            _ => 0,
        }
    }

    /// Reference depth, 0 if not a reference.
    pub fn reference_depth(self) -> u8 {
        match self {
            Indirection::Reference(d) => d,
            _ => 0,
        }
    }

    /// Whether this is a register prefix.
    pub fn is_register(self) -> bool {
        matches!(self, Indirection::Register(_))
    }
}

/// Built-in primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Void,
    Bool,
    Byte,
    Int,
    Float,
    Str,
}

impl PrimitiveType {
    /// Try to convert a token kind to a primitive type.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        Some(match token {
            TokenKind::Void => PrimitiveType::Void,
            TokenKind::Bool => PrimitiveType::Bool,
            TokenKind::Byte => PrimitiveType::Byte,
            TokenKind::Int => PrimitiveType::Int,
            TokenKind::Float => PrimitiveType::Float,
            TokenKind::Str => PrimitiveType::Str,
            _ => return None,
        })
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PrimitiveType::Void => "void",
            PrimitiveType::Bool => "bool",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Int => "int",
            PrimitiveType::Float => "float",
            PrimitiveType::Str => "str",
        };
        write!(f, "{}", s)
    }
}

/// The base of a type specifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeBase<'ast> {
    /// Built-in type
    Primitive(PrimitiveType),
    /// User-defined type name
    Named(Ident<'ast>),
    /// Parenthesized compound (tuple) type. Outer modifiers and
    /// indirection are already distributed onto every component.
    Compound(&'ast [TypeExpr<'ast>]),
}

/// Angle-bracket suffix of a type specifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeSuffix<'ast> {
    /// Fixed byte size: `Type<N>`, 1..=255
    Size(u8),
    /// Generic argument expressions: `Type<a, b + 1>`
    Args(&'ast [Expr<'ast>]),
}

/// A complete type specifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeExpr<'ast> {
    /// Modifier run (`const`, `static`)
    pub modifiers: Modifiers,
    /// Indirection prefix
    pub indirection: Indirection,
    /// The base type
    pub base: TypeBase<'ast>,
    /// Optional angle suffix
    pub suffix: Option<TypeSuffix<'ast>>,
    /// Source location
    pub span: Span,
}

impl<'ast> TypeExpr<'ast> {
    /// Create a bare primitive type.
    pub fn primitive(prim: PrimitiveType, span: Span) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            indirection: Indirection::None,
            base: TypeBase::Primitive(prim),
            suffix: None,
            span,
        }
    }

    /// Create a bare named type.
    pub fn named(ident: Ident<'ast>) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            indirection: Indirection::None,
            span: ident.span,
            base: TypeBase::Named(ident),
            suffix: None,
        }
    }

    /// Whether the type carries `const`.
    pub fn is_const(&self) -> bool {
        self.modifiers.contains(Modifiers::CONST)
    }

    /// Pointer depth of the indirection prefix.
    pub fn pointer_depth(&self) -> u8 {
        self.indirection.pointer_depth()
    }

    /// Reference depth of the indirection prefix.
    pub fn reference_depth(&self) -> u8 {
        self.indirection.reference_depth()
    }

    /// Fixed byte size from the angle suffix, if present.
    pub fn fixed_size(&self) -> Option<u8> {
        match self.suffix {
            Some(TypeSuffix::Size(n)) => Some(n),
            _ => None,
        }
    }
}
