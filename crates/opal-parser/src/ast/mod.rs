//! Abstract Syntax Tree (AST) for Opal.
//!
//! This module provides:
//! - AST node definitions for all Opal constructs
//! - Parser for transforming tokens into AST
//!
//! # Example
//!
//! ```
//! use opal_parser::Parser;
//! use bumpalo::Bump;
//!
//! let arena = Bump::new();
//! let source = r#"
//!     var total: int = 0;
//!
//!     func step(n: int = 1) {
//!         total += n;
//!     }
//! "#;
//!
//! match Parser::parse(source, &arena) {
//!     Ok(program) => println!("Parsed {} statements", program.stmts().len()),
//!     Err(diagnostics) => eprintln!("Parse errors: {}", diagnostics),
//! }
//! ```

pub mod ops;
pub mod types;

mod parser;
mod type_parser;

pub mod expr;
mod expr_parser;

pub mod stmt;
mod stmt_parser;

pub mod decl;

// Re-export diagnostic types from core
pub use opal_core::{DiagCode, Diagnostic, Diagnostics, Severity};

pub use decl::*;
pub use expr::*;
pub use ops::*;
pub use parser::Parser;
pub use stmt::*;
pub use types::*;

use opal_core::Span;

/// An identifier with its source location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident<'ast> {
    /// The identifier text (arena-owned).
    pub name: &'ast str,
    /// Source location.
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    /// Create a new identifier.
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}

/// A parsed Opal program.
///
/// The program borrows from an arena allocator. All AST nodes are
/// allocated in the arena and remain valid for the lifetime of the
/// arena; the whole tree is reclaimed when the arena is dropped.
#[derive(Debug)]
pub struct Program<'ast> {
    stmts: &'ast [Stmt<'ast>],
    span: Span,
}

impl<'ast> Program<'ast> {
    /// Create a new program from parsed top-level statements.
    pub(crate) fn new(stmts: &'ast [Stmt<'ast>], span: Span) -> Self {
        Self { stmts, span }
    }

    /// Get the top-level statements of this program.
    pub fn stmts(&self) -> &[Stmt<'ast>] {
        self.stmts
    }

    /// Get the source location span of this program.
    pub fn span(&self) -> Span {
        self.span
    }
}
