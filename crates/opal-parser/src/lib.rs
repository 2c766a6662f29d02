//! Lexer and parser for Opal source code.
//!
//! This crate turns one preprocessed, directive-free source buffer into an
//! arena-allocated abstract syntax tree:
//! - Lexical analysis (tokenization with greedy operator matching)
//! - AST definitions for expressions, statements, declarations, and types
//! - A recursive-descent parser with panic-mode recovery
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
//!     func step(n: int = 1) {
//!         total += n;
//!     }
//! "#;
//!
//! match Parser::parse(source, &arena) {
//!     Ok(program) => println!("parsed {} statements", program.stmts().len()),
//!     Err(diags) => eprintln!("{}", diags),
//! }
//! ```

pub mod ast;
pub mod lexer;

pub use ast::Parser;
pub use lexer::{Lexer, Span, Token, TokenKind};
