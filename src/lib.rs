//! Opal front end: lexer, parser, and arena-allocated AST.
//!
//! This crate is the public facade over the workspace. The heavy lifting
//! lives in two member crates:
//! - [`opal_core`]: source spans, diagnostic codes, and the diagnostic sink
//! - [`opal_parser`]: the lexer, AST, and recursive-descent parser
//!
//! # Quick start
//!
//! ```
//! use opal::{Bump, Parser};
//!
//! let arena = Bump::new();
//! let source = r#"
//!     var total: int = 0;
//!
//!     func step(n: int = 1) {
//!         total += n;
//!     }
//!
//!     func run(count: int): int {
//!         .loop:
//!         if (count == 0) {
//!             return total;
//!         }
//!         step();
//!         count--;
//!         jump loop;
//!     }
//! "#;
//!
//! let program = Parser::parse(source, &arena).unwrap();
//! assert_eq!(program.stmts().len(), 3);
//! ```
//!
//! Errors never panic the parser. Strict callers use [`Parser::parse`],
//! which fails if any diagnostic was produced; tooling that wants a best
//! effort tree alongside the errors uses [`Parser::parse_lenient`]:
//!
//! ```
//! use opal::{Bump, Parser};
//!
//! let arena = Bump::new();
//! let (program, diagnostics) = Parser::parse_lenient("var x: int = ;\nnop;", &arena);
//! assert!(!diagnostics.is_empty());
//! assert!(!program.stmts().is_empty());
//! ```

pub use bumpalo::Bump;

pub use opal_core::{DiagCode, Diagnostic, Diagnostics, LexError, Severity, Span};
pub use opal_parser::ast;
pub use opal_parser::lexer;
pub use opal_parser::{Lexer, Parser, Token, TokenKind};
