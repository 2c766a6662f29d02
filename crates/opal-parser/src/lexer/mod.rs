//! Lexical analysis for Opal.

mod cursor;
mod lexer;
mod literal;
mod symbols;
mod token;

pub use lexer::{Lexer, MAX_TOKENS};
pub use opal_core::Span;
pub use symbols::lookup_symbol;
pub use token::{Token, TokenKind};
