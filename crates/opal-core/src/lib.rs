//! Core types shared across the Opal front end.
//!
//! Provides source spans, the diagnostic sink used by every compiler phase,
//! and the typed lexer errors that feed it.

mod diag;
mod error;
mod span;

pub use diag::{DiagCode, Diagnostic, Diagnostics, Severity};
pub use error::LexError;
pub use span::Span;
