//! Typed lexer errors.
//!
//! The lexer records these as it scans and the parser converts them into
//! [`Diagnostic`]s for the sink. Keeping them typed makes the lexer
//! testable without going through diagnostic rendering.

use thiserror::Error;

use crate::{DiagCode, Diagnostic, Span};

/// Errors that occur during lexical analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// A byte that cannot start any token.
    #[error("unexpected character '{ch}' at {span}")]
    UnexpectedChar { ch: char, span: Span },

    /// A string literal was never closed.
    #[error("unterminated string at {span}")]
    UnterminatedString { span: Span },

    /// A character literal is empty, unterminated, or holds more than one
    /// character.
    #[error("invalid character literal at {span}: {detail}")]
    InvalidCharLiteral { span: Span, detail: String },

    /// A block comment was never closed.
    #[error("unterminated comment at {span}")]
    UnterminatedComment { span: Span },

    /// A numeric literal could not be scanned.
    #[error("invalid number at {span}: {detail}")]
    InvalidNumber { span: Span, detail: String },

    /// An unknown escape sequence in a quoted literal.
    #[error("invalid escape sequence '\\{ch}' at {span}")]
    InvalidEscape { ch: char, span: Span },

    /// The token buffer reached its 16-bit capacity ceiling.
    #[error("token limit of {limit} reached at {span}")]
    TooManyTokens { limit: usize, span: Span },

    /// The token buffer could not grow.
    #[error("out of memory growing token buffer at {span}")]
    OutOfMemory { span: Span },
}

impl LexError {
    /// Get the span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedString { span } => *span,
            LexError::InvalidCharLiteral { span, .. } => *span,
            LexError::UnterminatedComment { span } => *span,
            LexError::InvalidNumber { span, .. } => *span,
            LexError::InvalidEscape { span, .. } => *span,
            LexError::TooManyTokens { span, .. } => *span,
            LexError::OutOfMemory { span } => *span,
        }
    }

    /// The diagnostic code this error reports under.
    pub fn code(&self) -> DiagCode {
        match self {
            LexError::UnexpectedChar { .. } => DiagCode::UnexpectedCharacter,
            LexError::UnterminatedString { .. } => DiagCode::UnterminatedString,
            LexError::InvalidCharLiteral { .. } => DiagCode::InvalidCharLiteral,
            LexError::UnterminatedComment { .. } => DiagCode::UnterminatedComment,
            LexError::InvalidNumber { .. } => DiagCode::InvalidNumber,
            LexError::InvalidEscape { .. } => DiagCode::InvalidEscape,
            LexError::TooManyTokens { .. } => DiagCode::TooManyTokens,
            LexError::OutOfMemory { .. } => DiagCode::OutOfMemory,
        }
    }
}

impl From<LexError> for Diagnostic {
    fn from(err: LexError) -> Self {
        Diagnostic::new(err.code(), err.span(), err.to_string())
    }
}
