//! The diagnostic sink.
//!
//! Every phase of the front end reports problems through [`Diagnostic`]
//! values collected in a [`Diagnostics`] sink. A diagnostic carries a
//! severity, a stable 16-bit code, a source span, and a message; the
//! context tag for everything produced by this front end is `"syntax"`.

use num_enum::{IntoPrimitive, TryFromPrimitive};
use thiserror::Error;

use crate::Span;

/// How serious a diagnostic is.
///
/// `Fatal` means the producing phase gave up (for example the token buffer
/// hit its capacity ceiling). It is still reported through the sink like
/// any other diagnostic; it never aborts the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Suspicious but accepted input.
    Warning,
    /// Invalid input; the phase recovers and continues.
    Error,
    /// The phase cannot continue past this point.
    Fatal,
}

impl Severity {
    /// Human-readable name, as it appears in rendered diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stable numeric codes for everything the front end can report.
///
/// The codes are part of the tool-facing contract and are carried as
/// `u16` values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum DiagCode {
    /// A token appeared where it is not allowed.
    UnexpectedToken = 1,
    /// Input ended in the middle of a construct.
    UnexpectedEof = 2,
    /// An expression was expected.
    ExpectedExpression = 3,
    /// An identifier was expected.
    ExpectedIdentifier = 4,
    /// A type was expected.
    ExpectedType = 5,
    /// A statement was expected.
    ExpectedStatement = 6,
    /// The statement is not valid in this form.
    InvalidStatement = 7,
    /// The expression is not valid in this form.
    InvalidExpression = 8,
    /// The declaration is not valid in this form.
    InvalidDeclaration = 9,
    /// A terminating semicolon is missing.
    MissingSemicolon = 10,
    /// A byte that cannot start any token.
    UnexpectedCharacter = 11,
    /// A malformed numeric literal.
    InvalidNumber = 12,
    /// An unknown escape sequence in a quoted literal.
    InvalidEscape = 13,
    /// A string literal was never closed.
    UnterminatedString = 14,
    /// A character literal was never closed or holds more than one character.
    InvalidCharLiteral = 15,
    /// A block comment was never closed.
    UnterminatedComment = 16,
    /// The token buffer reached its 16-bit capacity ceiling.
    TooManyTokens = 17,
    /// A buffer could not grow.
    OutOfMemory = 18,
}

impl DiagCode {
    /// The severity this code is reported at.
    pub fn severity(self) -> Severity {
        match self {
            DiagCode::TooManyTokens | DiagCode::OutOfMemory => Severity::Fatal,
            _ => Severity::Error,
        }
    }

    /// Human-readable name for this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagCode::UnexpectedToken => "unexpected token",
            DiagCode::UnexpectedEof => "unexpected end of input",
            DiagCode::ExpectedExpression => "expected expression",
            DiagCode::ExpectedIdentifier => "expected identifier",
            DiagCode::ExpectedType => "expected type",
            DiagCode::ExpectedStatement => "expected statement",
            DiagCode::InvalidStatement => "invalid statement",
            DiagCode::InvalidExpression => "invalid expression",
            DiagCode::InvalidDeclaration => "invalid declaration",
            DiagCode::MissingSemicolon => "missing semicolon",
            DiagCode::UnexpectedCharacter => "unexpected character",
            DiagCode::InvalidNumber => "invalid number",
            DiagCode::InvalidEscape => "invalid escape sequence",
            DiagCode::UnterminatedString => "unterminated string",
            DiagCode::InvalidCharLiteral => "invalid character literal",
            DiagCode::UnterminatedComment => "unterminated comment",
            DiagCode::TooManyTokens => "too many tokens",
            DiagCode::OutOfMemory => "out of memory",
        }
    }
}

impl std::fmt::Display for DiagCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single report with location and context.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{severity}[{}]: {code} at {span}: {message}", u16::from(*.code))]
pub struct Diagnostic {
    /// How serious this report is.
    pub severity: Severity,
    /// The stable code.
    pub code: DiagCode,
    /// Where in the source it applies.
    pub span: Span,
    /// A detailed message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic at the code's default severity.
    pub fn new(code: DiagCode, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            span,
            message: message.into(),
        }
    }

    /// Create a warning-level diagnostic.
    pub fn warning(code: DiagCode, span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            span,
            message: message.into(),
        }
    }

    /// The context tag for this diagnostic. Everything the front end
    /// produces belongs to the `"syntax"` context.
    pub fn context(&self) -> &'static str {
        "syntax"
    }

    /// Create an "expected X, found Y" report.
    pub fn expected_token(span: Span, expected: &str, found: &str) -> Self {
        Self::new(
            DiagCode::UnexpectedToken,
            span,
            format!("expected {expected}, found {found}"),
        )
    }

    /// Create an "unexpected token" report.
    pub fn unexpected_token(span: Span, found: &str) -> Self {
        Self::new(
            DiagCode::UnexpectedToken,
            span,
            format!("unexpected token: {found}"),
        )
    }

    /// Create an "unexpected end of input" report.
    pub fn unexpected_eof(span: Span) -> Self {
        Self::new(DiagCode::UnexpectedEof, span, "unexpected end of input")
    }

    /// Create an "expected identifier" report.
    pub fn expected_identifier(span: Span, found: &str) -> Self {
        Self::new(
            DiagCode::ExpectedIdentifier,
            span,
            format!("expected identifier, found {found}"),
        )
    }

    /// Create an "expected expression" report.
    pub fn expected_expression(span: Span, found: &str) -> Self {
        Self::new(
            DiagCode::ExpectedExpression,
            span,
            format!("expected expression, found {found}"),
        )
    }

    /// Create an "expected type" report.
    pub fn expected_type(span: Span, found: &str) -> Self {
        Self::new(
            DiagCode::ExpectedType,
            span,
            format!("expected type, found {found}"),
        )
    }

    /// Render the diagnostic with the offending source line and a caret.
    pub fn display_with_source(&self, source: &str) -> String {
        let mut output = String::new();

        let line = self.span.line;
        let column = self.span.col;

        output.push_str(&format!(
            "{} at {}:{}: {}\n",
            self.severity, line, column, self.code
        ));

        if !self.message.is_empty() {
            output.push_str(&format!("  {}\n", self.message));
        }

        if let Some(line_text) = Self::get_line(source, line) {
            output.push_str("  |\n");
            output.push_str(&format!("{:>3} | {}\n", line, line_text));

            let indent = " ".repeat(column.saturating_sub(1) as usize);
            let pointer = if self.span.len <= 1 {
                "^".to_string()
            } else {
                "^".to_string() + &"~".repeat((self.span.len - 1) as usize)
            };
            output.push_str(&format!("  | {}{}\n", indent, pointer));
        }

        output
    }

    /// Get the text of a specific line (1-indexed).
    fn get_line(source: &str, line_num: u32) -> Option<String> {
        source
            .lines()
            .nth(line_num as usize - 1)
            .map(|s| s.to_string())
    }
}

/// A collection of diagnostics.
///
/// Phases keep reporting after the first problem, so a run usually ends
/// with zero or more diagnostics rather than a single error.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diag: Diagnostic) {
        self.items.push(diag);
    }

    /// Whether the sink is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of diagnostics, warnings included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of diagnostics at `Error` severity or above.
    pub fn error_count(&self) -> usize {
        self.items
            .iter()
            .filter(|d| d.severity >= Severity::Error)
            .count()
    }

    /// Whether any diagnostic is fatal.
    pub fn has_fatal(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Fatal)
    }

    /// Iterate over the diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Consume the sink and return the diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diag: Diagnostic) -> Self {
        Self { items: vec![diag] }
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl std::fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, diag) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diag}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrips_through_u16() {
        let raw: u16 = DiagCode::MissingSemicolon.into();
        assert_eq!(raw, 10);
        assert_eq!(DiagCode::try_from(raw).unwrap(), DiagCode::MissingSemicolon);

        assert!(DiagCode::try_from(999u16).is_err());
    }

    #[test]
    fn default_severity_follows_code() {
        let diag = Diagnostic::new(DiagCode::InvalidNumber, Span::new(1, 1, 3), "bad digits");
        assert_eq!(diag.severity, Severity::Error);

        let diag = Diagnostic::new(DiagCode::TooManyTokens, Span::point(1, 1), "capacity");
        assert_eq!(diag.severity, Severity::Fatal);
    }

    #[test]
    fn context_is_syntax() {
        let diag = Diagnostic::new(DiagCode::UnexpectedToken, Span::point(1, 1), "");
        assert_eq!(diag.context(), "syntax");
    }

    #[test]
    fn diagnostic_display_carries_code() {
        let diag = Diagnostic::new(
            DiagCode::MissingSemicolon,
            Span::new(2, 9, 1),
            "expected ';' after expression",
        );
        let text = format!("{diag}");
        assert!(text.contains("error[10]"));
        assert!(text.contains("2:9"));
        assert!(text.contains("missing semicolon"));
    }

    #[test]
    fn display_with_source_points_at_column() {
        let source = "push 1 2;";
        let diag = Diagnostic::new(DiagCode::UnexpectedToken, Span::new(1, 8, 1), "expected ';'");
        let rendered = diag.display_with_source(source);
        assert!(rendered.contains("push 1 2;"));
        assert!(rendered.contains("1:8"));
        assert!(rendered.contains('^'));
    }

    #[test]
    fn display_with_source_multibyte_span() {
        let source = "signal;";
        let diag = Diagnostic::new(DiagCode::InvalidStatement, Span::new(1, 1, 6), "");
        let rendered = diag.display_with_source(source);
        assert!(rendered.contains("^~~~~~"));
    }

    #[test]
    fn sink_counts() {
        let mut sink = Diagnostics::new();
        assert!(sink.is_empty());

        sink.push(Diagnostic::warning(
            DiagCode::UnexpectedToken,
            Span::point(1, 1),
            "odd",
        ));
        sink.push(Diagnostic::new(
            DiagCode::InvalidNumber,
            Span::point(1, 4),
            "bad",
        ));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.error_count(), 1);
        assert!(!sink.has_fatal());

        sink.push(Diagnostic::new(
            DiagCode::OutOfMemory,
            Span::point(1, 9),
            "token buffer",
        ));
        assert!(sink.has_fatal());
    }

    #[test]
    fn sink_display_joins_lines() {
        let mut sink = Diagnostics::new();
        sink.push(Diagnostic::new(DiagCode::UnexpectedToken, Span::point(1, 1), "a"));
        sink.push(Diagnostic::new(DiagCode::UnexpectedToken, Span::point(2, 1), "b"));
        let text = format!("{sink}");
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }
}
