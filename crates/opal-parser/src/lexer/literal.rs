//! The literal scanner.
//!
//! Scans numeric, string, and character literals off a [`Cursor`] and
//! produces their decoded text. Numeric failures are reported exactly once
//! and leave no partial consumption: the lexer rewinds the cursor to the
//! literal's start before resuming. Quoted-literal failures keep whatever
//! was consumed so the lexer does not re-scan string content as code.

use opal_core::{LexError, Span};

use super::cursor::Cursor;

/// A successfully scanned numeric literal with its normalized text.
///
/// Digit separators are stripped and fraction digit groups are folded into
/// the fraction, so `1_000` comes out as `1000` and `2.5(25)` as `2.525`.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum ScannedNumber {
    Int(String),
    Float(String),
}

/// A successfully scanned quoted literal with its decoded value.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum ScannedQuote {
    Str(String),
    Char(char),
}

/// Whether the cursor sits at the start of a numeric literal.
///
/// Covers a leading digit, a fraction starting with `.` (followed by a
/// digit or a `(` digit group), and a sign glued to a digit. A `.` with
/// no digit in reach stays a `Dot` token, so `x.(int)` is a postfix cast
/// and not a malformed number.
pub(super) fn at_number_start(cursor: &Cursor<'_>) -> bool {
    match cursor.peek() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => at_fraction(cursor),
        Some('+' | '-') => matches!(cursor.peek_nth(1), Some(c) if c.is_ascii_digit()),
        _ => false,
    }
}

/// Whether the cursor sits on a `.` that opens a fraction: the dot must
/// be followed by a digit, or by a `(` digit group that opens with a
/// digit.
fn at_fraction(cursor: &Cursor<'_>) -> bool {
    if cursor.peek() != Some('.') {
        return false;
    }
    match cursor.peek_nth(1) {
        Some(c) if c.is_ascii_digit() => true,
        Some('(') => matches!(cursor.peek_nth(2), Some(c) if c.is_ascii_digit()),
        _ => false,
    }
}

/// Scan a numeric literal.
///
/// On failure the cursor is left wherever scanning stopped; the caller is
/// expected to rewind to the literal's start.
pub(super) fn scan_number(cursor: &mut Cursor<'_>) -> Result<ScannedNumber, LexError> {
    let start_line = cursor.line();
    let start_col = cursor.column();
    let start = cursor.offset();

    let fail = |cursor: &Cursor<'_>, detail: &str| LexError::InvalidNumber {
        span: Span::new(start_line, start_col, (cursor.offset() - start).max(1)),
        detail: detail.to_string(),
    };

    let mut text = String::new();

    // Sign glued to the first digit. A plus adds nothing to the value text.
    match cursor.peek() {
        Some('-') => {
            cursor.advance();
            text.push('-');
        }
        Some('+') => {
            cursor.advance();
        }
        _ => {}
    }

    // Base prefix. Only integers may carry one.
    let mut base = 10u32;
    if cursor.peek() == Some('0') {
        base = match cursor.peek_nth(1) {
            Some('b' | 'B') => 2,
            Some('o' | 'O') => 8,
            Some('x' | 'X') => 16,
            _ => 10,
        };
        if base != 10 {
            cursor.advance();
            let tag = cursor.advance().unwrap_or('x');
            text.push('0');
            text.push(tag.to_ascii_lowercase());
        }
    }

    let int_digits = eat_digits(cursor, base, &mut text);

    if base != 10 {
        if int_digits == 0 {
            return Err(fail(cursor, "missing digits after base prefix"));
        }
        if at_fraction(cursor) {
            return Err(fail(cursor, "fraction is only allowed on base-10 literals"));
        }
        // Base 16 never reaches this: an `e` is a digit there.
        if matches!(cursor.peek(), Some('e' | 'E'))
            && matches!(cursor.peek_nth(1), Some(c) if c.is_ascii_digit())
        {
            return Err(fail(cursor, "exponent is only allowed on base-10 literals"));
        }
        return Ok(ScannedNumber::Int(text));
    }

    let mut is_float = false;

    // Fraction, with optional parenthesized digit groups folded in.
    if at_fraction(cursor) {
        cursor.advance();
        if int_digits == 0 {
            text.push('0');
        }
        text.push('.');

        let mut frac_digits = eat_digits(cursor, 10, &mut text);
        while cursor.peek() == Some('(') {
            cursor.advance();
            let group = eat_digits(cursor, 10, &mut text);
            if group == 0 {
                return Err(fail(cursor, "empty digit group"));
            }
            if !cursor.eat(')') {
                return Err(fail(cursor, "unterminated digit group"));
            }
            frac_digits += group;
        }
        if frac_digits == 0 {
            return Err(fail(cursor, "missing fraction digits"));
        }
        is_float = true;
    }

    if int_digits == 0 && !is_float {
        return Err(fail(cursor, "missing digits"));
    }

    // Exponent. Only claimed when digits actually follow, so `12e` stays an
    // integer followed by an identifier.
    if matches!(cursor.peek(), Some('e' | 'E')) {
        let next = cursor.peek_nth(1);
        let after = cursor.peek_nth(2);
        let has_exponent = matches!(next, Some(c) if c.is_ascii_digit())
            || (matches!(next, Some('+' | '-'))
                && matches!(after, Some(c) if c.is_ascii_digit()));
        if has_exponent {
            cursor.advance();
            text.push('e');
            match cursor.peek() {
                Some('-') => {
                    cursor.advance();
                    text.push('-');
                }
                Some('+') => {
                    cursor.advance();
                }
                _ => {}
            }
            eat_digits(cursor, 10, &mut text);
            is_float = true;
        }
    }

    if is_float {
        Ok(ScannedNumber::Float(text))
    } else {
        Ok(ScannedNumber::Int(text))
    }
}

/// Consume digits valid in `base`, skipping `_` separators.
///
/// Appends the digits (separators dropped) to `text` and returns how many
/// digits were consumed.
fn eat_digits(cursor: &mut Cursor<'_>, base: u32, text: &mut String) -> usize {
    let mut count = 0;
    while let Some(c) = cursor.peek() {
        if c.is_digit(base) {
            cursor.advance();
            text.push(c.to_ascii_lowercase());
            count += 1;
        } else if c == '_' {
            cursor.advance();
        } else {
            break;
        }
    }
    count
}

/// Scan one quoted literal (the lexer handles adjacent concatenation).
///
/// Unknown escapes are reported through `soft_errors` and the escaped
/// character is kept verbatim; scanning continues.
pub(super) fn scan_quoted(
    cursor: &mut Cursor<'_>,
    soft_errors: &mut Vec<LexError>,
) -> Result<ScannedQuote, LexError> {
    let start_line = cursor.line();
    let start_col = cursor.column();
    let start = cursor.offset();

    let span_here = |cursor: &Cursor<'_>| {
        Span::new(start_line, start_col, (cursor.offset() - start).max(1))
    };

    match cursor.peek() {
        Some('"') => {
            cursor.advance();
            let mut out = String::new();
            loop {
                match cursor.peek() {
                    None => {
                        return Err(LexError::UnterminatedString {
                            span: span_here(cursor),
                        });
                    }
                    Some('"') => {
                        cursor.advance();
                        return Ok(ScannedQuote::Str(out));
                    }
                    Some('\\') => {
                        cursor.advance();
                        match scan_escape(cursor, soft_errors) {
                            Some(c) => out.push(c),
                            None => {
                                return Err(LexError::UnterminatedString {
                                    span: span_here(cursor),
                                });
                            }
                        }
                    }
                    Some(c) => {
                        cursor.advance();
                        out.push(c);
                    }
                }
            }
        }
        Some('\'') => {
            cursor.advance();
            let c = match cursor.peek() {
                None => {
                    return Err(LexError::InvalidCharLiteral {
                        span: span_here(cursor),
                        detail: "unterminated character literal".to_string(),
                    });
                }
                Some('\'') => {
                    cursor.advance();
                    return Err(LexError::InvalidCharLiteral {
                        span: span_here(cursor),
                        detail: "empty character literal".to_string(),
                    });
                }
                Some('\\') => {
                    cursor.advance();
                    match scan_escape(cursor, soft_errors) {
                        Some(c) => c,
                        None => {
                            return Err(LexError::InvalidCharLiteral {
                                span: span_here(cursor),
                                detail: "unterminated character literal".to_string(),
                            });
                        }
                    }
                }
                Some(c) => {
                    cursor.advance();
                    c
                }
            };
            if cursor.eat('\'') {
                return Ok(ScannedQuote::Char(c));
            }
            // Drain to the closing quote so the contents are not re-lexed.
            while let Some(c) = cursor.peek() {
                cursor.advance();
                if c == '\'' {
                    return Err(LexError::InvalidCharLiteral {
                        span: span_here(cursor),
                        detail: "more than one character".to_string(),
                    });
                }
            }
            Err(LexError::InvalidCharLiteral {
                span: span_here(cursor),
                detail: "unterminated character literal".to_string(),
            })
        }
        _ => unreachable!("scan_quoted called off a quote"),
    }
}

/// Decode the character after a backslash.
///
/// Returns `None` at EOF. Unknown escapes report a soft error and fall back
/// to the raw character.
fn scan_escape(cursor: &mut Cursor<'_>, soft_errors: &mut Vec<LexError>) -> Option<char> {
    let line = cursor.line();
    let col = cursor.column();
    let c = cursor.advance()?;
    match unescape(c) {
        Some(decoded) => Some(decoded),
        None => {
            soft_errors.push(LexError::InvalidEscape {
                ch: c,
                span: Span::new(line, col.saturating_sub(1), 2),
            });
            Some(c)
        }
    }
}

/// The escape table.
fn unescape(c: char) -> Option<char> {
    Some(match c {
        'n' => '\n',
        't' => '\t',
        '0' => '\0',
        '\'' => '\'',
        '"' => '"',
        '\\' => '\\',
        'a' => '\x07',
        'v' => '\x0b',
        'f' => '\x0c',
        'b' => '\x08',
        'r' => '\r',
        'e' => '\x1b',
        _ => return None,
    })
}
