//! Token types for the Opal lexer.

use opal_core::Span;
use std::fmt;

/// A token from the source code.
///
/// The `'ast` lifetime refers to the arena the token text is allocated in,
/// so the source buffer can be dropped once lexing is done. For literal
/// tokens `text` holds the decoded value (escapes resolved, digit
/// separators stripped); the span still covers the raw source bytes.
#[derive(Clone, Copy, PartialEq)]
pub struct Token<'ast> {
    /// The kind of token.
    pub kind: TokenKind,
    /// Decoded token text (allocated in the arena, may be empty).
    pub text: &'ast str,
    /// Location in source.
    pub span: Span,
}

impl<'ast> Token<'ast> {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, text: &'ast str, span: Span) -> Self {
        Self { kind, text, span }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?} @ {:?})", self.kind, self.text, self.span)
    }
}

/// All token kinds in Opal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // =========================================
    // Literals
    // =========================================
    /// Integer literal: `42`, `0x2a`, `-7`, `1_000`
    IntLiteral,
    /// Float literal: `3.14`, `1e9`, `2.5(25)`
    FloatLiteral,
    /// String literal: `"hello"`, including concatenated runs
    StringLiteral,
    /// Character literal: `'a'`, `'\n'`
    CharLiteral,

    // =========================================
    // Identifiers
    // =========================================
    /// User-defined identifier
    Identifier,

    // =========================================
    // Keywords - Declarations
    // =========================================
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
    /// `const`
    Const,
    /// `static`
    Static,

    // =========================================
    // Keywords - Statements
    // =========================================
    /// `if`
    If,
    /// `else`
    Else,
    /// `return`
    Return,
    /// `free`
    Free,
    /// `jump`
    Jump,
    /// `signal`
    Signal,
    /// `push`
    Push,
    /// `pop`
    Pop,
    /// `nop`
    Nop,
    /// `halt`
    Halt,

    // =========================================
    // Keywords - Types
    // =========================================
    /// `void`
    Void,
    /// `bool`
    Bool,
    /// `byte`
    Byte,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `str`
    Str,

    // =========================================
    // Keywords - Values
    // =========================================
    /// `true`
    True,
    /// `false`
    False,

    // =========================================
    // Operators - Arithmetic
    // =========================================
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,

    // =========================================
    // Operators - Assignment
    // =========================================
    /// `=`
    Equal,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `/=`
    SlashEqual,
    /// `%=`
    PercentEqual,
    /// `&=`
    AmpEqual,
    /// `|=`
    PipeEqual,
    /// `^=`
    CaretEqual,

    // =========================================
    // Operators - Shift and rotate
    // =========================================
    /// `<<` shift left
    LessLess,
    /// `>>` shift right
    GreaterGreater,
    /// `<<<` rotate left
    LessLessLess,
    /// `>>>` rotate right
    GreaterGreaterGreater,
    /// `<<<<` rotate left through carry
    LessLessLessLess,
    /// `>>>>` rotate right through carry
    GreaterGreaterGreaterGreater,
    /// `<<=`
    LessLessEqual,
    /// `>>=`
    GreaterGreaterEqual,
    /// `<<<=`
    LessLessLessEqual,
    /// `>>>=`
    GreaterGreaterGreaterEqual,
    /// `<<<<=`
    LessLessLessLessEqual,
    /// `>>>>=`
    GreaterGreaterGreaterGreaterEqual,

    // =========================================
    // Operators - Comparison
    // =========================================
    /// `==`
    EqualEqual,
    /// `!=`
    BangEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // =========================================
    // Operators - Logical
    // =========================================
    /// `&&`, also a reference prefix of depth 2 before an identifier
    AmpAmp,
    /// `||`
    PipePipe,
    /// `!`
    Bang,

    // =========================================
    // Operators - Bitwise
    // =========================================
    /// `&`, also a reference prefix of depth 1 before an identifier
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,

    // =========================================
    // Operators - Indirection prefixes
    // =========================================
    /// `@` pointer prefix, depth 1
    At,
    /// `@@` pointer prefix, depth 2
    AtAt,
    /// `$` register prefix, depth 1
    Dollar,
    /// `$$` register prefix, depth 2
    DollarDollar,

    // =========================================
    // Delimiters
    // =========================================
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `.`
    Dot,
    /// `?`
    Question,
    /// `=>`
    Arrow,

    // =========================================
    // Special
    // =========================================
    /// End of input
    Eof,
    /// Lexer error (unrecognized or malformed input)
    Error,
}

impl TokenKind {
    /// Whether this token kind is a keyword.
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Var | Func
                | Object
                | Struct
                | Class
                | Const
                | Static
                | If
                | Else
                | Return
                | Free
                | Jump
                | Signal
                | Push
                | Pop
                | Nop
                | Halt
                | Void
                | Bool
                | Byte
                | Int
                | Float
                | Str
                | True
                | False
        )
    }

    /// Whether this token kind is a literal.
    pub fn is_literal(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            IntLiteral | FloatLiteral | StringLiteral | CharLiteral | True | False
        )
    }

    /// Whether this token kind names a primitive type.
    pub fn is_primitive_type(self) -> bool {
        use TokenKind::*;
        matches!(self, Void | Bool | Byte | Int | Float | Str)
    }

    /// Whether this token kind introduces a declaration (including the
    /// modifier keywords that may precede the introducer).
    pub fn starts_declaration(self) -> bool {
        use TokenKind::*;
        matches!(self, Var | Func | Object | Struct | Class | Const | Static)
    }

    /// String representation of this token kind for error messages.
    pub fn description(self) -> &'static str {
        use TokenKind::*;
        match self {
            IntLiteral => "integer literal",
            FloatLiteral => "float literal",
            StringLiteral => "string literal",
            CharLiteral => "character literal",
            Identifier => "identifier",
            Var => "'var'",
            Func => "'func'",
            Object => "'object'",
            Struct => "'struct'",
            Class => "'class'",
            Const => "'const'",
            Static => "'static'",
            If => "'if'",
            Else => "'else'",
            Return => "'return'",
            Free => "'free'",
            Jump => "'jump'",
            Signal => "'signal'",
            Push => "'push'",
            Pop => "'pop'",
            Nop => "'nop'",
            Halt => "'halt'",
            Void => "'void'",
            Bool => "'bool'",
            Byte => "'byte'",
            Int => "'int'",
            Float => "'float'",
            Str => "'str'",
            True => "'true'",
            False => "'false'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Percent => "'%'",
            PlusPlus => "'++'",
            MinusMinus => "'--'",
            Equal => "'='",
            PlusEqual => "'+='",
            MinusEqual => "'-='",
            StarEqual => "'*='",
            SlashEqual => "'/='",
            PercentEqual => "'%='",
            AmpEqual => "'&='",
            PipeEqual => "'|='",
            CaretEqual => "'^='",
            LessLess => "'<<'",
            GreaterGreater => "'>>'",
            LessLessLess => "'<<<'",
            GreaterGreaterGreater => "'>>>'",
            LessLessLessLess => "'<<<<'",
            GreaterGreaterGreaterGreater => "'>>>>'",
            LessLessEqual => "'<<='",
            GreaterGreaterEqual => "'>>='",
            LessLessLessEqual => "'<<<='",
            GreaterGreaterGreaterEqual => "'>>>='",
            LessLessLessLessEqual => "'<<<<='",
            GreaterGreaterGreaterGreaterEqual => "'>>>>='",
            EqualEqual => "'=='",
            BangEqual => "'!='",
            Less => "'<'",
            LessEqual => "'<='",
            Greater => "'>'",
            GreaterEqual => "'>='",
            AmpAmp => "'&&'",
            PipePipe => "'||'",
            Bang => "'!'",
            Amp => "'&'",
            Pipe => "'|'",
            Caret => "'^'",
            Tilde => "'~'",
            At => "'@'",
            AtAt => "'@@'",
            Dollar => "'$'",
            DollarDollar => "'$$'",
            LeftParen => "'('",
            RightParen => "')'",
            LeftBracket => "'['",
            RightBracket => "']'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            Semicolon => "';'",
            Comma => "','",
            Colon => "':'",
            Dot => "'.'",
            Question => "'?'",
            Arrow => "'=>'",
            Eof => "end of input",
            Error => "invalid token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_debug_format() {
        let token = Token::new(TokenKind::Identifier, "accum", Span::new(1, 1, 5));
        let debug = format!("{:?}", token);
        assert!(debug.contains("Identifier"));
        assert!(debug.contains("accum"));
    }

    #[test]
    fn keyword_classification() {
        assert!(TokenKind::Jump.is_keyword());
        assert!(TokenKind::Byte.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
        assert!(!TokenKind::Arrow.is_keyword());
    }

    #[test]
    fn literal_classification() {
        assert!(TokenKind::IntLiteral.is_literal());
        assert!(TokenKind::True.is_literal());
        assert!(!TokenKind::Semicolon.is_literal());
    }

    #[test]
    fn declaration_starters() {
        assert!(TokenKind::Var.starts_declaration());
        assert!(TokenKind::Static.starts_declaration());
        assert!(!TokenKind::If.starts_declaration());
    }

    #[test]
    fn descriptions() {
        assert_eq!(TokenKind::GreaterGreaterGreaterGreaterEqual.description(), "'>>>>='");
        assert_eq!(TokenKind::Eof.description(), "end of input");
        assert_eq!(format!("{}", TokenKind::Arrow), "'=>'");
    }
}
