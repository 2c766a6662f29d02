//! Operator definitions for Opal expressions.
//!
//! Provides enums for binary, unary, postfix, and assignment operators,
//! each convertible from the token kind the lexer produced.

use crate::lexer::TokenKind;
use std::fmt;

/// Binary operators in Opal.
///
/// Organized by precedence level from highest to lowest. The parser
/// groups these into levels itself; this enum only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Multiplicative
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,

    // Additive
    /// `+`
    Add,
    /// `-`
    Sub,

    // Shift and rotate
    /// `<<` shift left
    Shl,
    /// `>>` shift right
    Shr,
    /// `<<<` rotate left
    Rol,
    /// `>>>` rotate right
    Ror,
    /// `<<<<` rotate left through carry
    Rcl,
    /// `>>>>` rotate right through carry
    Rcr,

    // Relational
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,

    // Equality
    /// `==`
    Equal,
    /// `!=`
    NotEqual,

    // Bitwise
    /// `&`
    BitAnd,
    /// `^`
    BitXor,
    /// `|`
    BitOr,

    // Logical
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
}

impl BinaryOp {
    /// Try to convert a token kind to a binary operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        use TokenKind::*;

        Some(match token {
            Star => BinaryOp::Mul,
            Slash => BinaryOp::Div,
            Percent => BinaryOp::Mod,
            Plus => BinaryOp::Add,
            Minus => BinaryOp::Sub,
            LessLess => BinaryOp::Shl,
            GreaterGreater => BinaryOp::Shr,
            LessLessLess => BinaryOp::Rol,
            GreaterGreaterGreater => BinaryOp::Ror,
            LessLessLessLess => BinaryOp::Rcl,
            GreaterGreaterGreaterGreater => BinaryOp::Rcr,
            TokenKind::Less => BinaryOp::Less,
            TokenKind::LessEqual => BinaryOp::LessEqual,
            TokenKind::Greater => BinaryOp::Greater,
            TokenKind::GreaterEqual => BinaryOp::GreaterEqual,
            EqualEqual => BinaryOp::Equal,
            BangEqual => BinaryOp::NotEqual,
            Amp => BinaryOp::BitAnd,
            Caret => BinaryOp::BitXor,
            Pipe => BinaryOp::BitOr,
            AmpAmp => BinaryOp::LogicalAnd,
            PipePipe => BinaryOp::LogicalOr,
            _ => return None,
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOp::*;
        let s = match self {
            Mul => "*",
            Div => "/",
            Mod => "%",
            Add => "+",
            Sub => "-",
            Shl => "<<",
            Shr => ">>",
            Rol => "<<<",
            Ror => ">>>",
            Rcl => "<<<<",
            Rcr => ">>>>",
            Less => "<",
            LessEqual => "<=",
            Greater => ">",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            BitAnd => "&",
            BitXor => "^",
            BitOr => "|",
            LogicalAnd => "&&",
            LogicalOr => "||",
        };
        write!(f, "{}", s)
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `!` logical NOT
    Not,
    /// `~` bitwise NOT
    BitNot,
    /// `++` pre-increment
    PreInc,
    /// `--` pre-decrement
    PreDec,
}

impl UnaryOp {
    /// Try to convert a token kind to a unary operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        Some(match token {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::PlusPlus => UnaryOp::PreInc,
            TokenKind::MinusMinus => UnaryOp::PreDec,
            _ => return None,
        })
    }

    /// Whether this operator mutates its operand.
    pub fn is_mutating(self) -> bool {
        matches!(self, UnaryOp::PreInc | UnaryOp::PreDec)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::PreInc => "++",
            UnaryOp::PreDec => "--",
        };
        write!(f, "{}", s)
    }
}

/// Postfix operators (`++` and `--`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    /// `++` post-increment
    PostInc,
    /// `--` post-decrement
    PostDec,
}

impl PostfixOp {
    /// Try to convert a token kind to a postfix operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        Some(match token {
            TokenKind::PlusPlus => PostfixOp::PostInc,
            TokenKind::MinusMinus => PostfixOp::PostDec,
            _ => return None,
        })
    }
}

impl fmt::Display for PostfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PostfixOp::PostInc => "++",
            PostfixOp::PostDec => "--",
        };
        write!(f, "{}", s)
    }
}

/// Assignment operators, simple and compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    ModAssign,
    /// `&=`
    AndAssign,
    /// `|=`
    OrAssign,
    /// `^=`
    XorAssign,
    /// `<<=`
    ShlAssign,
    /// `>>=`
    ShrAssign,
    /// `<<<=`
    RolAssign,
    /// `>>>=`
    RorAssign,
    /// `<<<<=`
    RclAssign,
    /// `>>>>=`
    RcrAssign,
}

impl AssignOp {
    /// Try to convert a token kind to an assignment operator.
    pub fn from_token(token: TokenKind) -> Option<Self> {
        use TokenKind::*;

        Some(match token {
            Equal => AssignOp::Assign,
            PlusEqual => AssignOp::AddAssign,
            MinusEqual => AssignOp::SubAssign,
            StarEqual => AssignOp::MulAssign,
            SlashEqual => AssignOp::DivAssign,
            PercentEqual => AssignOp::ModAssign,
            AmpEqual => AssignOp::AndAssign,
            PipeEqual => AssignOp::OrAssign,
            CaretEqual => AssignOp::XorAssign,
            LessLessEqual => AssignOp::ShlAssign,
            GreaterGreaterEqual => AssignOp::ShrAssign,
            LessLessLessEqual => AssignOp::RolAssign,
            GreaterGreaterGreaterEqual => AssignOp::RorAssign,
            LessLessLessLessEqual => AssignOp::RclAssign,
            GreaterGreaterGreaterGreaterEqual => AssignOp::RcrAssign,
            _ => return None,
        })
    }

    /// Whether this is the simple `=` form.
    pub fn is_simple(self) -> bool {
        self == AssignOp::Assign
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AssignOp::*;
        let s = match self {
            Assign => "=",
            AddAssign => "+=",
            SubAssign => "-=",
            MulAssign => "*=",
            DivAssign => "/=",
            ModAssign => "%=",
            AndAssign => "&=",
            OrAssign => "|=",
            XorAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            RolAssign => "<<<=",
            RorAssign => ">>>=",
            RclAssign => "<<<<=",
            RcrAssign => ">>>>=",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_op_from_token() {
        assert_eq!(BinaryOp::from_token(TokenKind::Plus), Some(BinaryOp::Add));
        assert_eq!(
            BinaryOp::from_token(TokenKind::LessLessLessLess),
            Some(BinaryOp::Rcl)
        );
        assert_eq!(BinaryOp::from_token(TokenKind::Identifier), None);
        // Assignment operators are not binary operators.
        assert_eq!(BinaryOp::from_token(TokenKind::PlusEqual), None);
    }

    #[test]
    fn unary_op_from_token() {
        assert_eq!(UnaryOp::from_token(TokenKind::Bang), Some(UnaryOp::Not));
        assert_eq!(UnaryOp::from_token(TokenKind::PlusPlus), Some(UnaryOp::PreInc));
        assert_eq!(UnaryOp::from_token(TokenKind::Plus), None);
    }

    #[test]
    fn assign_op_covers_all_compound_forms() {
        use TokenKind::*;
        for kind in [
            Equal,
            PlusEqual,
            MinusEqual,
            StarEqual,
            SlashEqual,
            PercentEqual,
            AmpEqual,
            PipeEqual,
            CaretEqual,
            LessLessEqual,
            GreaterGreaterEqual,
            LessLessLessEqual,
            GreaterGreaterGreaterEqual,
            LessLessLessLessEqual,
            GreaterGreaterGreaterGreaterEqual,
        ] {
            assert!(AssignOp::from_token(kind).is_some(), "{kind:?}");
        }
        assert!(AssignOp::from_token(EqualEqual).is_none());
    }

    #[test]
    fn display_round_trips_through_symbol_table() {
        use crate::lexer::lookup_symbol;

        for op in [BinaryOp::Rcl, BinaryOp::Shr, BinaryOp::LogicalAnd] {
            let text = op.to_string();
            let kind = lookup_symbol(&text).unwrap();
            assert_eq!(BinaryOp::from_token(kind), Some(op));
        }
        for op in [AssignOp::RcrAssign, AssignOp::ShlAssign] {
            let text = op.to_string();
            let kind = lookup_symbol(&text).unwrap();
            assert_eq!(AssignOp::from_token(kind), Some(op));
        }
    }

    #[test]
    fn mutating_unary_ops() {
        assert!(UnaryOp::PreInc.is_mutating());
        assert!(!UnaryOp::Not.is_mutating());
    }
}
