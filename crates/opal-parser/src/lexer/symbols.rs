//! The keyword and operator table.
//!
//! One static table maps every reserved word and every operator lexeme to
//! its [`TokenKind`]. The lexer probes it with source slices of decreasing
//! length, so operator matching is greedy: `<<<<=` wins over `<<<<`, which
//! wins over `<<<`, and so on.
//!
//! The table is a fixed-bucket FNV-1a hash with chained collisions, built
//! once on first use and read-only afterwards.

use std::sync::OnceLock;

use super::token::TokenKind;

/// Length in bytes of the longest operator lexeme (`<<<<=` / `>>>>=`).
///
/// Keyword entries may be longer; this bound only drives the greedy
/// operator probe in the lexer.
pub const MAX_SYMBOL_LEN: usize = 5;

const BUCKET_COUNT: usize = 64;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Every reserved word and operator lexeme.
const ENTRIES: &[(&str, TokenKind)] = &[
    // Declaration keywords
    ("var", TokenKind::Var),
    ("func", TokenKind::Func),
    ("object", TokenKind::Object),
    ("struct", TokenKind::Struct),
    ("class", TokenKind::Class),
    ("const", TokenKind::Const),
    ("static", TokenKind::Static),
    // Statement keywords
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("return", TokenKind::Return),
    ("free", TokenKind::Free),
    ("jump", TokenKind::Jump),
    ("signal", TokenKind::Signal),
    ("push", TokenKind::Push),
    ("pop", TokenKind::Pop),
    ("nop", TokenKind::Nop),
    ("halt", TokenKind::Halt),
    // Type keywords
    ("void", TokenKind::Void),
    ("bool", TokenKind::Bool),
    ("byte", TokenKind::Byte),
    ("int", TokenKind::Int),
    ("float", TokenKind::Float),
    ("str", TokenKind::Str),
    // Value keywords
    ("true", TokenKind::True),
    ("false", TokenKind::False),
    // Arithmetic
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    // Assignment
    ("=", TokenKind::Equal),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("*=", TokenKind::StarEqual),
    ("/=", TokenKind::SlashEqual),
    ("%=", TokenKind::PercentEqual),
    ("&=", TokenKind::AmpEqual),
    ("|=", TokenKind::PipeEqual),
    ("^=", TokenKind::CaretEqual),
    // Shift and rotate
    ("<<", TokenKind::LessLess),
    (">>", TokenKind::GreaterGreater),
    ("<<<", TokenKind::LessLessLess),
    (">>>", TokenKind::GreaterGreaterGreater),
    ("<<<<", TokenKind::LessLessLessLess),
    (">>>>", TokenKind::GreaterGreaterGreaterGreater),
    ("<<=", TokenKind::LessLessEqual),
    (">>=", TokenKind::GreaterGreaterEqual),
    ("<<<=", TokenKind::LessLessLessEqual),
    (">>>=", TokenKind::GreaterGreaterGreaterEqual),
    ("<<<<=", TokenKind::LessLessLessLessEqual),
    (">>>>=", TokenKind::GreaterGreaterGreaterGreaterEqual),
    // Comparison
    ("==", TokenKind::EqualEqual),
    ("!=", TokenKind::BangEqual),
    ("<", TokenKind::Less),
    ("<=", TokenKind::LessEqual),
    (">", TokenKind::Greater),
    (">=", TokenKind::GreaterEqual),
    // Logical
    ("&&", TokenKind::AmpAmp),
    ("||", TokenKind::PipePipe),
    ("!", TokenKind::Bang),
    // Bitwise
    ("&", TokenKind::Amp),
    ("|", TokenKind::Pipe),
    ("^", TokenKind::Caret),
    ("~", TokenKind::Tilde),
    // Indirection prefixes
    ("@", TokenKind::At),
    ("@@", TokenKind::AtAt),
    ("$", TokenKind::Dollar),
    ("$$", TokenKind::DollarDollar),
    // Delimiters
    ("(", TokenKind::LeftParen),
    (")", TokenKind::RightParen),
    ("[", TokenKind::LeftBracket),
    ("]", TokenKind::RightBracket),
    ("{", TokenKind::LeftBrace),
    ("}", TokenKind::RightBrace),
    (";", TokenKind::Semicolon),
    (",", TokenKind::Comma),
    (":", TokenKind::Colon),
    (".", TokenKind::Dot),
    ("?", TokenKind::Question),
    ("=>", TokenKind::Arrow),
];

struct SymbolTable {
    buckets: Vec<Vec<(&'static str, TokenKind)>>,
}

impl SymbolTable {
    fn build() -> Self {
        let mut buckets = vec![Vec::new(); BUCKET_COUNT];
        for &(lexeme, kind) in ENTRIES {
            let bucket = (fnv1a(lexeme.as_bytes()) as usize) % BUCKET_COUNT;
            buckets[bucket].push((lexeme, kind));
        }
        Self { buckets }
    }

    fn lookup(&self, lexeme: &str) -> Option<TokenKind> {
        let bucket = (fnv1a(lexeme.as_bytes()) as usize) % BUCKET_COUNT;
        self.buckets[bucket]
            .iter()
            .find(|(entry, _)| *entry == lexeme)
            .map(|&(_, kind)| kind)
    }
}

/// FNV-1a over the lexeme bytes.
#[inline]
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

fn table() -> &'static SymbolTable {
    static TABLE: OnceLock<SymbolTable> = OnceLock::new();
    TABLE.get_or_init(SymbolTable::build)
}

/// Resolve a lexeme against the symbol table.
///
/// Returns `None` for anything that is neither a reserved word nor an
/// operator, which is how identifiers fall out of keyword resolution.
#[inline]
pub fn lookup_symbol(lexeme: &str) -> Option<TokenKind> {
    if lexeme.is_empty() {
        return None;
    }
    table().lookup(lexeme)
}
