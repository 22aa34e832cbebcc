//! Token types for the PySim lexer.
//!
//! Defines [`TokenKind`] covering every lexeme in the supported Python
//! subset and [`Token`], which pairs a kind with a source [`Span`].

use pysim_types::Span;
use std::fmt;

/// All reserved words in the supported subset.
///
/// These cannot be used as variable names. The lexer recognises each one
/// and emits a specific keyword token instead of [`TokenKind::Identifier`].
pub const ALL_KEYWORDS: &[&str] = &[
    // Control flow (6)
    "if", "elif", "else", "for", "while", "in",
    // Definitions (4)
    "def", "class", "return", "pass",
    // Imports (2)
    "import", "from",
    // Operators (3)
    "not", "and", "or",
    // Literals (3)
    "True", "False", "None",
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the PySim lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns `true` if this token is a reserved keyword.
    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the supported Python subset.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────

    /// Integer literal: `42`
    IntLit(i64),
    /// Float literal: `3.14`
    FloatLit(f64),
    /// Complete string literal with escapes already decoded: `"hello"`
    StringLit(String),
    /// `True`
    True,
    /// `False`
    False,
    /// `None`
    NoneKw,

    // ── f-string interpolation ───────────────────────────────

    /// Start of an f-string — text before the first `{`.
    /// Example: for `f"hi {name}"`, carries `"hi "`.
    FStringStart(String),
    /// Text between a `}` and the next `{` inside an f-string.
    FStringPart(String),
    /// End of an f-string — text after the last `}` up to the quote.
    FStringEnd(String),
    /// The `{` that opens an embedded expression.
    InterpolationStart,
    /// The `}` that closes an embedded expression.
    InterpolationEnd,

    // ── Identifiers ──────────────────────────────────────────

    /// User-defined identifier: `total`, `my_list`
    Identifier(String),

    // ── Keywords ─────────────────────────────────────────────

    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `for`
    For,
    /// `while`
    While,
    /// `in`
    In,
    /// `def`
    Def,
    /// `class`
    Class,
    /// `return`
    Return,
    /// `pass`
    Pass,
    /// `import`
    Import,
    /// `from`
    From,
    /// `not`
    Not,
    /// `and`
    And,
    /// `or`
    Or,

    // ── Operators ────────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,
    /// `//`
    SlashSlash,
    /// `%`
    Percent,
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `**=`
    StarStarEq,
    /// `/=`
    SlashEq,
    /// `//=`
    SlashSlashEq,
    /// `%=`
    PercentEq,

    // ── Punctuation ──────────────────────────────────────────

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `.`
    Dot,

    // ── Layout ───────────────────────────────────────────────

    /// End of a logical line.
    Newline,
    /// Indentation increase at the start of a suite.
    Indent,
    /// Indentation drop closing one suite level.
    Dedent,
    /// End of input.
    Eof,

    // ── Escape hatch ─────────────────────────────────────────

    /// A character the lexer does not understand. The parser turns the
    /// containing line into an unprocessed-line annotation.
    Unknown(char),
}

impl TokenKind {
    /// Look up a reserved word. Returns `Some(kind)` for all reserved
    /// words, `None` for user identifiers.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "for" => TokenKind::For,
            "while" => TokenKind::While,
            "in" => TokenKind::In,
            "def" => TokenKind::Def,
            "class" => TokenKind::Class,
            "return" => TokenKind::Return,
            "pass" => TokenKind::Pass,
            "import" => TokenKind::Import,
            "from" => TokenKind::From,
            "not" => TokenKind::Not,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "True" => TokenKind::True,
            "False" => TokenKind::False,
            "None" => TokenKind::NoneKw,
            _ => return None,
        })
    }

    /// Returns `true` if this token kind is a reserved keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::While
                | TokenKind::In
                | TokenKind::Def
                | TokenKind::Class
                | TokenKind::Return
                | TokenKind::Pass
                | TokenKind::Import
                | TokenKind::From
                | TokenKind::Not
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::True
                | TokenKind::False
                | TokenKind::NoneKw
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Literals
            TokenKind::IntLit(n) => write!(f, "{n}"),
            TokenKind::FloatLit(n) => write!(f, "{n}"),
            TokenKind::StringLit(s) => write!(f, "\"{s}\""),
            TokenKind::True => f.write_str("True"),
            TokenKind::False => f.write_str("False"),
            TokenKind::NoneKw => f.write_str("None"),
            // f-strings
            TokenKind::FStringStart(_) => f.write_str("f-string start"),
            TokenKind::FStringPart(_) => f.write_str("f-string part"),
            TokenKind::FStringEnd(_) => f.write_str("f-string end"),
            TokenKind::InterpolationStart => f.write_str("{"),
            TokenKind::InterpolationEnd => f.write_str("}"),
            // Identifiers
            TokenKind::Identifier(s) => f.write_str(s),
            // Keywords — display the source text
            TokenKind::If => f.write_str("if"),
            TokenKind::Elif => f.write_str("elif"),
            TokenKind::Else => f.write_str("else"),
            TokenKind::For => f.write_str("for"),
            TokenKind::While => f.write_str("while"),
            TokenKind::In => f.write_str("in"),
            TokenKind::Def => f.write_str("def"),
            TokenKind::Class => f.write_str("class"),
            TokenKind::Return => f.write_str("return"),
            TokenKind::Pass => f.write_str("pass"),
            TokenKind::Import => f.write_str("import"),
            TokenKind::From => f.write_str("from"),
            TokenKind::Not => f.write_str("not"),
            TokenKind::And => f.write_str("and"),
            TokenKind::Or => f.write_str("or"),
            // Operators
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::StarStar => f.write_str("**"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::SlashSlash => f.write_str("//"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::Eq => f.write_str("="),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::BangEq => f.write_str("!="),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::LessEq => f.write_str("<="),
            TokenKind::GreaterEq => f.write_str(">="),
            TokenKind::PlusEq => f.write_str("+="),
            TokenKind::MinusEq => f.write_str("-="),
            TokenKind::StarEq => f.write_str("*="),
            TokenKind::StarStarEq => f.write_str("**="),
            TokenKind::SlashEq => f.write_str("/="),
            TokenKind::SlashSlashEq => f.write_str("//="),
            TokenKind::PercentEq => f.write_str("%="),
            // Punctuation
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::Dot => f.write_str("."),
            // Layout
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Indent => f.write_str("indent"),
            TokenKind::Dedent => f.write_str("dedent"),
            TokenKind::Eof => f.write_str("end of file"),
            TokenKind::Unknown(c) => write!(f, "{c}"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
