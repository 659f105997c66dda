//! Token kinds produced by the lexer.

use std::fmt;

use logos::Logos;
use lyra_source::Span;

/// The kind of a lexical token.
///
/// Variants with a `#[token(...)]`/`#[regex(...)]` attribute are recognised
/// directly by the generated `logos` automaton; the rest (string and
/// character literals, comments, `Eof`, `Invalid`) are produced by the
/// surrounding [`super::Lexer`], which needs custom escape and
/// error-recovery handling `logos` cannot express as a single regex.
///
/// Not every kind is ever produced: `Newline`, `Whitespace`, `Comment`, and
/// the interpolated-string kinds are reserved for a future version of the
/// language.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals.
    #[regex(r"[0-9]+\.[0-9]+")]
    FloatLiteral,
    #[regex(r"[0-9]+")]
    IntegerLiteral,
    StringLiteral,
    CharacterLiteral,
    InterpolatedStringStart,
    InterpolatedStringMiddle,
    InterpolatedStringEnd,

    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Identifier,

    // Keywords (recognised by re-tagging an `Identifier` match; see
    // `keyword_from_str`).
    Let,
    Fun,
    Class,
    New,
    This,
    If,
    Else,
    While,
    For,
    Return,
    True,
    False,
    Break,
    Continue,
    Or,
    And,
    Print,

    // Operators.
    #[token("+")]
    Plus,
    #[token("+=")]
    PlusEqual,
    #[token("-")]
    Minus,
    #[token("-=")]
    MinusEqual,
    #[token("->")]
    Arrow,
    #[token("*")]
    Star,
    #[token("*=")]
    StarEqual,
    #[token("/")]
    Slash,
    #[token("/=")]
    SlashEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token("=>")]
    FatArrow,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,

    // Delimiters.
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,

    // Special.
    Newline,
    Whitespace,
    Comment,
    DocStringComment,
    Eof,

    // Error.
    Invalid,
}

impl TokenKind {
    /// Re-tags an `Identifier` lexeme as a keyword kind, if it is one.
    #[must_use]
    pub fn keyword(lexeme: &str) -> Option<Self> {
        Some(match lexeme {
            "let" => Self::Let,
            "fun" => Self::Fun,
            "class" => Self::Class,
            "new" => Self::New,
            "this" => Self::This,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "for" => Self::For,
            "return" => Self::Return,
            "true" => Self::True,
            "false" => Self::False,
            "break" => Self::Break,
            "continue" => Self::Continue,
            "or" => Self::Or,
            "and" => Self::And,
            "print" => Self::Print,
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FloatLiteral => "float literal",
            Self::IntegerLiteral => "integer literal",
            Self::StringLiteral => "string literal",
            Self::CharacterLiteral => "character literal",
            Self::InterpolatedStringStart
            | Self::InterpolatedStringMiddle
            | Self::InterpolatedStringEnd => "interpolated string",
            Self::Identifier => "identifier",
            Self::Let => "'let'",
            Self::Fun => "'fun'",
            Self::Class => "'class'",
            Self::New => "'new'",
            Self::This => "'this'",
            Self::If => "'if'",
            Self::Else => "'else'",
            Self::While => "'while'",
            Self::For => "'for'",
            Self::Return => "'return'",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Break => "'break'",
            Self::Continue => "'continue'",
            Self::Or => "'or'",
            Self::And => "'and'",
            Self::Print => "'print'",
            Self::Plus => "'+'",
            Self::PlusEqual => "'+='",
            Self::Minus => "'-'",
            Self::MinusEqual => "'-='",
            Self::Arrow => "'->'",
            Self::Star => "'*'",
            Self::StarEqual => "'*='",
            Self::Slash => "'/'",
            Self::SlashEqual => "'/='",
            Self::Equal => "'='",
            Self::EqualEqual => "'=='",
            Self::FatArrow => "'=>'",
            Self::Bang => "'!'",
            Self::BangEqual => "'!='",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::Dot => "'.'",
            Self::Newline => "newline",
            Self::Whitespace => "whitespace",
            Self::Comment => "comment",
            Self::DocStringComment => "doc comment",
            Self::Eof => "end of file",
            Self::Invalid => "invalid token",
        };
        write!(f, "{name}")
    }
}

/// A single lexical token: a kind plus the span it covers.
///
/// The lexeme itself is not stored; it is recovered on demand by slicing the
/// source with [`Token::span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self { Self { kind, span } }

    /// The kind of this token.
    #[must_use]
    pub const fn kind(&self) -> TokenKind { self.kind }

    /// The span this token covers.
    #[must_use]
    pub const fn span(&self) -> Span { self.span }

    /// The lexeme this token covers, recovered by slicing `source`.
    #[must_use]
    pub fn lexeme<'src>(&self, source: &'src str) -> &'src str { self.span.slice(source) }

    /// Returns true if this token has the given kind.
    #[must_use]
    pub fn is(&self, kind: TokenKind) -> bool { self.kind == kind }
}
