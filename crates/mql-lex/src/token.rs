use mql_util::Span;

/// A lexical token: its kind plus the span of source it came from.
///
/// Numbers carry their parsed `f64` value directly (the lexer does the
/// float parsing once, rather than handing the parser a raw lexeme to
/// re-parse). Identifiers carry their owned text.
///
/// There is no `NEGATE` token kind here even though unary minus is part of
/// the grammar: the lexer only ever produces `Minus`. Whether a `Minus`
/// token starts a unary negation or separates a binary subtraction is a
/// parsing decision, not a lexical one (see `mql-parse`'s `unary` rule).
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),

    Dot,
    Comma,
    LParen,
    RParen,
    Question,
    Colon,
    QColon, // ??

    Plus,
    Minus,
    Star,
    Slash,

    Eq,  // ==
    Neq, // !=
    Lt,
    Lte,
    Gt,
    Gte,

    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number `{n}`"),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Dot => write!(f, "`.`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::Question => write!(f, "`?`"),
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::QColon => write!(f, "`??`"),
            TokenKind::Plus => write!(f, "`+`"),
            TokenKind::Minus => write!(f, "`-`"),
            TokenKind::Star => write!(f, "`*`"),
            TokenKind::Slash => write!(f, "`/`"),
            TokenKind::Eq => write!(f, "`==`"),
            TokenKind::Neq => write!(f, "`!=`"),
            TokenKind::Lt => write!(f, "`<`"),
            TokenKind::Lte => write!(f, "`<=`"),
            TokenKind::Gt => write!(f, "`>`"),
            TokenKind::Gte => write!(f, "`>=`"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
