use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    #[regex(r"[\n\r]+")]
    NewLine,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("=")]
    #[token("==")]
    Eq,

    #[token("!=")]
    #[token("≠")]
    NotEq,

    #[token("<")]
    Less,

    #[token(">")]
    Greater,

    #[token("<=")]
    #[token("≤")]
    LessEq,

    #[token(">=")]
    #[token("≥")]
    GreaterEq,

    #[token("<==")]
    #[token("⟸")]
    Implied,

    #[token("+")]
    Add,

    #[token("-")]
    Sub,

    #[token("*")]
    #[token("⋅")]
    Mul,

    #[token("/")]
    Div,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_']*")]
    Name,

    #[regex(r"[0-9]+")]
    Int,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token("[")]
    OpenSquare,

    #[token("]")]
    CloseSquare,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::NewLine)
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }
}
