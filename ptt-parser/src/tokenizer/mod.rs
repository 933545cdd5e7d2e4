pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows us
/// to backtrack in case of an error.
///
/// Input the lexer cannot classify becomes a [`TokenKind::Symbol`] token, so the parser reports
/// it as an unexpected token at the right position instead of silently truncating the input.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: result.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let tokens = tokenize_complete(input);
        let actual = tokens.iter()
            .map(|token| (token.kind, token.lexeme))
            .collect::<Vec<_>>();

        assert_eq!(actual, expected.to_vec());
    }

    #[test]
    fn basic_expr() {
        compare_tokens(
            "x + 0",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Add, "+"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "0"),
            ],
        );
    }

    #[test]
    fn relation_operators() {
        compare_tokens(
            "a<=b<==c≠d",
            [
                (TokenKind::Name, "a"),
                (TokenKind::LessEq, "<="),
                (TokenKind::Name, "b"),
                (TokenKind::Implied, "<=="),
                (TokenKind::Name, "c"),
                (TokenKind::NotEq, "≠"),
                (TokenKind::Name, "d"),
            ],
        );
    }

    #[test]
    fn rule_header() {
        compare_tokens(
            "rule neutral [x']: x' ⋅ 1 == x'",
            [
                (TokenKind::Name, "rule"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "neutral"),
                (TokenKind::Whitespace, " "),
                (TokenKind::OpenSquare, "["),
                (TokenKind::Name, "x'"),
                (TokenKind::CloseSquare, "]"),
                (TokenKind::Colon, ":"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x'"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Mul, "⋅"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "1"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Eq, "=="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "x'"),
            ],
        );
    }

    #[test]
    fn unknown_characters_become_symbols() {
        compare_tokens(
            "x $ y",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Name, "y"),
            ],
        );
    }
}
