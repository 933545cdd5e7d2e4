pub mod ast;
pub mod error;
pub mod token;

use error::{Error, ExpectedEof, UnexpectedEof, UnexpectedToken};
use super::tokenizer::{tokenize_complete, Token, TokenKind};
use std::ops::Range;

/// A high-level parser for the language. This is the type to use to parse an arbitrary piece of
/// source into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl ptt_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the current token, or the end of the source code if the cursor is at
    /// the end of the stream.
    pub fn span(&self) -> Range<usize> {
        self.tokens
            .get(self.cursor)
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the current token. The cursor is not moved. Returns [`None`] if the cursor is at
    /// the end of the stream.
    pub fn current_token(&self) -> Option<&Token<'source>> {
        self.tokens.get(self.cursor)
    }

    /// Advances the cursor past any whitespace tokens.
    pub fn advance_past_whitespace(&mut self) {
        while let Some(token) = self.current_token() {
            if !token.is_whitespace() {
                break;
            }
            self.cursor += 1;
        }
    }

    /// Returns the kind of the next non-whitespace token without consuming it.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens[self.cursor..]
            .iter()
            .find(|token| !token.is_whitespace())
            .map(|token| token.kind)
    }

    /// Returns the next token to be parsed, then advances the cursor. Whitespace tokens are
    /// skipped.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        self.advance_past_whitespace();
        match self.tokens.get(self.cursor) {
            Some(token) => {
                self.cursor += 1;
                // cloning is cheap: only Range<_> is cloned
                Ok(token.clone())
            },
            None => Err(self.error(UnexpectedEof)),
        }
    }

    /// Consumes the next token, which must be of the given kind.
    pub fn expect(&mut self, kind: TokenKind, expected: &'static [TokenKind]) -> Result<Token<'source>, Error> {
        let token = self.next_token()?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(Error::new(vec![token.span], UnexpectedToken { expected, found: token.kind }))
        }
    }

    /// Speculatively parses a value from the given stream of tokens. This function can be used
    /// in the [`Parse::parse`] implementation of a type with the given [`Parser`], as it will
    /// automatically backtrack the cursor position if parsing fails.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        self.try_parse_with_fn(T::parse)
    }

    /// Speculatively parses a value from the given stream of tokens, using a custom parsing
    /// function to parse the value.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse_with_fn<T, F>(&mut self, f: F) -> Result<T, Error>
    where
        F: FnOnce(&mut Parser<'source>) -> Result<T, Error>,
    {
        let start = self.cursor;
        match f(self) {
            Ok(value) => Ok(value),
            err => {
                self.cursor = start;
                err
            },
        }
    }

    /// Parses values (at least one) delimited by the given token kind.
    ///
    /// Parsing stops at the first position where no delimiter follows a value. An error is
    /// returned if the first value fails to parse, or if a value fails to parse after a
    /// delimiter.
    pub fn parse_delimited<T: Parse>(&mut self, delimiter: TokenKind) -> Result<Vec<T>, Error> {
        let mut values = vec![T::parse(self)?];

        while self.peek_kind() == Some(delimiter) {
            self.next_token()?;
            values.push(T::parse(self)?);
        }

        Ok(values)
    }

    /// Attempts to parse a value from the given stream of tokens. All the tokens must be consumed
    /// by the parser; if not, an error is returned.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = T::parse(self)?;
        self.advance_past_whitespace();
        if self.cursor == self.tokens.len() {
            Ok(value)
        } else {
            Err(self.error(ExpectedEof))
        }
    }
}

/// Any type that can be parsed from a source of tokens.
pub trait Parse: Sized {
    /// Parses a value from the given stream of tokens, advancing the stream past the consumed
    /// tokens if parsing is successful.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    use ast::{Atom, Binary, Expr, Paren, Relation, RuleDecl, Unary};
    use error::{EmptyParenthesis, ExpectedKeyword, UnclosedParenthesis, UnclosedQuantifierList};
    use token::{BinOp, BinOpKind, RelOpKind, UnaryOp, UnaryOpKind};

    fn atom(name: &str, span: Range<usize>) -> Expr {
        Expr::Atom(Atom { name: name.to_string(), span })
    }

    #[test]
    fn single_atom() {
        let expr = Parser::new("  zeta ").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, atom("zeta", 2..6));
    }

    #[test]
    fn integer_atom() {
        let expr = Parser::new("1").try_parse_full::<Expr>().unwrap();
        assert_eq!(expr, atom("1", 0..1));
    }

    #[test]
    fn binary_left_associativity() {
        let expr = Parser::new("x * y * z").try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(atom("x", 0..1)),
                op: BinOp { kind: BinOpKind::Mul, span: 2..3 },
                rhs: Box::new(atom("y", 4..5)),
                span: 0..5,
            })),
            op: BinOp { kind: BinOpKind::Mul, span: 6..7 },
            rhs: Box::new(atom("z", 8..9)),
            span: 0..9,
        }));
    }

    #[test]
    fn binary_precedence() {
        let expr = Parser::new("a + b * c").try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(atom("a", 0..1)),
            op: BinOp { kind: BinOpKind::Add, span: 2..3 },
            rhs: Box::new(Expr::Binary(Binary {
                lhs: Box::new(atom("b", 4..5)),
                op: BinOp { kind: BinOpKind::Mul, span: 6..7 },
                rhs: Box::new(atom("c", 8..9)),
                span: 4..9,
            })),
            span: 0..9,
        }));
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = Parser::new("a - b - c").try_parse_full::<Expr>().unwrap();
        let Expr::Binary(outer) = expr else {
            panic!("expected a binary expression");
        };

        assert_eq!(outer.op.kind, BinOpKind::Sub);
        assert_eq!(*outer.rhs, atom("c", 8..9));
        assert_eq!(outer.lhs.span(), 0..5);
    }

    #[test]
    fn unary_binds_tightest() {
        let expr = Parser::new("-x * y").try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(Expr::Unary(Unary {
                op: UnaryOp { kind: UnaryOpKind::Neg, span: 0..1 },
                operand: Box::new(atom("x", 1..2)),
                span: 0..2,
            })),
            op: BinOp { kind: BinOpKind::Mul, span: 3..4 },
            rhs: Box::new(atom("y", 5..6)),
            span: 0..6,
        }));
    }

    #[test]
    fn parenthesized() {
        let expr = Parser::new("x * (y * z)").try_parse_full::<Expr>().unwrap();

        assert_eq!(expr, Expr::Binary(Binary {
            lhs: Box::new(atom("x", 0..1)),
            op: BinOp { kind: BinOpKind::Mul, span: 2..3 },
            rhs: Box::new(Expr::Paren(Paren {
                expr: Box::new(Expr::Binary(Binary {
                    lhs: Box::new(atom("y", 5..6)),
                    op: BinOp { kind: BinOpKind::Mul, span: 7..8 },
                    rhs: Box::new(atom("z", 9..10)),
                    span: 5..10,
                })),
                span: 4..11,
            })),
            span: 0..11,
        }));
    }

    #[test]
    fn relation() {
        let relation = Parser::new("x * 1 >= x").try_parse_full::<Relation>().unwrap();

        assert_eq!(relation.op.kind, RelOpKind::GreaterEq);
        assert_eq!(relation.lhs.span(), 0..5);
        assert_eq!(relation.rhs, atom("x", 9..10));
        assert_eq!(relation.span, 0..10);
    }

    #[test]
    fn simple_rule() {
        let rule = Parser::new("rule commutativity [x, y]: x * y = y * x")
            .try_parse_full::<RuleDecl>()
            .unwrap();

        assert_eq!(rule.name, Atom { name: "commutativity".to_string(), span: 5..18 });
        assert_eq!(rule.quantified, vec![
            Atom { name: "x".to_string(), span: 20..21 },
            Atom { name: "y".to_string(), span: 23..24 },
        ]);
        assert_eq!(rule.corollary.op.kind, RelOpKind::Eq);
        assert!(rule.conditions.is_empty());
    }

    #[test]
    fn implication_rule() {
        let rule = Parser::new("rule cancel [x, y, c]: x * c = y * c <== x = y, c != 0")
            .try_parse_full::<RuleDecl>()
            .unwrap();

        assert_eq!(rule.quantified.len(), 3);
        assert_eq!(rule.conditions.len(), 2);
        assert_eq!(rule.conditions[0].op.kind, RelOpKind::Eq);
        assert_eq!(rule.conditions[1].op.kind, RelOpKind::NotEq);
        assert_eq!(rule.conditions[1].rhs, atom("0", 53..54));
    }

    #[test]
    fn rule_without_quantifiers() {
        let rule = Parser::new("rule fact []: a = c")
            .try_parse_full::<RuleDecl>()
            .unwrap();

        assert!(rule.quantified.is_empty());
    }

    #[test]
    fn unclosed_parenthesis() {
        let err = Parser::new("(x * y").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<UnclosedParenthesis>());
        assert_eq!(err.spans, vec![0..1]);
    }

    #[test]
    fn empty_parenthesis() {
        let err = Parser::new("x * ()").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<EmptyParenthesis>());
    }

    #[test]
    fn trailing_input() {
        let err = Parser::new("x y").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<ExpectedEof>());
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn missing_operand() {
        let err = Parser::new("x +").try_parse_full::<Expr>().unwrap_err();
        assert!(err.is::<UnexpectedEof>());
    }

    #[test]
    fn unexpected_symbol() {
        let err = Parser::new("x + $").try_parse_full::<Expr>().unwrap_err();
        let kind = err.kind_as::<UnexpectedToken>().unwrap();
        assert_eq!(kind.found, TokenKind::Symbol);
    }

    #[test]
    fn missing_rule_keyword() {
        let err = Parser::new("axiom comm [x]: x = x").try_parse_full::<RuleDecl>().unwrap_err();
        assert!(err.is::<ExpectedKeyword>());
    }

    #[test]
    fn unclosed_quantifier_list() {
        let err = Parser::new("rule comm [x, y: x = y").try_parse_full::<RuleDecl>().unwrap_err();
        assert!(err.is::<UnclosedQuantifierList>());
        assert_eq!(err.spans, vec![10..11]);
    }
}
