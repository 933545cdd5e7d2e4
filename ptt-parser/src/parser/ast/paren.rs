use crate::{
    parser::{
        ast::expr::Expr,
        error::{EmptyParenthesis, Error, UnclosedParenthesis},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parenthesized expression, such as `(x + y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// The region of the source code that this expression was parsed from, including the
    /// parentheses.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression, stripping any number of nested parentheses.
    pub fn innermost(&self) -> &Expr {
        self.expr.innermost()
    }
}

impl Parse for Paren {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let open = input.expect(TokenKind::OpenParen, &[TokenKind::OpenParen])?;

        if input.peek_kind() == Some(TokenKind::CloseParen) {
            let close = input.next_token()?;
            return Err(Error::new(vec![open.span.start..close.span.end], EmptyParenthesis));
        }

        let expr = Expr::parse(input)?;

        match input.peek_kind() {
            Some(TokenKind::CloseParen) => {
                let close = input.next_token()?;
                Ok(Self {
                    expr: Box::new(expr),
                    span: open.span.start..close.span.end,
                })
            },
            _ => Err(Error::new(vec![open.span], UnclosedParenthesis)),
        }
    }
}
