use crate::{
    parser::{error::{Error, UnexpectedToken}, Parse, Parser},
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An atom: a name such as `x` or `__`, or an integer literal such as `0`. Integer literals are
/// plain names to the engine; no arithmetic is ever performed on them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atom {
    /// The name of the atom.
    pub name: String,

    /// The region of the source code that this atom was parsed from.
    pub span: Range<usize>,
}

impl Atom {
    /// Returns the span of the atom.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Atom {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Name | TokenKind::Int => Ok(Self {
                name: token.lexeme.to_string(),
                span: token.span,
            }),
            found => Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Name, TokenKind::Int],
                found,
            })),
        }
    }
}
