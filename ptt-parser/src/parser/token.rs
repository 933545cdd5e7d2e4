//! Structs to help parse unary, binary and relational operators.

use crate::{
    parser::{
        error::{Error, UnexpectedToken},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The unary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum UnaryOpKind {
    Neg,
}

/// A unary operator that takes one operand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnaryOp {
    /// The kind of unary operator.
    pub kind: UnaryOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl Parse for UnaryOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Sub => UnaryOpKind::Neg,
            found => return Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Sub],
                found,
            })),
        };

        Ok(Self { kind, span: token.span })
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BinOpKind {
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// Returns the precedence of the binary operation.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }
}

/// A binary operator that takes two operands. All binary operators are left-associative.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinOp {
    /// The kind of binary operator.
    pub kind: BinOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl BinOp {
    /// Returns the precedence of the binary operator.
    pub fn precedence(&self) -> Precedence {
        self.kind.precedence()
    }
}

impl Parse for BinOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Mul => BinOpKind::Mul,
            TokenKind::Div => BinOpKind::Div,
            TokenKind::Add => BinOpKind::Add,
            TokenKind::Sub => BinOpKind::Sub,
            found => return Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[TokenKind::Mul, TokenKind::Div, TokenKind::Add, TokenKind::Sub],
                found,
            })),
        };

        Ok(Self { kind, span: token.span })
    }
}

/// The comparison a relation makes between its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelOpKind {
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
}

/// A relational operator, such as `=` or `<=`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelOp {
    /// The kind of relational operator.
    pub kind: RelOpKind,

    /// The region of the source code that this operator was parsed from.
    pub span: Range<usize>,
}

impl Parse for RelOp {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.next_token()?;
        let kind = match token.kind {
            TokenKind::Eq => RelOpKind::Eq,
            TokenKind::NotEq => RelOpKind::NotEq,
            TokenKind::Less => RelOpKind::Less,
            TokenKind::Greater => RelOpKind::Greater,
            TokenKind::LessEq => RelOpKind::LessEq,
            TokenKind::GreaterEq => RelOpKind::GreaterEq,
            found => return Err(Error::new(vec![token.span], UnexpectedToken {
                expected: &[
                    TokenKind::Eq,
                    TokenKind::NotEq,
                    TokenKind::Less,
                    TokenKind::Greater,
                    TokenKind::LessEq,
                    TokenKind::GreaterEq,
                ],
                found,
            })),
        };

        Ok(Self { kind, span: token.span })
    }
}
