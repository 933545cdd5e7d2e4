use crate::parser::{
    ast::expr::Expr,
    error::Error,
    token::RelOp,
    Parse,
    Parser,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A relation between two expressions, such as `x * 1 = x` or `a < b`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Relation {
    /// The left-hand side of the relation.
    pub lhs: Expr,

    /// The relational operator.
    pub op: RelOp,

    /// The right-hand side of the relation.
    pub rhs: Expr,

    /// The region of the source code that this relation was parsed from.
    pub span: Range<usize>,
}

impl Relation {
    /// Returns the span of the relation.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Relation {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = Expr::parse(input)?;
        let op = RelOp::parse(input)?;
        let rhs = Expr::parse(input)?;
        let span = lhs.span().start..rhs.span().end;

        Ok(Self { lhs, op, rhs, span })
    }
}
