use crate::parser::{
    ast::expr::{parse_operand, Expr},
    error::Error,
    token::UnaryOp,
    Parse,
    Parser,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`. The operator applies to the operand directly after it, so
/// `-x * y` is `(-x) * y`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = UnaryOp::parse(input)?;
        let operand = parse_operand(input)?;
        let span = op.span.start..operand.span().end;

        Ok(Self {
            op,
            operand: Box::new(operand),
            span,
        })
    }
}
