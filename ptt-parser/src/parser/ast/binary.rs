use crate::parser::{
    ast::expr::{parse_operand, Expr},
    error::Error,
    token::BinOp,
    Parser,
    Precedence,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `x + y`. Binary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses the operators and operands following `lhs`, as long as the operators bind tighter
    /// than `precedence`.
    ///
    /// If we are parsing `x + y * z`, we first parse `x`, then the operator `+`, then `y`.
    /// Before building the `x + y` node, we recurse with `y` as the new left-hand side and the
    /// precedence of `+`; the recursive call picks up `* z` because `*` binds tighter than `+`,
    /// and returns `y * z`. An operator with equal precedence, as in `x - y - z`, is left for the
    /// outer loop, which makes every operator left-associative.
    pub fn parse_expr(input: &mut Parser, mut lhs: Expr, precedence: Precedence) -> Result<Expr, Error> {
        loop {
            // clone the input stream to emulate peeking
            let mut input_ahead = input.clone();
            let op = match input_ahead.try_parse::<BinOp>() {
                Ok(op) if op.precedence() > precedence => op,
                _ => break,
            };
            *input = input_ahead;

            let operand = parse_operand(input)?;
            let rhs = Self::parse_expr(input, operand, op.precedence())?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}
