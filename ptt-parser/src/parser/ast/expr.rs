use crate::{
    parser::{
        ast::{atom::Atom, binary::Binary, paren::Paren, unary::Unary},
        error::Error,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents any kind of expression.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A name or integer literal, such as `x` or `0`.
    Atom(Atom),

    /// A parenthesized expression, such as `(x + y)`.
    Paren(Paren),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `x * y`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Atom(atom) => atom.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Returns the innermost expression, stripping any number of enclosing parentheses.
    pub fn innermost(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = &paren.expr;
        }
        expr
    }

    /// Calls the given visitor on every atom in the expression, left to right.
    pub fn visit_atoms<'a>(&'a self, f: &mut impl FnMut(&'a Atom)) {
        match self {
            Expr::Atom(atom) => f(atom),
            Expr::Paren(paren) => paren.expr.visit_atoms(f),
            Expr::Unary(unary) => unary.operand.visit_atoms(f),
            Expr::Binary(binary) => {
                binary.lhs.visit_atoms(f);
                binary.rhs.visit_atoms(f);
            },
        }
    }
}

/// Parses a single operand: a unary expression, a parenthesized expression or an atom.
pub(crate) fn parse_operand(input: &mut Parser) -> Result<Expr, Error> {
    match input.peek_kind() {
        Some(TokenKind::Sub) => Unary::parse(input).map(Expr::Unary),
        Some(TokenKind::OpenParen) => Paren::parse(input).map(Expr::Paren),
        _ => Atom::parse(input).map(Expr::Atom),
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let lhs = parse_operand(input)?;
        Binary::parse_expr(input, lhs, Precedence::Any)
    }
}
