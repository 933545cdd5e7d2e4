use crate::{
    consts::PLACEHOLDER,
    error::{Error, MissingPlaceholder},
    expr::Expr,
    symbol::Symbol,
    unify::Bindings,
};
use std::{fmt, ops::Not};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary relation between two expressions, such as `x = y` or `x ≥ y`.
///
/// A relation is stored in terms of a base relation symbol plus two modifiers. The `reversed`
/// flag means the relation reads right to left (`a > b` is `a < b` reversed), and the `negated`
/// flag means its logical negation (`a ≥ b` is `a < b` negated). The sides are never swapped
/// physically, so `lhs` is always the expression written on the left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Relation {
    pub symbol: Symbol,
    pub lhs: Expr,
    pub rhs: Expr,
    pub reversed: bool,
    pub negated: bool,
}

impl Relation {
    /// Creates a relation with no modifiers.
    pub fn new(symbol: Symbol, lhs: Expr, rhs: Expr) -> Self {
        Self { symbol, lhs, rhs, reversed: false, negated: false }
    }

    pub fn with_reversed(self, reversed: bool) -> Self {
        Self { reversed, ..self }
    }

    pub fn with_negated(self, negated: bool) -> Self {
        Self { negated, ..self }
    }

    /// Returns the text rendered between the two sides.
    pub fn text(&self) -> &str {
        self.symbol.text(self.reversed, self.negated)
    }

    /// Substitutes the bound values of `bindings` into both sides.
    pub fn substitute(&self, bindings: &Bindings) -> Self {
        Self {
            lhs: self.lhs.substitute(bindings),
            rhs: self.rhs.substitute(bindings),
            ..self.clone()
        }
    }

    /// Converts this relation into a [`ChainPart`], dropping its left side. The left side must
    /// be the placeholder atom `__`.
    pub fn to_chain_part(&self) -> Result<ChainPart, Error> {
        match &self.lhs {
            Expr::Atom(symbol) if *symbol == *PLACEHOLDER => Ok(ChainPart {
                symbol: self.symbol.clone(),
                expr: self.rhs.clone(),
                reversed: self.reversed,
                negated: self.negated,
            }),
            lhs => Err(Error::unspanned(MissingPlaceholder { found: lhs.to_string() })),
        }
    }
}

impl Not for Relation {
    type Output = Relation;

    /// Flips the negation of the relation.
    fn not(self) -> Relation {
        let negated = !self.negated;
        self.with_negated(negated)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.text(), self.rhs)
    }
}

/// A relation with its left side left implicit: "the previous expression, related by
/// `symbol`, to `expr`". A proof chain is a beginning expression followed by chain parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainPart {
    pub symbol: Symbol,
    pub expr: Expr,
    pub reversed: bool,
    pub negated: bool,
}

impl ChainPart {
    /// Creates a chain part with no modifiers.
    pub fn new(symbol: Symbol, expr: Expr) -> Self {
        Self { symbol, expr, reversed: false, negated: false }
    }

    /// Returns the text rendered before the expression.
    pub fn text(&self) -> &str {
        self.symbol.text(self.reversed, self.negated)
    }

    /// Rebuilds the full relation, using `lhs` as its left side.
    pub fn to_relation(&self, lhs: Expr) -> Relation {
        Relation {
            symbol: self.symbol.clone(),
            lhs,
            rhs: self.expr.clone(),
            reversed: self.reversed,
            negated: self.negated,
        }
    }
}

impl fmt::Display for ChainPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", PLACEHOLDER.name(), self.text(), self.expr)
    }
}

/// Displays a list of chain parts, one per line.
pub struct DisplayParts<'a>(pub &'a [ChainPart]);

impl fmt::Display for DisplayParts<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}
